//! The hexagonal grid that holds all stuck bubbles.
//!
//! Storage is a dense row-major array of optional bubbles. Every cell lookup
//! goes through [`Grid::index`], which rejects out-of-range coordinates.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;

use super::{
    SimulationSystems,
    bubble::Bubble,
    hex::{self, GridCoord},
};
use crate::config::GameConfig;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Grid>();
    app.init_resource::<Grid>();

    app.add_systems(Startup, fill_initial_rows);
    app.add_systems(FixedUpdate, update_grid.in_set(SimulationSystems::Advance));
    app.add_systems(Update, draw_grid);
}

/// Smallest same-color group that pops.
pub const MIN_MATCH_SIZE: usize = 3;

/// How much smaller than the drawn bubble the collision circle is.
const COLLISION_INSET: f32 = 4.0;

/// The bubble grid.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct Grid {
    /// Playfield width in pixels.
    width: u32,
    /// Playfield height in pixels.
    height: u32,
    bubble_size: f32,
    grid_width: usize,
    grid_height: usize,
    #[reflect(ignore)]
    cells: Vec<Option<Bubble>>,
}

impl FromWorld for Grid {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<GameConfig>();
        Self::new(
            config.playfield_width,
            config.playfield_height,
            config.bubble_size,
        )
    }
}

impl Grid {
    /// Create an empty grid covering a `width × height` playfield.
    pub fn new(width: u32, height: u32, bubble_size: u32) -> Self {
        debug_assert!(
            bubble_size as f32 > hex::ROW_OVERLAP,
            "bubble_size {bubble_size} must exceed the row overlap"
        );
        let grid_width = (width / bubble_size) as usize;
        let grid_height = (height / bubble_size) as usize;
        Self {
            width,
            height,
            bubble_size: bubble_size as f32,
            grid_width,
            grid_height,
            cells: vec![None; grid_width * grid_height],
        }
    }

    pub fn grid_width(&self) -> usize {
        self.grid_width
    }

    pub fn grid_height(&self) -> usize {
        self.grid_height
    }

    pub fn bubble_size(&self) -> f32 {
        self.bubble_size
    }

    /// Radius used for bubble-to-bubble contact, a little under the drawn size.
    pub fn collision_radius(&self) -> f32 {
        (self.bubble_size - COLLISION_INSET) / 2.0
    }

    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.grid_height
            && (coord.col as usize) < self.grid_width
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        self.in_bounds(coord)
            .then(|| coord.row as usize * self.grid_width + coord.col as usize)
    }

    fn coord_at(&self, index: usize) -> GridCoord {
        GridCoord::new(
            (index / self.grid_width) as i32,
            (index % self.grid_width) as i32,
        )
    }

    /// The bubble stuck at a cell, if any.
    pub fn get(&self, coord: GridCoord) -> Option<&Bubble> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub fn is_occupied(&self, coord: GridCoord) -> bool {
        self.get(coord).is_some()
    }

    fn take(&mut self, coord: GridCoord) -> Option<Bubble> {
        self.index(coord).and_then(|i| self.cells[i].take())
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Occupied cells in row-major order (top to bottom, left to right).
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Bubble)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| cell.as_ref().map(|bubble| (self.coord_at(i), bubble)))
    }

    pub fn pixel_to_grid_coord(&self, pos: Vec2) -> GridCoord {
        GridCoord::from_pixel(pos, self.bubble_size)
    }

    pub fn grid_coord_to_pixel(&self, coord: GridCoord) -> Vec2 {
        coord.to_pixel(self.bubble_size)
    }

    /// Fill the top `rows` rows with random bubbles.
    ///
    /// Cells whose bubble would poke past the right edge of the playfield are
    /// left empty. Returns how many bubbles were placed.
    pub fn fill_rows(&mut self, rows: usize, rng: &mut impl Rng) -> usize {
        let mut count = 0;
        for row in 0..rows.min(self.grid_height) {
            for col in 0..self.grid_width {
                let coord = GridCoord::new(row as i32, col as i32);
                let pos = self.grid_coord_to_pixel(coord);
                if pos.x + self.bubble_size > self.width as f32 {
                    continue;
                }
                if let Some(index) = self.index(coord) {
                    self.cells[index] = Some(Bubble::random(pos, self.bubble_size, rng));
                    count += 1;
                }
            }
        }
        count
    }

    /// Stick a bubble into the cell under its current position.
    ///
    /// The bubble is snapped to the cell center and stopped. Positions outside
    /// the grid hand the bubble back unchanged. An occupied cell is
    /// overwritten: the previous occupant is dropped.
    pub fn add_bubble(&mut self, mut bubble: Bubble) -> Result<GridCoord, Bubble> {
        let coord = self.pixel_to_grid_coord(bubble.position);
        let Some(index) = self.index(coord) else {
            return Err(bubble);
        };

        bubble.position = self.grid_coord_to_pixel(coord);
        bubble.stop();

        if let Some(previous) = self.cells[index].replace(bubble) {
            warn!(
                "Placed bubble over an occupied cell {}, dropping the {:?} bubble there",
                coord, previous.color
            );
        }
        Ok(coord)
    }

    /// Test a moving bubble against the top edge and every stuck bubble.
    ///
    /// Returns the cell the bubble should be placed in, or `None` if it is
    /// still flying freely.
    pub fn check_collision(&self, bubble: &Bubble) -> Option<GridCoord> {
        if bubble.position.y < self.bubble_size {
            let last_col = self.grid_width as i32 - 1;
            let col = hex::column_at(bubble.position.x, 0, self.bubble_size)
                .min(last_col)
                .max(0);
            return Some(GridCoord::new(0, col));
        }

        let reach = self.collision_radius() * 2.0;
        self.iter()
            .find(|(_, stuck)| stuck.position.distance(bubble.position) < reach)
            .map(|(coord, _)| self.find_nearest_empty_position(coord, bubble))
    }

    /// The empty neighbour of `coord` whose center is closest to `bubble`.
    ///
    /// Ties go to the earlier entry of the neighbour table. Falls back to
    /// `coord` itself when every neighbour is full or off-grid.
    pub fn find_nearest_empty_position(&self, coord: GridCoord, bubble: &Bubble) -> GridCoord {
        coord
            .neighbors()
            .into_iter()
            .filter(|n| self.in_bounds(*n) && !self.is_occupied(*n))
            .fold((coord, f32::INFINITY), |best, n| {
                let distance = self.grid_coord_to_pixel(n).distance_squared(bubble.position);
                if distance < best.1 { (n, distance) } else { best }
            })
            .0
    }

    /// Every cell reachable from `seeds` through occupied neighbours whose
    /// bubble satisfies `accept`.
    fn flood_fill(
        &self,
        seeds: impl IntoIterator<Item = GridCoord>,
        accept: impl Fn(&Bubble) -> bool,
    ) -> HashSet<GridCoord> {
        let mut visited = HashSet::new();
        let mut found = HashSet::new();
        let mut stack: Vec<GridCoord> = seeds.into_iter().collect();

        while let Some(coord) = stack.pop() {
            if !visited.insert(coord) {
                continue;
            }
            let Some(bubble) = self.get(coord) else {
                continue;
            };
            if !accept(bubble) {
                continue;
            }
            found.insert(coord);
            stack.extend(
                coord
                    .neighbors()
                    .into_iter()
                    .filter(|n| self.in_bounds(*n) && !visited.contains(n)),
            );
        }

        found
    }

    /// The same-color group connected to `coord`, including `coord` itself.
    ///
    /// No size threshold is applied here. Empty or off-grid seeds give an
    /// empty set.
    pub fn check_matches(&self, coord: GridCoord) -> HashSet<GridCoord> {
        let Some(color) = self.get(coord).map(|b| b.color) else {
            return HashSet::new();
        };
        self.flood_fill([coord], |b| b.color == color)
    }

    /// Pop a matched group if it is big enough, then drop whatever that left
    /// hanging.
    ///
    /// Groups smaller than [`MIN_MATCH_SIZE`] are left alone. Returns the
    /// bubbles that started falling.
    pub fn remove_matches(
        &mut self,
        matches: &HashSet<GridCoord>,
        rng: &mut impl Rng,
    ) -> Vec<Bubble> {
        if matches.len() < MIN_MATCH_SIZE {
            return Vec::new();
        }

        for &coord in matches {
            self.take(coord);
        }
        debug!("Popped {} bubbles", matches.len());

        self.drop_floating_bubbles(rng)
    }

    /// Cells connected to the top row through occupied cells.
    pub fn anchored_cells(&self) -> HashSet<GridCoord> {
        let top_row: Vec<GridCoord> = (0..self.grid_width as i32)
            .map(|col| GridCoord::new(0, col))
            .filter(|coord| self.is_occupied(*coord))
            .collect();
        self.flood_fill(top_row, |_| true)
    }

    /// Detach every bubble no longer connected to the top row.
    ///
    /// The detached bubbles are removed from the grid, set falling and
    /// returned in row-major order.
    pub fn drop_floating_bubbles(&mut self, rng: &mut impl Rng) -> Vec<Bubble> {
        let anchored = self.anchored_cells();
        let floating: Vec<GridCoord> = self
            .iter()
            .map(|(coord, _)| coord)
            .filter(|coord| !anchored.contains(coord))
            .collect();

        floating
            .into_iter()
            .filter_map(|coord| self.take(coord))
            .map(|mut bubble| {
                bubble.start_falling(rng);
                bubble
            })
            .collect()
    }

    /// Advance every stuck bubble one tick.
    pub fn update(&mut self) {
        for bubble in self.cells.iter_mut().flatten() {
            bubble.update();
        }
    }

    pub fn draw(&self, gizmos: &mut Gizmos, config: &GameConfig) {
        for (_, bubble) in self.iter() {
            bubble.draw(gizmos, config);
        }
    }
}

fn fill_initial_rows(mut grid: ResMut<Grid>, config: Res<GameConfig>) {
    let count = grid.fill_rows(config.initial_rows as usize, &mut rand::rng());
    info!(
        "Filled {} rows of a {}x{} grid with {} bubbles",
        config.initial_rows,
        grid.grid_width(),
        grid.grid_height(),
        count
    );
}

fn update_grid(mut grid: ResMut<Grid>) {
    grid.update();
}

fn draw_grid(mut gizmos: Gizmos, grid: Res<Grid>, config: Res<GameConfig>) {
    grid.draw(&mut gizmos, &config);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::bubble::{BubbleColor, BubbleState};
    use rand::{SeedableRng, rngs::StdRng};

    const SIZE: u32 = 40;

    fn grid() -> Grid {
        Grid::new(800, 600, SIZE)
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xB0BB1E)
    }

    /// Stick a bubble of `color` at `(row, col)`.
    fn place(grid: &mut Grid, row: i32, col: i32, color: BubbleColor) {
        let pos = grid.grid_coord_to_pixel(GridCoord::new(row, col));
        let placed = grid.add_bubble(Bubble::new(pos, color, SIZE as f32));
        assert_eq!(placed, Ok(GridCoord::new(row, col)));
    }

    fn flying(x: f32, y: f32) -> Bubble {
        let mut bubble = Bubble::new(Vec2::new(x, y), BubbleColor::Red, SIZE as f32);
        bubble.set_velocity(Vec2::new(0.0, -15.0));
        bubble
    }

    fn coords(cells: &[(i32, i32)]) -> HashSet<GridCoord> {
        cells.iter().map(|&(r, c)| GridCoord::new(r, c)).collect()
    }

    #[test]
    fn test_dimensions() {
        let grid = grid();
        assert_eq!(grid.grid_width(), 20);
        assert_eq!(grid.grid_height(), 15);
        assert!(grid.is_empty());
        assert_eq!(grid.collision_radius(), 18.0);
    }

    #[test]
    fn test_coord_roundtrip_on_grid() {
        let grid = grid();
        for row in 0..grid.grid_height() as i32 {
            for col in 0..grid.grid_width() as i32 {
                let coord = GridCoord::new(row, col);
                assert_eq!(grid.pixel_to_grid_coord(grid.grid_coord_to_pixel(coord)), coord);
            }
        }
    }

    #[test]
    fn test_lookups_out_of_bounds() {
        let grid = grid();
        assert!(grid.get(GridCoord::new(-1, 0)).is_none());
        assert!(grid.get(GridCoord::new(0, 20)).is_none());
        assert!(grid.get(GridCoord::new(15, 0)).is_none());
        assert!(!grid.in_bounds(GridCoord::new(0, -1)));
    }

    #[test]
    fn test_fill_rows_skips_cells_past_right_edge() {
        let mut grid = grid();
        let count = grid.fill_rows(4, &mut rng());
        // Even rows fit all 20 columns, odd rows lose their last one.
        assert_eq!(count, 20 + 19 + 20 + 19);
        assert_eq!(grid.len(), count);
        assert!(!grid.is_occupied(GridCoord::new(1, 19)));
        assert!(grid.is_occupied(GridCoord::new(0, 19)));
        assert!(!grid.is_occupied(GridCoord::new(4, 0)));
        assert!(grid.iter().all(|(_, b)| b.state() == BubbleState::Fixed));
    }

    #[test]
    fn test_add_bubble_snaps_and_stops() {
        let mut grid = grid();
        let mut bubble = Bubble::new(Vec2::new(107.0, 41.0), BubbleColor::Blue, 40.0);
        bubble.set_velocity(Vec2::new(2.0, -15.0));

        let coord = grid.add_bubble(bubble).unwrap();
        assert_eq!(coord, GridCoord::new(1, 2));

        let stuck = grid.get(coord).unwrap();
        assert_eq!(stuck.position, Vec2::new(100.0, 30.0));
        assert_eq!(stuck.state(), BubbleState::Fixed);
        assert_eq!(stuck.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_add_bubble_off_grid_hands_bubble_back() {
        let mut grid = grid();
        let bubble = Bubble::new(Vec2::new(-30.0, 100.0), BubbleColor::Blue, 40.0);
        let returned = grid.add_bubble(bubble.clone()).unwrap_err();
        assert_eq!(returned, bubble);
        assert!(grid.is_empty());

        let below = Bubble::new(Vec2::new(100.0, 30.0 * 15.0), BubbleColor::Blue, 40.0);
        assert!(grid.add_bubble(below).is_err());
    }

    #[test]
    fn test_add_bubble_overwrites_occupied_cell() {
        // Known quirk: placement does not guard against an occupied cell.
        let mut grid = grid();
        place(&mut grid, 2, 3, BubbleColor::Red);
        place(&mut grid, 2, 3, BubbleColor::Green);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(GridCoord::new(2, 3)).unwrap().color, BubbleColor::Green);
    }

    #[test]
    fn test_collision_with_top_edge_clamps_column() {
        let grid = grid();
        assert_eq!(grid.check_collision(&flying(415.0, 39.0)), Some(GridCoord::new(0, 10)));
        assert_eq!(grid.check_collision(&flying(-12.0, 5.0)), Some(GridCoord::new(0, 0)));
        assert_eq!(grid.check_collision(&flying(805.0, 5.0)), Some(GridCoord::new(0, 19)));
    }

    #[test]
    fn test_no_collision_in_open_space() {
        let mut grid = grid();
        place(&mut grid, 0, 5, BubbleColor::Red);
        assert_eq!(grid.check_collision(&flying(400.0, 300.0)), None);
    }

    #[test]
    fn test_collision_targets_nearest_empty_neighbor() {
        let mut grid = grid();
        place(&mut grid, 2, 5, BubbleColor::Red);
        // Stuck bubble at (200, 60). Coming in from below and slightly left.
        let target = grid.check_collision(&flying(190.0, 90.0));
        assert_eq!(target, Some(GridCoord::new(3, 4)));

        // From below and slightly right.
        let target = grid.check_collision(&flying(212.0, 92.0));
        assert_eq!(target, Some(GridCoord::new(3, 5)));
    }

    #[test]
    fn test_collision_uses_first_hit_in_row_major_order() {
        let mut grid = grid();
        place(&mut grid, 2, 5, BubbleColor::Red);
        place(&mut grid, 3, 5, BubbleColor::Blue);
        // Within reach of both (200, 60) and (220, 90); the row-2 cell is scanned first.
        let bubble = flying(205.0, 85.0);
        let expected = grid.find_nearest_empty_position(GridCoord::new(2, 5), &bubble);
        assert_eq!(grid.check_collision(&bubble), Some(expected));
        assert_eq!(expected, GridCoord::new(3, 4));
    }

    #[test]
    fn test_nearest_empty_falls_back_to_collided_cell() {
        let mut grid = grid();
        let center = GridCoord::new(3, 5);
        place(&mut grid, 3, 5, BubbleColor::Red);
        for n in center.neighbors() {
            place(&mut grid, n.row, n.col, BubbleColor::Blue);
        }
        let bubble = flying(220.0, 120.0);
        assert_eq!(grid.find_nearest_empty_position(center, &bubble), center);
    }

    #[test]
    fn test_nearest_empty_ignores_off_grid_neighbors() {
        let mut grid = grid();
        place(&mut grid, 0, 0, BubbleColor::Red);
        let bubble = flying(-20.0, 20.0);
        // (1, -1) would be closer but lies off the grid.
        let target = grid.find_nearest_empty_position(GridCoord::new(0, 0), &bubble);
        assert_eq!(target, GridCoord::new(1, 0));
    }

    #[test]
    fn test_check_matches_follows_color_only() {
        let mut grid = grid();
        place(&mut grid, 0, 0, BubbleColor::Red);
        place(&mut grid, 0, 1, BubbleColor::Red);
        place(&mut grid, 1, 0, BubbleColor::Red);
        place(&mut grid, 0, 2, BubbleColor::Blue);
        place(&mut grid, 0, 3, BubbleColor::Red);

        let matches = grid.check_matches(GridCoord::new(0, 1));
        assert_eq!(matches, coords(&[(0, 0), (0, 1), (1, 0)]));
    }

    #[test]
    fn test_check_matches_is_connected_and_contains_seed() {
        let mut grid = grid();
        grid.fill_rows(6, &mut rng());
        for (seed, bubble) in grid.iter() {
            let matches = grid.check_matches(seed);
            assert!(matches.contains(&seed));
            assert!(matches.iter().all(|c| grid.get(*c).unwrap().color == bubble.color));
            for coord in &matches {
                if matches.len() > 1 {
                    assert!(coord.neighbors().iter().any(|n| matches.contains(n)));
                }
            }
        }
    }

    #[test]
    fn test_check_matches_empty_and_off_grid() {
        let grid = grid();
        assert!(grid.check_matches(GridCoord::new(3, 3)).is_empty());
        assert!(grid.check_matches(GridCoord::new(-1, 3)).is_empty());
    }

    #[test]
    fn test_single_bubble_matches_itself() {
        let mut grid = grid();
        place(&mut grid, 0, 4, BubbleColor::Cyan);
        assert_eq!(grid.check_matches(GridCoord::new(0, 4)), coords(&[(0, 4)]));
    }

    #[test]
    fn test_remove_matches_below_threshold_is_noop() {
        let mut grid = grid();
        place(&mut grid, 0, 0, BubbleColor::Red);
        place(&mut grid, 0, 1, BubbleColor::Red);
        place(&mut grid, 1, 0, BubbleColor::Green);

        let matches = grid.check_matches(GridCoord::new(0, 0));
        assert_eq!(matches.len(), 2);
        let before: Vec<(GridCoord, Bubble)> = grid.iter().map(|(c, b)| (c, b.clone())).collect();
        let dropped = grid.remove_matches(&matches, &mut rng());
        assert!(dropped.is_empty());
        let after: Vec<(GridCoord, Bubble)> = grid.iter().map(|(c, b)| (c, b.clone())).collect();
        assert_eq!(before, after);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must exceed the row overlap")]
    fn test_zero_bubble_size_is_rejected() {
        let _grid = Grid::new(800, 600, 0);
    }

    #[test]
    fn test_remove_matches_clears_exactly_the_group() {
        let mut grid = grid();
        place(&mut grid, 0, 0, BubbleColor::Red);
        place(&mut grid, 0, 1, BubbleColor::Red);
        place(&mut grid, 0, 2, BubbleColor::Red);
        place(&mut grid, 0, 3, BubbleColor::Blue);
        place(&mut grid, 0, 5, BubbleColor::Red);

        let matches = grid.check_matches(GridCoord::new(0, 1));
        let dropped = grid.remove_matches(&matches, &mut rng());
        assert!(dropped.is_empty());
        assert_eq!(grid.iter().map(|(c, _)| c).collect::<HashSet<_>>(), coords(&[(0, 3), (0, 5)]));
    }

    #[test]
    fn test_patch_of_nine_pops_without_further_drops() {
        let mut grid = grid();
        for row in 0..3 {
            for col in 0..3 {
                place(&mut grid, row, col, BubbleColor::Purple);
            }
        }
        // An unrelated hanging column elsewhere stays anchored.
        place(&mut grid, 0, 10, BubbleColor::Blue);
        place(&mut grid, 1, 10, BubbleColor::Green);

        let matches = grid.check_matches(GridCoord::new(1, 1));
        assert_eq!(matches.len(), 9);

        let dropped = grid.remove_matches(&matches, &mut rng());
        assert!(dropped.is_empty());
        assert!(matches.iter().all(|c| !grid.is_occupied(*c)));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_bubble_hanging_from_popped_group_falls() {
        let mut grid = grid();
        // A column down to row 4, with a lone bubble below hanging from it.
        place(&mut grid, 0, 2, BubbleColor::Blue);
        place(&mut grid, 1, 2, BubbleColor::Blue);
        place(&mut grid, 2, 2, BubbleColor::Green);
        place(&mut grid, 3, 2, BubbleColor::Red);
        place(&mut grid, 3, 1, BubbleColor::Red);
        place(&mut grid, 4, 2, BubbleColor::Red);
        place(&mut grid, 5, 2, BubbleColor::Yellow);
        assert!(GridCoord::new(4, 2).neighbors().contains(&GridCoord::new(5, 2)));

        let matches = grid.check_matches(GridCoord::new(4, 2));
        assert_eq!(matches, coords(&[(3, 1), (3, 2), (4, 2)]));

        let dropped = grid.remove_matches(&matches, &mut rng());
        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].color, BubbleColor::Yellow);
        assert_eq!(dropped[0].state(), BubbleState::Falling);
        assert!(!grid.is_occupied(GridCoord::new(5, 2)));
        assert_eq!(grid.len(), 3);
    }

    #[test]
    fn test_drop_floating_leaves_only_anchored_cells() {
        let mut grid = grid();
        let mut rng = rng();
        grid.fill_rows(6, &mut rng);
        // Cut row 2 entirely so rows 3..6 lose their support.
        let cut: HashSet<GridCoord> = (0..20).map(|c| GridCoord::new(2, c)).collect();
        let below = grid.iter().filter(|(c, _)| c.row > 2).count();

        let dropped = grid.remove_matches(&cut, &mut rng);
        assert_eq!(dropped.len(), below);
        assert!(dropped.iter().all(|b| b.state() == BubbleState::Falling));
        assert!(grid.iter().all(|(c, _)| c.row < 2));
        assert_eq!(grid.anchored_cells().len(), grid.len());
    }

    #[test]
    fn test_drop_floating_is_idempotent() {
        let mut grid = grid();
        let mut rng = rng();
        place(&mut grid, 0, 0, BubbleColor::Red);
        place(&mut grid, 1, 0, BubbleColor::Red);
        place(&mut grid, 5, 5, BubbleColor::Blue);

        let first = grid.drop_floating_bubbles(&mut rng);
        assert_eq!(first.len(), 1);
        let snapshot: Vec<(GridCoord, Bubble)> =
            grid.iter().map(|(c, b)| (c, b.clone())).collect();

        let second = grid.drop_floating_bubbles(&mut rng);
        assert!(second.is_empty());
        let after: Vec<(GridCoord, Bubble)> = grid.iter().map(|(c, b)| (c, b.clone())).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_update_leaves_stuck_bubbles_in_place() {
        let mut grid = grid();
        place(&mut grid, 3, 3, BubbleColor::Red);
        let before = grid.get(GridCoord::new(3, 3)).unwrap().position;
        grid.update();
        assert_eq!(grid.get(GridCoord::new(3, 3)).unwrap().position, before);
    }
}
