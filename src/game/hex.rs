//! Offset hexagonal grid coordinates.
//!
//! Rows alternate their horizontal offset: odd rows sit half a bubble to the
//! right of even rows. Rows are packed `bubble_size - ROW_OVERLAP` pixels
//! apart, so neighbouring rows visually interlock.
//!
//! Pixel positions here are playfield pixels (origin top-left, y down).

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<GridCoord>();
}

/// How much consecutive rows overlap vertically, in pixels.
pub const ROW_OVERLAP: f32 = 10.0;

/// Neighbour offsets `(d_row, d_col)` for cells on even rows.
const EVEN_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, -1), (-1, 0), (0, 1), (1, -1), (1, 0), (0, -1)];

/// Neighbour offsets `(d_row, d_col)` for cells on odd rows (shifted right).
const ODD_ROW_NEIGHBORS: [(i32, i32); 6] = [(-1, 0), (-1, 1), (0, 1), (1, 0), (1, 1), (0, -1)];

/// A cell address in the offset grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct GridCoord {
    pub row: i32,
    pub col: i32,
}

impl GridCoord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub const fn is_odd_row(&self) -> bool {
        self.row % 2 != 0
    }

    /// The neighbour offset table for this cell's row parity.
    ///
    /// Matching, detachment and placement all go through this one lookup.
    #[inline]
    pub fn neighbor_offsets(&self) -> &'static [(i32, i32); 6] {
        if self.is_odd_row() {
            &ODD_ROW_NEIGHBORS
        } else {
            &EVEN_ROW_NEIGHBORS
        }
    }

    /// All 6 adjacent coordinates, in table order. May lie outside the grid.
    pub fn neighbors(&self) -> [GridCoord; 6] {
        self.neighbor_offsets()
            .map(|(dr, dc)| GridCoord::new(self.row + dr, self.col + dc))
    }

    /// Canonical pixel center of this cell.
    pub fn to_pixel(&self, bubble_size: f32) -> Vec2 {
        Vec2::new(
            self.col as f32 * bubble_size + row_offset(self.row, bubble_size),
            self.row as f32 * row_spacing(bubble_size),
        )
    }

    /// The cell containing a pixel position.
    ///
    /// Inverse of [`GridCoord::to_pixel`] for cell centers.
    pub fn from_pixel(pos: Vec2, bubble_size: f32) -> Self {
        let row = (pos.y / row_spacing(bubble_size)).floor() as i32;
        Self::new(row, column_at(pos.x, row, bubble_size))
    }
}

impl std::fmt::Display for GridCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Vertical distance between row centers.
#[inline]
pub fn row_spacing(bubble_size: f32) -> f32 {
    bubble_size - ROW_OVERLAP
}

#[inline]
fn row_offset(row: i32, bubble_size: f32) -> f32 {
    if row % 2 != 0 { bubble_size / 2.0 } else { 0.0 }
}

/// Column containing pixel `x` on the given row.
pub fn column_at(x: f32, row: i32, bubble_size: f32) -> i32 {
    ((x - row_offset(row, bubble_size)) / bubble_size).floor() as i32
}
