//! Construction-time game parameters.
//!
//! Everything here is fixed when the app starts: the window is sized from the
//! playfield, and the grid and shooter are built from the bubble size.

use bevy::prelude::*;

use crate::game::ROW_OVERLAP;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<GameConfig>();
}

/// Playfield geometry and tuning values.
///
/// The playfield uses its own pixel space: origin at the top-left corner,
/// x grows to the right and y grows downward. [`GameConfig::to_world`] and
/// [`GameConfig::to_playfield`] convert to and from Bevy's centered, y-up world.
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct GameConfig {
    pub playfield_width: u32,
    pub playfield_height: u32,
    /// Width of one grid cell in pixels.
    pub bubble_size: u32,
    /// Rows filled with random bubbles when the game starts.
    pub initial_rows: u32,
    /// Launch speed in pixels per simulation tick.
    pub shoot_speed: f32,
    /// Simulation ticks per second.
    pub tick_hz: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: 800,
            playfield_height: 600,
            bubble_size: 40,
            initial_rows: 4,
            shoot_speed: 15.0,
            tick_hz: 60.0,
        }
    }
}

impl GameConfig {
    /// Panic in debug builds on geometry the grid cannot be built from.
    ///
    /// Rows are packed `bubble_size - ROW_OVERLAP` apart, so bubbles must be
    /// larger than the overlap, and the playfield must fit at least one cell.
    pub fn debug_validate(&self) {
        debug_assert!(
            self.bubble_size as f32 > ROW_OVERLAP,
            "bubble_size {} must exceed the row overlap of {ROW_OVERLAP}px",
            self.bubble_size
        );
        debug_assert!(
            self.playfield_width >= self.bubble_size && self.playfield_height >= self.bubble_size,
            "playfield {}x{} is smaller than one {}px bubble",
            self.playfield_width,
            self.playfield_height,
            self.bubble_size
        );
        debug_assert!(self.tick_hz > 0.0, "tick_hz must be positive");
    }

    pub fn playfield_size(&self) -> Vec2 {
        Vec2::new(self.playfield_width as f32, self.playfield_height as f32)
    }

    pub fn bubble_size_px(&self) -> f32 {
        self.bubble_size as f32
    }

    /// Where the shooter sits: horizontally centered, one bubble above the bottom edge.
    pub fn shooter_origin(&self) -> Vec2 {
        Vec2::new(
            self.playfield_width as f32 / 2.0,
            self.playfield_height as f32 - self.bubble_size_px(),
        )
    }

    /// Convert a playfield position (top-left origin, y down) to world space.
    pub fn to_world(&self, pos: Vec2) -> Vec2 {
        let half = self.playfield_size() / 2.0;
        Vec2::new(pos.x - half.x, half.y - pos.y)
    }

    /// Convert a world position back into playfield space.
    pub fn to_playfield(&self, world: Vec2) -> Vec2 {
        let half = self.playfield_size() / 2.0;
        Vec2::new(world.x + half.x, half.y - world.y)
    }
}
