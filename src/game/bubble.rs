//! Bubbles - the colored hexagons that get shot, stuck, popped and dropped.
//!
//! A bubble knows nothing about the grid. It only tracks where it is, what
//! color it is, and how it is moving.

use bevy::prelude::*;
use rand::Rng;

use crate::config::GameConfig;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bubble>();
    app.register_type::<BubbleColor>();
    app.register_type::<BubbleState>();
}

/// Downward acceleration applied to falling bubbles, in pixels per tick².
pub const GRAVITY: f32 = 0.5;

/// Maximum sideways speed given to a bubble when it starts falling.
const FALL_DRIFT: f32 = 2.0;

/// Gap between the drawn hexagon and the cell edge.
const DRAW_INSET: f32 = 2.0;

/// How much darker the outline is than the fill, per channel.
const OUTLINE_DARKEN: u8 = 50;

/// The six bubble colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect, Default)]
pub enum BubbleColor {
    #[default]
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Cyan,
}

impl BubbleColor {
    pub const ALL: [BubbleColor; 6] = [
        BubbleColor::Red,
        BubbleColor::Blue,
        BubbleColor::Green,
        BubbleColor::Yellow,
        BubbleColor::Purple,
        BubbleColor::Cyan,
    ];

    /// The 8-bit sRGB fill value.
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            BubbleColor::Red => [255, 50, 50],
            BubbleColor::Blue => [50, 50, 255],
            BubbleColor::Green => [50, 255, 50],
            BubbleColor::Yellow => [255, 255, 50],
            BubbleColor::Purple => [255, 50, 255],
            BubbleColor::Cyan => [50, 255, 255],
        }
    }

    pub fn to_color(self) -> Color {
        let [r, g, b] = self.rgb();
        Color::srgb_u8(r, g, b)
    }

    /// Fill color darkened for the outline.
    pub fn outline_color(self) -> Color {
        let [r, g, b] = self.rgb().map(|c| c.saturating_sub(OUTLINE_DARKEN));
        Color::srgb_u8(r, g, b)
    }

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// What a bubble is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect, Default)]
pub enum BubbleState {
    /// Held by the shooter or stuck in the grid.
    #[default]
    Fixed,
    /// Flying after a launch.
    Moving,
    /// Dropping off the grid after losing its anchor.
    Falling,
}

/// A single bubble.
///
/// Velocity is only nonzero while `Moving` or `Falling`; the state
/// transitions below are the only way to change it.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Bubble {
    /// Center in playfield pixels.
    pub position: Vec2,
    pub color: BubbleColor,
    /// Cell width this bubble is drawn to fill.
    pub size: f32,
    velocity: Vec2,
    state: BubbleState,
}

impl Bubble {
    pub fn new(position: Vec2, color: BubbleColor, size: f32) -> Self {
        Self {
            position,
            color,
            size,
            velocity: Vec2::ZERO,
            state: BubbleState::Fixed,
        }
    }

    /// A fixed bubble of a random color.
    pub fn random(position: Vec2, size: f32, rng: &mut impl Rng) -> Self {
        Self::new(position, BubbleColor::random(rng), size)
    }

    pub fn state(&self) -> BubbleState {
        self.state
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        match self.state {
            BubbleState::Fixed => {}
            BubbleState::Moving => {
                self.position += self.velocity;
            }
            BubbleState::Falling => {
                self.velocity.y += GRAVITY;
                self.position += self.velocity;
            }
        }
    }

    /// Launch with the given velocity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
        self.state = BubbleState::Moving;
    }

    /// Come to rest, e.g. when stuck into the grid.
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.state = BubbleState::Fixed;
    }

    /// Start dropping with a small random sideways drift.
    pub fn start_falling(&mut self, rng: &mut impl Rng) {
        self.state = BubbleState::Falling;
        self.velocity = Vec2::new(rng.random_range(-FALL_DRIFT..=FALL_DRIFT), 0.0);
    }

    /// Flip horizontal travel direction (wall bounce).
    pub fn reflect_x(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    /// Corners of the drawn hexagon in playfield pixels, pointy side up.
    pub fn hexagon(&self) -> [Vec2; 6] {
        hexagon_corners(self.position, self.size / 2.0 - DRAW_INSET)
    }

    /// Paint the bubble. Gizmos only draw lines, so the body is filled with
    /// nested rings inside a darker outline.
    pub fn draw(&self, gizmos: &mut Gizmos, config: &GameConfig) {
        let radius = self.size / 2.0 - DRAW_INSET;
        let fill = self.color.to_color();
        for scale in [0.8, 0.6, 0.4, 0.2] {
            let corners = hexagon_corners(self.position, radius * scale);
            draw_outline(gizmos, &corners, config, fill);
        }
        draw_outline(gizmos, &self.hexagon(), config, self.color.outline_color());
    }
}

/// Hexagon corners around `center`, starting at -30 degrees.
pub fn hexagon_corners(center: Vec2, radius: f32) -> [Vec2; 6] {
    std::array::from_fn(|i| {
        let angle = (60.0 * i as f32 - 30.0).to_radians();
        center + radius * Vec2::new(angle.cos(), angle.sin())
    })
}

/// Draw a closed polygon given in playfield pixels.
pub fn draw_outline(gizmos: &mut Gizmos, corners: &[Vec2; 6], config: &GameConfig, color: Color) {
    for i in 0..6 {
        let next = (i + 1) % 6;
        gizmos.line_2d(config.to_world(corners[i]), config.to_world(corners[next]), color);
    }
}
