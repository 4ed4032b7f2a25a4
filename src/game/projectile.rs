//! Bubbles in flight.
//!
//! A launched bubble travels in a straight line, bouncing off the side walls,
//! until it touches a stuck bubble or reaches the top of the grid. It is then
//! moved into the grid.

use bevy::prelude::*;

use super::{
    SimulationSystems,
    bubble::{Bubble, BubbleColor},
    grid::Grid,
    hex::GridCoord,
};
use crate::{AppSystems, config::GameConfig};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<FlyingBubbles>();
    app.add_message::<BubbleLanded>();

    app.add_systems(
        FixedUpdate,
        advance_flying_bubbles.in_set(SimulationSystems::Advance),
    );
    app.add_systems(
        FixedUpdate,
        (bounce_off_walls, land_flying_bubbles)
            .chain()
            .in_set(SimulationSystems::Collide),
    );
    app.add_systems(Update, draw_flying_bubbles.in_set(AppSystems::Update));
}

/// Bubbles launched by the shooter that have not landed yet.
#[derive(Resource, Debug, Default)]
pub struct FlyingBubbles(pub Vec<Bubble>);

/// Message sent when a flying bubble is stuck into the grid.
#[derive(Message, Debug, Clone)]
pub struct BubbleLanded {
    pub coord: GridCoord,
    pub color: BubbleColor,
}

fn advance_flying_bubbles(mut flying: ResMut<FlyingBubbles>) {
    for bubble in &mut flying.0 {
        bubble.update();
    }
}

/// Reflect bubbles heading out through the left or right edge.
fn bounce_off_walls(mut flying: ResMut<FlyingBubbles>, config: Res<GameConfig>) {
    let right_wall = config.playfield_width as f32;
    for bubble in &mut flying.0 {
        bounce(bubble, right_wall);
    }
}

fn bounce(bubble: &mut Bubble, right_wall: f32) {
    let radius = bubble.size / 2.0;
    let heading_left = bubble.velocity().x < 0.0;
    if (heading_left && bubble.position.x - radius < 0.0)
        || (!heading_left && bubble.position.x + radius > right_wall)
    {
        bubble.reflect_x();
    }
}

/// Move every bubble that hit something into the grid.
fn land_flying_bubbles(
    mut grid: ResMut<Grid>,
    mut flying: ResMut<FlyingBubbles>,
    mut landed_events: MessageWriter<BubbleLanded>,
) {
    let in_flight = std::mem::take(&mut flying.0);
    for bubble in in_flight {
        let Some(target) = grid.check_collision(&bubble) else {
            flying.0.push(bubble);
            continue;
        };

        let color = bubble.color;
        if let Some(coord) = land(&mut grid, bubble, target) {
            info!("Bubble landed at {} with color {:?}", coord, color);
            landed_events.write(BubbleLanded { coord, color });
        }
    }
}

/// Snap a bubble onto its target cell and stick it there.
fn land(grid: &mut Grid, mut bubble: Bubble, target: GridCoord) -> Option<GridCoord> {
    bubble.position = grid.grid_coord_to_pixel(target);
    match grid.add_bubble(bubble) {
        Ok(coord) => Some(coord),
        Err(dropped) => {
            warn!(
                "Dropped {:?} bubble aimed at {}: outside the grid",
                dropped.color, target
            );
            None
        }
    }
}

fn draw_flying_bubbles(mut gizmos: Gizmos, flying: Res<FlyingBubbles>, config: Res<GameConfig>) {
    for bubble in &flying.0 {
        bubble.draw(&mut gizmos, &config);
    }
}
