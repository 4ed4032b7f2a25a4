//! Debug visualization for the bubble grid.
//!
//! Toggle with the 'D' key. Shows:
//! - Outlines of every grid cell
//! - Anchored cells highlighted, the top row in a different color
//! - Where each flying bubble would land if it hit something now

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    bubble::{draw_outline, hexagon_corners},
    grid::Grid,
    hex::GridCoord,
    projectile::FlyingBubbles,
};
use crate::{AppSystems, config::GameConfig};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugOverlay>();

    app.add_systems(
        Update,
        toggle_overlay
            .run_if(input_just_pressed(KeyCode::KeyD))
            .in_set(AppSystems::RecordInput),
    );

    app.add_systems(
        Update,
        draw_debug_grid
            .run_if(overlay_enabled)
            .in_set(AppSystems::Update),
    );

    // Always draw the playfield walls.
    app.add_systems(Update, draw_walls.in_set(AppSystems::Update));
}

/// Whether the cell overlay is drawn. Off at startup.
#[derive(Resource, Debug, Default)]
pub struct DebugOverlay {
    pub enabled: bool,
}

fn overlay_enabled(overlay: Res<DebugOverlay>) -> bool {
    overlay.enabled
}

fn toggle_overlay(mut overlay: ResMut<DebugOverlay>) {
    overlay.enabled = !overlay.enabled;
    debug!("Grid overlay enabled: {}", overlay.enabled);
}

fn draw_debug_grid(
    mut gizmos: Gizmos,
    grid: Res<Grid>,
    flying: Res<FlyingBubbles>,
    config: Res<GameConfig>,
) {
    let anchored = grid.anchored_cells();
    let radius = grid.bubble_size() / 2.0;

    for row in 0..grid.grid_height() as i32 {
        for col in 0..grid.grid_width() as i32 {
            let coord = GridCoord::new(row, col);
            let color = if anchored.contains(&coord) {
                css::LIMEGREEN.with_alpha(0.6)
            } else if grid.is_occupied(coord) {
                // Occupied but unanchored should never survive a resolve step.
                css::INDIAN_RED.with_alpha(0.8)
            } else if row == 0 {
                css::GOLD.with_alpha(0.3)
            } else {
                css::WHITE.with_alpha(0.15)
            };
            let corners = hexagon_corners(grid.grid_coord_to_pixel(coord), radius);
            draw_outline(&mut gizmos, &corners, &config, color.into());
        }
    }

    for bubble in &flying.0 {
        if let Some(target) = grid.check_collision(bubble) {
            let corners = hexagon_corners(grid.grid_coord_to_pixel(target), radius);
            draw_outline(&mut gizmos, &corners, &config, css::AQUA.into());
        }
    }
}

/// Draw the playfield edges.
fn draw_walls(mut gizmos: Gizmos, config: Res<GameConfig>) {
    let wall_color = css::ORANGE.with_alpha(0.8);
    let size = config.playfield_size();
    let corners = [
        Vec2::ZERO,
        Vec2::new(size.x, 0.0),
        size,
        Vec2::new(0.0, size.y),
    ];
    for i in 0..corners.len() {
        let next = (i + 1) % corners.len();
        gizmos.line_2d(
            config.to_world(corners[i]),
            config.to_world(corners[next]),
            wall_color,
        );
    }
}
