//! The main game module for the bubble shooter.
//!
//! This module contains all the gameplay logic including:
//! - Offset hexagonal grid coordinates
//! - Bubble colors, states and motion
//! - The bubble grid: placement, collision, matching, detachment
//! - Shooter aiming and launching
//! - Flying and falling bubbles
//!
//! Simulation runs in `FixedUpdate`, one tick per step, in the order of
//! [`SimulationSystems`].

mod bubble;
mod cluster;
mod debug;
mod falling;
mod grid;
mod hex;
mod projectile;
mod shooter;

use bevy::prelude::*;

use crate::PausableSystems;

pub use hex::ROW_OVERLAP;

pub(super) fn plugin(app: &mut App) {
    app.configure_sets(
        FixedUpdate,
        (
            SimulationSystems::Advance,
            SimulationSystems::Collide,
            SimulationSystems::Resolve,
            SimulationSystems::Cleanup,
        )
            .chain()
            .in_set(PausableSystems),
    );

    app.add_plugins((
        hex::plugin,
        bubble::plugin,
        grid::plugin,
        shooter::plugin,
        projectile::plugin,
        cluster::plugin,
        falling::plugin,
        debug::plugin,
    ));
}

/// The phases of one simulation tick.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSystems {
    /// Move every bubble by its velocity.
    Advance,
    /// Bounce off walls and stick colliding bubbles into the grid.
    Collide,
    /// Pop matches and drop unanchored bubbles.
    Resolve,
    /// Forget bubbles that fell off screen.
    Cleanup,
}
