//! Match resolution - popping same-color groups and dropping what they held up.
//!
//! Runs once per landed bubble. The grid does the flood fills; this module
//! only decides when to call them, hands dropped bubbles to the falling
//! list, and announces what happened.

use bevy::prelude::*;

use super::{
    SimulationSystems,
    bubble::BubbleColor,
    falling::FallingBubbles,
    grid::{Grid, MIN_MATCH_SIZE},
    hex::GridCoord,
    projectile::BubbleLanded,
};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<ClusterPopped>();
    app.add_message::<FloatingBubblesRemoved>();

    app.add_systems(
        FixedUpdate,
        (resolve_matches, report_pops)
            .chain()
            .in_set(SimulationSystems::Resolve),
    );
}

/// A same-color group of at least [`MIN_MATCH_SIZE`] bubbles was popped.
#[derive(Message, Debug, Clone)]
pub struct ClusterPopped {
    /// Popped cells in row-major order.
    pub coords: Vec<GridCoord>,
    pub color: BubbleColor,
    pub count: usize,
}

/// Bubbles cut off from the top row by a pop were dropped from the grid.
#[derive(Message, Debug, Clone)]
pub struct FloatingBubblesRemoved {
    pub count: usize,
}

/// Pop the group around each freshly landed bubble.
fn resolve_matches(
    mut grid: ResMut<Grid>,
    mut falling: ResMut<FallingBubbles>,
    mut landed_events: MessageReader<BubbleLanded>,
    mut popped_events: MessageWriter<ClusterPopped>,
    mut floating_events: MessageWriter<FloatingBubblesRemoved>,
) {
    let mut rng = rand::rng();

    for event in landed_events.read() {
        let matches = grid.check_matches(event.coord);
        if matches.len() < MIN_MATCH_SIZE {
            debug!(
                "Only {} {:?} bubble(s) connected at {}, nothing pops",
                matches.len(),
                event.color,
                event.coord
            );
            continue;
        }

        let dropped = grid.remove_matches(&matches, &mut rng);

        let mut coords: Vec<GridCoord> = matches.into_iter().collect();
        coords.sort();
        popped_events.write(ClusterPopped {
            count: coords.len(),
            coords,
            color: event.color,
        });

        if !dropped.is_empty() {
            floating_events.write(FloatingBubblesRemoved {
                count: dropped.len(),
            });
            falling.0.extend(dropped);
        }
    }
}

fn report_pops(
    grid: Res<Grid>,
    mut popped_events: MessageReader<ClusterPopped>,
    mut floating_events: MessageReader<FloatingBubblesRemoved>,
) {
    let mut popped_any = false;
    for event in popped_events.read() {
        popped_any = true;
        info!(
            "Popped {} {:?} bubbles: {:?}",
            event.count, event.color, event.coords
        );
    }
    for event in floating_events.read() {
        info!("{} bubbles lost their anchor and fall", event.count);
    }

    if popped_any {
        if grid.is_empty() {
            info!("Grid cleared!");
        } else {
            debug!("{} bubbles remain", grid.len());
        }
    }
}
