//! Bubbles that lost their anchor and are dropping out of the playfield.

use bevy::prelude::*;

use super::{SimulationSystems, bubble::Bubble};
use crate::{AppSystems, config::GameConfig};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<FallingBubbles>();

    app.add_systems(
        FixedUpdate,
        advance_falling_bubbles.in_set(SimulationSystems::Advance),
    );
    app.add_systems(
        FixedUpdate,
        cull_fallen_bubbles.in_set(SimulationSystems::Cleanup),
    );
    app.add_systems(Update, draw_falling_bubbles.in_set(AppSystems::Update));
}

/// Detached bubbles, still drawn until they leave the screen.
#[derive(Resource, Debug, Default)]
pub struct FallingBubbles(pub Vec<Bubble>);

impl FallingBubbles {
    /// Forget bubbles whose top edge has passed `floor`.
    ///
    /// Returns how many were removed.
    pub fn cull_below(&mut self, floor: f32) -> usize {
        let before = self.0.len();
        self.0.retain(|bubble| bubble.position.y - bubble.size / 2.0 <= floor);
        before - self.0.len()
    }
}

fn advance_falling_bubbles(mut falling: ResMut<FallingBubbles>) {
    for bubble in &mut falling.0 {
        bubble.update();
    }
}

fn cull_fallen_bubbles(mut falling: ResMut<FallingBubbles>, config: Res<GameConfig>) {
    let culled = falling.cull_below(config.playfield_height as f32);
    if culled > 0 {
        debug!("{} bubbles fell out of the playfield", culled);
    }
}

fn draw_falling_bubbles(
    mut gizmos: Gizmos,
    falling: Res<FallingBubbles>,
    config: Res<GameConfig>,
) {
    for bubble in &falling.0 {
        bubble.draw(&mut gizmos, &config);
    }
}
