//! The shooter at the bottom of the playfield.
//!
//! The player aims with the mouse and fires bubbles upward. The shooter
//! always holds a loaded bubble and a preview of the next one.

use bevy::{prelude::*, window::PrimaryWindow};
use rand::Rng;

use super::{
    bubble::{Bubble, BubbleState},
    projectile::FlyingBubbles,
};
use crate::{AppSystems, PausableSystems, config::GameConfig};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Shooter>();
    app.init_resource::<Shooter>();

    app.add_systems(
        Update,
        (aim_shooter, handle_fire_input)
            .chain()
            .in_set(AppSystems::RecordInput)
            .in_set(PausableSystems),
    );
    app.add_systems(Update, draw_shooter.in_set(AppSystems::Update));
}

/// Shallowest allowed aim, in degrees above the horizontal.
pub const MIN_AIM_ANGLE: f32 = 30.0;

/// Steepest allowed aim to the left, in degrees.
pub const MAX_AIM_ANGLE: f32 = 150.0;

const BASE_COLOR: Color = Color::srgb(100.0 / 255.0, 100.0 / 255.0, 100.0 / 255.0);
const BARREL_COLOR: Color = Color::srgb(150.0 / 255.0, 150.0 / 255.0, 150.0 / 255.0);

/// The launcher and its two queued bubbles.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct Shooter {
    origin: Vec2,
    /// Degrees counter-clockwise from the +x axis, measured with up positive.
    angle: f32,
    /// Pixels per tick.
    speed: f32,
    bubble_size: f32,
    current: Bubble,
    next: Bubble,
}

impl FromWorld for Shooter {
    fn from_world(world: &mut World) -> Self {
        let config = world.get_resource_or_init::<GameConfig>();
        Self::new(
            config.shooter_origin(),
            config.bubble_size_px(),
            config.shoot_speed,
            &mut rand::rng(),
        )
    }
}

impl Shooter {
    pub fn new(origin: Vec2, bubble_size: f32, speed: f32, rng: &mut impl Rng) -> Self {
        let preview = preview_position(origin, bubble_size);
        Self {
            origin,
            angle: 90.0,
            speed,
            bubble_size,
            current: Bubble::random(origin, bubble_size, rng),
            next: Bubble::random(preview, bubble_size, rng),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// The bubble waiting to be launched.
    pub fn current_bubble(&self) -> &Bubble {
        &self.current
    }

    /// The preview bubble that is loaded after the next shot.
    pub fn next_bubble(&self) -> &Bubble {
        &self.next
    }

    /// Aim at a playfield position.
    ///
    /// The angle is clamped to [`MIN_AIM_ANGLE`]..=[`MAX_AIM_ANGLE`], so the
    /// shooter never points into the lower half-plane.
    pub fn update(&mut self, target: Vec2) {
        let dx = target.x - self.origin.x;
        let dy = self.origin.y - target.y;
        self.angle = dy
            .atan2(dx)
            .to_degrees()
            .clamp(MIN_AIM_ANGLE, MAX_AIM_ANGLE);

        if self.current.state() == BubbleState::Fixed {
            self.current.position = self.origin;
        }
    }

    /// Velocity a bubble launched right now would get.
    pub fn launch_velocity(&self) -> Vec2 {
        let angle = self.angle.to_radians();
        // Playfield y grows downward.
        self.speed * Vec2::new(angle.cos(), -angle.sin())
    }

    /// Launch the loaded bubble.
    ///
    /// The preview bubble moves up into the loaded slot and a fresh preview is
    /// created. Returns the launched bubble, now owned by the caller.
    pub fn shoot(&mut self, rng: &mut impl Rng) -> Option<Bubble> {
        if self.current.state() != BubbleState::Fixed {
            return None;
        }

        let velocity = self.launch_velocity();
        let preview = Bubble::random(
            preview_position(self.origin, self.bubble_size),
            self.bubble_size,
            rng,
        );
        let mut loaded = std::mem::replace(&mut self.next, preview);
        loaded.position = self.origin;

        let mut launched = std::mem::replace(&mut self.current, loaded);
        launched.set_velocity(velocity);
        Some(launched)
    }

    /// End of the barrel in playfield pixels.
    pub fn barrel_end(&self) -> Vec2 {
        let angle = self.angle.to_radians();
        self.origin + self.bubble_size * Vec2::new(angle.cos(), -angle.sin())
    }

    pub fn draw(&self, gizmos: &mut Gizmos, config: &GameConfig) {
        let origin = config.to_world(self.origin);
        gizmos.circle_2d(
            Isometry2d::from_translation(origin),
            self.bubble_size / 2.0,
            BASE_COLOR,
        );
        gizmos.line_2d(origin, config.to_world(self.barrel_end()), BARREL_COLOR);

        if self.current.state() == BubbleState::Fixed {
            self.current.draw(gizmos, config);
        }
        self.next.draw(gizmos, config);
    }
}

/// Where the preview bubble sits, two bubbles right of the shooter.
fn preview_position(origin: Vec2, bubble_size: f32) -> Vec2 {
    origin + Vec2::new(bubble_size * 2.0, 0.0)
}

/// Point the shooter at the mouse cursor.
fn aim_shooter(
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut shooter: ResMut<Shooter>,
    config: Res<GameConfig>,
) {
    let Ok(window) = window_query.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    let Some(cursor_pos) = window
        .cursor_position()
        .and_then(|p| camera.viewport_to_world_2d(camera_transform, p).ok())
    else {
        return;
    };

    shooter.update(config.to_playfield(cursor_pos));
}

/// Fire on mouse click or spacebar.
fn handle_fire_input(
    mouse_input: Res<ButtonInput<MouseButton>>,
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut shooter: ResMut<Shooter>,
    mut flying: ResMut<FlyingBubbles>,
) {
    let fire_pressed =
        mouse_input.just_pressed(MouseButton::Left) || keyboard_input.just_pressed(KeyCode::Space);
    if !fire_pressed {
        return;
    }

    let Some(bubble) = shooter.shoot(&mut rand::rng()) else {
        return;
    };
    info!(
        "Fired {:?} bubble at {:.0} degrees, loaded {:?}, next {:?}",
        bubble.color,
        shooter.angle(),
        shooter.current_bubble().color,
        shooter.next_bubble().color
    );
    flying.0.push(bubble);
}

fn draw_shooter(mut gizmos: Gizmos, shooter: Res<Shooter>, config: Res<GameConfig>) {
    shooter.draw(&mut gizmos, &config);
}
