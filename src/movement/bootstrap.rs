//! Movement domain: player bootstrap from the loaded tuning.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::systems::MotionFeedback;
use crate::movement::{CharacterMotion, GameLayer, GroundSensor, MotionTuning, Player};

const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
const PLAYER_SPAWN: Vec3 = Vec3::new(0.0, -120.0, 0.0);

/// Spawn the player. Invalid tuning is a fatal configuration error.
pub(crate) fn spawn_player(
    mut commands: Commands,
    tuning: Res<MotionTuning>,
    existing_player: Query<Entity, With<Player>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let motion = match CharacterMotion::new(tuning.clone()) {
        Ok(motion) => motion,
        Err(e) => {
            error!("Invalid motion tuning, refusing to spawn player: {}", e);
            app_exit.write(AppExit::error());
            return;
        }
    };

    let sensor = GroundSensor::new(
        Vec2::new(0.0, -PLAYER_SIZE.y * 0.5),
        tuning.foot_width,
        tuning.ground_ray_depth,
    );

    info!(
        "Spawning player: move_speed={}, max_jump_force={}, jump_time_limit={}, coyote_time={}",
        tuning.move_speed, tuning.max_jump_force, tuning.jump_time_limit, tuning.coyote_time
    );

    commands.spawn((
        // Identity & Movement
        (Player, motion, sensor, MotionFeedback::default()),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(1.0),
            Friction::new(0.0),
            CollisionEventsEnabled,
            CollisionLayers::new(
                GameLayer::Player,
                [GameLayer::Ground, GameLayer::Wall, GameLayer::Sensor],
            ),
        ),
    ));
}
