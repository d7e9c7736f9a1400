//! Movement domain: charge handling and the per-tick velocity resolution.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{CharacterMotion, JumpReleasedEvent, MovementInput, Player};

pub(crate) fn drive_jump_charge(
    time: Res<Time>,
    mut input: ResMut<MovementInput>,
    mut jump_events: MessageWriter<JumpReleasedEvent>,
    mut query: Query<(Entity, &mut CharacterMotion), With<Player>>,
) {
    let now = time.elapsed_secs();
    let pressed = std::mem::take(&mut input.jump_just_pressed);

    for (entity, mut motion) in &mut query {
        let release = if motion.is_charging() {
            !input.jump_held
        } else if pressed && motion.begin_charge(now, input.axis) {
            // Pressed and let go between two ticks: fire a zero-hold hop
            !input.jump_held
        } else {
            false
        };

        if !release {
            continue;
        }

        if let Some(launch) = motion.release(now) {
            jump_events.write(JumpReleasedEvent {
                entity,
                normalized_hold: launch.normalized_hold,
            });
        }
    }
}

/// Single writer of the physics velocity for every character.
pub(crate) fn integrate_motion(
    time: Res<Time>,
    input: Res<MovementInput>,
    mut query: Query<(
        &mut CharacterMotion,
        &mut LinearVelocity,
        &mut GravityScale,
        Has<Player>,
    )>,
) {
    let now = time.elapsed_secs();

    for (mut motion, mut velocity, mut gravity_scale, is_player) in &mut query {
        let axis = if is_player { input.axis } else { 0.0 };
        velocity.0 = motion.integrate(now, axis);
        gravity_scale.0 = motion.gravity_scale();
    }
}
