//! Movement domain: the gateway wind zones, pistons and springs use to push
//! characters around without fighting the airborne velocity lock.
//!
//! Collaborators queue [`ImpulseCommand`]s through [`ImpulseGateway`]; the
//! fixed tick applies them in issue order right before integration, so deltas
//! accumulate and the last launch of a tick wins.

use bevy::ecs::message::{Message, MessageReader, MessageWriter};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::movement::{CharacterMotion, ChargeState, GroundState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImpulseKind {
    /// Nudge the locked airborne horizontal velocity.
    VelocityDelta { dvx: f32 },
    /// Launch along `direction`, optionally discarding the velocity already
    /// moving along it.
    Launch {
        direction: Vec2,
        force: f32,
        reset_along_axis: bool,
    },
    CancelCharge,
    /// Let player input steer the airborne velocity for a while.
    AirControl { duration: f32 },
    GravityScale { scale: f32 },
}

#[derive(Debug, Clone, Copy)]
pub struct ImpulseCommand {
    pub target: Entity,
    pub kind: ImpulseKind,
}

impl Message for ImpulseCommand {}

/// System parameter handed to force injectors.
#[derive(SystemParam)]
pub struct ImpulseGateway<'w> {
    commands: MessageWriter<'w, ImpulseCommand>,
}

impl ImpulseGateway<'_> {
    pub fn add_velocity_delta(&mut self, target: Entity, dvx: f32) {
        self.send(target, ImpulseKind::VelocityDelta { dvx });
    }

    pub fn force_launch(
        &mut self,
        target: Entity,
        direction: Vec2,
        force: f32,
        reset_along_axis: bool,
    ) {
        self.send(
            target,
            ImpulseKind::Launch {
                direction,
                force,
                reset_along_axis,
            },
        );
    }

    pub fn cancel_jump_charge(&mut self, target: Entity) {
        self.send(target, ImpulseKind::CancelCharge);
    }

    pub fn allow_air_control_for(&mut self, target: Entity, duration: f32) {
        self.send(target, ImpulseKind::AirControl { duration });
    }

    pub fn set_gravity_scale(&mut self, target: Entity, scale: f32) {
        self.send(target, ImpulseKind::GravityScale { scale });
    }

    fn send(&mut self, target: Entity, kind: ImpulseKind) {
        self.commands.write(ImpulseCommand { target, kind });
    }
}

impl CharacterMotion {
    /// Add to the locked airborne horizontal velocity (continuous wind).
    pub fn add_velocity_delta(&mut self, dvx: f32) {
        self.airborne_horizontal_velocity += dvx;
    }

    /// Knock the character along `direction`. Cancels any charge and puts the
    /// character airborne under a takeoff lock so the ground sensor does not
    /// re-latch before the bodies separate.
    ///
    /// Returns the new velocity, or `None` for a zero direction.
    pub fn force_launch(
        &mut self,
        now: f32,
        direction: Vec2,
        force: f32,
        reset_along_axis: bool,
    ) -> Option<Vec2> {
        let axis = direction.normalize_or_zero();
        if axis == Vec2::ZERO {
            return None;
        }

        let along = axis * self.velocity.dot(axis);
        let orthogonal = self.velocity - along;
        let base = if reset_along_axis {
            orthogonal
        } else {
            self.velocity
        };
        let velocity = base + axis * force;

        self.cancel_jump_charge();
        self.velocity = velocity;
        self.airborne_horizontal_velocity = velocity.x;
        self.ground_state = GroundState::Airborne;
        self.last_grounded_time = None;
        self.takeoff_lock_until = now + self.tuning.takeoff_lock_time;
        self.ground_sensor_suppress_until = now + self.tuning.takeoff_lock_time;

        debug!(
            "Force launch: t={:.3}, direction={:?}, force={:.1}, velocity={:?}",
            now, axis, force, velocity
        );
        Some(velocity)
    }

    /// Drop an in-progress charge without jumping. Returns whether a charge
    /// was actually cancelled.
    pub fn cancel_jump_charge(&mut self) -> bool {
        let was_charging = self.is_charging();
        self.charge_state = ChargeState::NotCharging;
        was_charging
    }

    pub fn allow_air_control_for(&mut self, now: f32, duration: f32) {
        self.air_control_until = self.air_control_until.max(now + duration.max(0.0));
    }

    pub fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    pub fn apply_impulse(&mut self, now: f32, kind: ImpulseKind) {
        match kind {
            ImpulseKind::VelocityDelta { dvx } => self.add_velocity_delta(dvx),
            ImpulseKind::Launch {
                direction,
                force,
                reset_along_axis,
            } => {
                self.force_launch(now, direction, force, reset_along_axis);
            }
            ImpulseKind::CancelCharge => {
                if self.cancel_jump_charge() {
                    debug!("Jump charge cancelled externally: t={:.3}", now);
                }
            }
            ImpulseKind::AirControl { duration } => self.allow_air_control_for(now, duration),
            ImpulseKind::GravityScale { scale } => self.set_gravity_scale(scale),
        }
    }
}

pub(crate) fn apply_impulse_commands(
    time: Res<Time>,
    mut impulses: MessageReader<ImpulseCommand>,
    mut query: Query<&mut CharacterMotion>,
) {
    let now = time.elapsed_secs();

    for command in impulses.read() {
        let Ok(mut motion) = query.get_mut(command.target) else {
            // Target despawned since the command was queued
            continue;
        };
        motion.apply_impulse(now, command.kind);
    }
}
