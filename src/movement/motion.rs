//! Movement domain: the per-character motion state machine.
//!
//! All timing is expressed as deadlines on the fixed simulation clock, so a
//! pending timer is just a timestamp that the next comparison supersedes.

use bevy::prelude::*;

use crate::movement::{ChargeState, Facing, GroundState, MotionTuning, TuningError};

/// Velocity and timing state owned by one character.
///
/// `velocity` is only ever submitted to the physics engine by
/// [`CharacterMotion::integrate`]; everything else mutates this state and lets
/// the next integration step resolve the final command.
#[derive(Component, Debug, Clone)]
pub struct CharacterMotion {
    pub(crate) tuning: MotionTuning,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) submitted_velocity: Vec2,
    pub(crate) facing: Facing,
    pub(crate) ground_state: GroundState,
    pub(crate) charge_state: ChargeState,
    pub(crate) hold_start_time: f32,
    pub(crate) last_normalized_hold: f32,
    pub(crate) airborne_horizontal_velocity: f32,
    pub(crate) takeoff_lock_until: f32,
    pub(crate) ground_sensor_suppress_until: f32,
    pub(crate) fatigue_end_time: f32,
    pub(crate) air_control_until: f32,
    pub(crate) last_grounded_time: Option<f32>,
    pub(crate) last_jump_time: Option<f32>,
    pub(crate) jump_start_horizontal_velocity: f32,
    pub(crate) gravity_scale: f32,
}

/// Result of a released charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpLaunch {
    pub velocity: Vec2,
    pub normalized_hold: f32,
}

/// Ground-state change produced by a sensor reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroundTransition {
    None,
    Landed,
    LeftGround,
    CoyoteExpired,
}

impl CharacterMotion {
    /// Build the state for a freshly spawned character.
    ///
    /// Characters start airborne and latch onto the ground on the first
    /// sensor reading or ground contact.
    pub fn new(tuning: MotionTuning) -> Result<Self, TuningError> {
        tuning.validate()?;

        Ok(Self {
            tuning,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            submitted_velocity: Vec2::ZERO,
            facing: Facing::Right,
            ground_state: GroundState::Airborne,
            charge_state: ChargeState::NotCharging,
            hold_start_time: 0.0,
            last_normalized_hold: 0.0,
            airborne_horizontal_velocity: 0.0,
            takeoff_lock_until: f32::NEG_INFINITY,
            ground_sensor_suppress_until: f32::NEG_INFINITY,
            fatigue_end_time: f32::NEG_INFINITY,
            air_control_until: f32::NEG_INFINITY,
            last_grounded_time: None,
            last_jump_time: None,
            jump_start_horizontal_velocity: 0.0,
            gravity_scale: 1.0,
        })
    }

    pub fn tuning(&self) -> &MotionTuning {
        &self.tuning
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn ground_state(&self) -> GroundState {
        self.ground_state
    }

    pub fn charge_state(&self) -> ChargeState {
        self.charge_state
    }

    pub fn is_charging(&self) -> bool {
        self.charge_state == ChargeState::Charging
    }

    pub fn airborne_horizontal_velocity(&self) -> f32 {
        self.airborne_horizontal_velocity
    }

    /// Effective gravity multiplier, read by trajectory previews.
    pub fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    pub fn is_takeoff_locked(&self, now: f32) -> bool {
        now < self.takeoff_lock_until
    }

    pub fn is_sensor_suppressed(&self, now: f32) -> bool {
        now < self.ground_sensor_suppress_until
    }

    // -------------------------------------------------------------------------
    // Fatigue
    // -------------------------------------------------------------------------

    pub fn is_fatigued(&self, now: f32) -> bool {
        now < self.fatigue_end_time
    }

    /// Seconds of fatigue left, for the fatigue indicator.
    pub fn fatigue_remaining(&self, now: f32) -> f32 {
        (self.fatigue_end_time - now).max(0.0)
    }

    fn speed_scale(&self, now: f32) -> f32 {
        self.tuning.speed_scale(self.is_fatigued(now))
    }

    // -------------------------------------------------------------------------
    // Charge state machine
    // -------------------------------------------------------------------------

    /// Whether a charge may start now, honoring coyote time and fatigue.
    pub fn can_begin_charge(&self, now: f32) -> bool {
        if self.is_charging() || self.is_fatigued(now) {
            return false;
        }

        self.ground_state == GroundState::Grounded
            || self
                .last_grounded_time
                .is_some_and(|t| now - t <= self.tuning.coyote_time)
    }

    /// Start winding up a jump. A nonzero `axis` turns the character first.
    pub fn begin_charge(&mut self, now: f32, axis: f32) -> bool {
        if !self.can_begin_charge(now) {
            return false;
        }

        if let Some(facing) = Facing::from_sign(axis) {
            self.facing = facing;
        }
        self.hold_start_time = now;
        self.charge_state = ChargeState::Charging;
        debug!("Charge begun: t={:.3}, facing={:?}", now, self.facing);
        true
    }

    /// Hold progress in `[0, 1]`, or `None` when not charging.
    pub fn tick_charge(&self, now: f32) -> Option<f32> {
        self.is_charging().then(|| self.normalized_hold(now))
    }

    fn normalized_hold(&self, now: f32) -> f32 {
        ((now - self.hold_start_time) / self.tuning.jump_time_limit).clamp(0.0, 1.0)
    }

    fn takeoff_velocity(&self, now: f32, normalized_hold: f32) -> Vec2 {
        Vec2::new(
            self.facing.sign() * self.tuning.move_speed * self.speed_scale(now),
            normalized_hold * self.tuning.max_jump_force,
        )
    }

    /// Fire the charged jump. A zero-length hold still produces a hop.
    pub fn release(&mut self, now: f32) -> Option<JumpLaunch> {
        if !self.is_charging() {
            return None;
        }

        let normalized_hold = self.normalized_hold(now);
        let velocity = self.takeoff_velocity(now, normalized_hold);

        self.airborne_horizontal_velocity = velocity.x;
        self.velocity = velocity;
        self.jump_start_horizontal_velocity = velocity.x;
        self.last_normalized_hold = normalized_hold;
        self.last_jump_time = Some(now);
        self.takeoff_lock_until = now + self.tuning.takeoff_lock_time;
        self.ground_sensor_suppress_until = now + self.tuning.takeoff_lock_time;
        self.ground_state = GroundState::Airborne;
        self.charge_state = ChargeState::NotCharging;
        self.fatigue_end_time = now + self.tuning.fatigue_duration;
        // A jump consumes any remaining coyote time
        self.last_grounded_time = None;

        debug!(
            "Jump released: t={:.3}, hold={:.2}, velocity={:?}",
            now, normalized_hold, velocity
        );

        Some(JumpLaunch {
            velocity,
            normalized_hold,
        })
    }

    /// Velocity a release right now would produce, for trajectory previews.
    pub fn predicted_jump_velocity(&self, now: f32) -> Option<Vec2> {
        self.tick_charge(now).map(|hold| self.takeoff_velocity(now, hold))
    }

    // -------------------------------------------------------------------------
    // Ground state
    // -------------------------------------------------------------------------

    /// Pull in what the physics step did since the last command.
    ///
    /// Only the vertical component is taken over; horizontal velocity is
    /// always re-resolved by [`CharacterMotion::integrate`].
    pub fn observe_physics(&mut self, position: Vec2, velocity: Vec2) {
        self.position = position;
        self.velocity.y = velocity.y;
    }

    /// Apply a ground sensor reading.
    pub fn apply_ground_sense(&mut self, now: f32, grounded: bool) -> GroundTransition {
        if self.is_takeoff_locked(now) {
            return GroundTransition::None;
        }

        if grounded {
            self.last_grounded_time = Some(now);
            if self.ground_state != GroundState::Grounded {
                self.land(now);
                return GroundTransition::Landed;
            }
            return GroundTransition::None;
        }

        match self.ground_state {
            GroundState::Grounded => {
                // Walking off a ledge is a takeoff too
                self.ground_state = GroundState::CoyoteWindow;
                self.airborne_horizontal_velocity = self.velocity.x;
                GroundTransition::LeftGround
            }
            GroundState::CoyoteWindow => {
                let expired = self
                    .last_grounded_time
                    .is_none_or(|t| now - t > self.tuning.coyote_time);
                if expired {
                    self.ground_state = GroundState::Airborne;
                    GroundTransition::CoyoteExpired
                } else {
                    GroundTransition::None
                }
            }
            GroundState::Airborne => GroundTransition::None,
        }
    }

    pub(crate) fn land(&mut self, now: f32) {
        self.ground_state = GroundState::Grounded;
        self.charge_state = ChargeState::NotCharging;
        self.airborne_horizontal_velocity = 0.0;
        self.air_control_until = f32::NEG_INFINITY;
        self.last_grounded_time = Some(now);
        debug!("Landed: t={:.3}, position={:?}", now, self.position);
    }

    // -------------------------------------------------------------------------
    // Integration
    // -------------------------------------------------------------------------

    /// Resolve this tick's horizontal velocity and return the command for the
    /// physics engine.
    ///
    /// Order matters: charging freezes, airborne locks, grounded follows input.
    pub fn integrate(&mut self, now: f32, input_axis: f32) -> Vec2 {
        let axis = input_axis.clamp(-1.0, 1.0);
        let speed = self.tuning.move_speed * self.speed_scale(now);

        self.velocity.x = if self.is_charging() {
            0.0
        } else if self.ground_state != GroundState::Grounded {
            if now < self.air_control_until && axis != 0.0 {
                self.airborne_horizontal_velocity = axis * speed;
            }
            self.airborne_horizontal_velocity
        } else {
            axis * speed
        };

        if self.ground_state == GroundState::Grounded && !self.is_takeoff_locked(now) {
            if let Some(facing) = Facing::from_sign(self.velocity.x) {
                self.facing = facing;
            }
        }

        self.submitted_velocity = self.velocity;
        self.velocity
    }
}
