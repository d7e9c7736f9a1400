//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Static per-character tuning, supplied when the character is spawned.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Grounded run speed and takeoff horizontal speed.
    pub move_speed: f32,
    /// Vertical launch velocity of a fully charged jump.
    pub max_jump_force: f32,
    /// Hold duration that yields a full charge.
    pub jump_time_limit: f32,
    pub coyote_time: f32,
    /// Share of the original jump force returned by a wall bounce.
    pub wall_bounce_fraction: f32,
    /// Bounce multiplier applied outside the exclusion window.
    pub damping: f32,
    /// Bounces this soon after takeoff are not damped.
    pub damping_exclusion_time: f32,
    pub fatigue_duration: f32,
    pub fatigue_speed_multiplier: f32,
    /// Ground sensing is suppressed this long after a jump or launch.
    pub takeoff_lock_time: f32,
    /// Refreshed lock after a wall bounce; never longer than the takeoff lock.
    pub bounce_lock_time: f32,
    pub ground_ray_depth: f32,
    pub foot_width: f32,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            move_speed: 220.0,
            max_jump_force: 900.0,
            jump_time_limit: 0.6,
            coyote_time: 0.1,
            wall_bounce_fraction: 0.33,
            damping: 0.5,
            damping_exclusion_time: 0.2,
            fatigue_duration: 0.35,
            fatigue_speed_multiplier: 0.5,
            takeoff_lock_time: 0.15,
            bounce_lock_time: 0.08,
            ground_ray_depth: 4.0,
            foot_width: 20.0,
        }
    }
}

impl MotionTuning {
    /// Reject values that would break the state machine.
    ///
    /// `jump_time_limit` and `coyote_time` divide or bound time windows and
    /// must be strictly positive.
    pub fn validate(&self) -> Result<(), TuningError> {
        require_positive("jump_time_limit", self.jump_time_limit)?;
        require_positive("coyote_time", self.coyote_time)?;

        for (field, value) in [
            ("move_speed", self.move_speed),
            ("max_jump_force", self.max_jump_force),
            ("wall_bounce_fraction", self.wall_bounce_fraction),
            ("damping_exclusion_time", self.damping_exclusion_time),
            ("fatigue_duration", self.fatigue_duration),
            ("takeoff_lock_time", self.takeoff_lock_time),
            ("bounce_lock_time", self.bounce_lock_time),
            ("ground_ray_depth", self.ground_ray_depth),
            ("foot_width", self.foot_width),
        ] {
            require_non_negative(field, value)?;
        }

        require_unit("damping", self.damping)?;
        require_unit("fatigue_speed_multiplier", self.fatigue_speed_multiplier)?;

        if self.bounce_lock_time > self.takeoff_lock_time {
            return Err(TuningError::BounceLockTooLong {
                bounce_lock_time: self.bounce_lock_time,
                takeoff_lock_time: self.takeoff_lock_time,
            });
        }

        Ok(())
    }

    /// Horizontal speed multiplier for the current fatigue status.
    pub fn speed_scale(&self, fatigued: bool) -> f32 {
        if fatigued {
            self.fatigue_speed_multiplier
        } else {
            1.0
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    // Written so NaN fails too
    if !(value > 0.0) || !value.is_finite() {
        return Err(TuningError::NotPositive { field, value });
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !(value >= 0.0) || !value.is_finite() {
        return Err(TuningError::Negative { field, value });
    }
    Ok(())
}

fn require_unit(field: &'static str, value: f32) -> Result<(), TuningError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TuningError::OutOfUnitRange { field, value });
    }
    Ok(())
}

/// Error type for invalid tuning values.
#[derive(Debug, Clone, PartialEq)]
pub enum TuningError {
    NotPositive {
        field: &'static str,
        value: f32,
    },
    Negative {
        field: &'static str,
        value: f32,
    },
    OutOfUnitRange {
        field: &'static str,
        value: f32,
    },
    BounceLockTooLong {
        bounce_lock_time: f32,
        takeoff_lock_time: f32,
    },
}

impl std::fmt::Display for TuningError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TuningError::NotPositive { field, value } => {
                write!(f, "{} must be finite and greater than zero, got {}", field, value)
            }
            TuningError::Negative { field, value } => {
                write!(f, "{} must be a finite non-negative number, got {}", field, value)
            }
            TuningError::OutOfUnitRange { field, value } => {
                write!(f, "{} must be within [0, 1], got {}", field, value)
            }
            TuningError::BounceLockTooLong {
                bounce_lock_time,
                takeoff_lock_time,
            } => write!(
                f,
                "bounce_lock_time ({}) must not exceed takeoff_lock_time ({})",
                bounce_lock_time, takeoff_lock_time
            ),
        }
    }
}

impl std::error::Error for TuningError {}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// Horizontal input in `[-1, 1]`.
    pub axis: f32,
    /// Latched until the next fixed tick consumes it.
    pub jump_just_pressed: bool,
    pub jump_held: bool,
}
