//! Movement domain: reactions to wall, ceiling and ground contacts.

use bevy::prelude::*;

use crate::movement::{CharacterMotion, ChargeState, Facing, GroundState};

/// Walls are surfaces whose normal is this close to horizontal.
const WALL_NORMAL_THRESHOLD: f32 = 0.9;
/// Floors and ceilings need at least this much vertical normal.
const FLAT_NORMAL_THRESHOLD: f32 = 0.5;

/// A collision contact reported by the physics engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceContact {
    /// Contact normal pointing from the surface towards the character.
    pub normal: Vec2,
    pub point_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    Ground,
    Wall,
    Ceiling,
}

impl SurfaceContact {
    pub fn new(normal: Vec2, point_count: usize) -> Self {
        Self {
            normal,
            point_count,
        }
    }

    /// Classify the touched surface, or `None` for slopes we don't react to.
    pub fn kind(&self) -> Option<SurfaceKind> {
        if self.normal.x.abs() > WALL_NORMAL_THRESHOLD {
            Some(SurfaceKind::Wall)
        } else if self.normal.y >= FLAT_NORMAL_THRESHOLD {
            Some(SurfaceKind::Ground)
        } else if self.normal.y <= -FLAT_NORMAL_THRESHOLD {
            Some(SurfaceKind::Ceiling)
        } else {
            None
        }
    }
}

/// What a contact did to the character.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactReaction {
    Ignored,
    Landed,
    WallBounce { horizontal_velocity: f32, damped: bool },
    CeilingBounce { vertical_velocity: f32 },
}

impl CharacterMotion {
    /// React to a collision contact. Runs between fixed ticks, before the
    /// next integration step picks up the result.
    pub fn react_to_contact(&mut self, now: f32, contact: SurfaceContact) -> ContactReaction {
        if contact.point_count == 0 {
            return ContactReaction::Ignored;
        }

        let Some(kind) = contact.kind() else {
            return ContactReaction::Ignored;
        };

        match kind {
            SurfaceKind::Ground => {
                if self.ground_state == GroundState::Grounded || self.is_takeoff_locked(now) {
                    return ContactReaction::Ignored;
                }
                self.land(now);
                ContactReaction::Landed
            }
            SurfaceKind::Wall if self.ground_state == GroundState::Airborne => {
                self.wall_bounce(now, contact)
            }
            SurfaceKind::Ceiling if self.ground_state == GroundState::Airborne => {
                // The solver has already cancelled the upward speed, so reflect
                // what was last submitted.
                let vertical_velocity = -self.submitted_velocity.y.abs();
                self.velocity.y = vertical_velocity;
                debug!(
                    "Ceiling bounce: t={:.3}, vertical_velocity={:.1}",
                    now, vertical_velocity
                );
                ContactReaction::CeilingBounce { vertical_velocity }
            }
            _ => ContactReaction::Ignored,
        }
    }

    fn wall_bounce(&mut self, now: f32, contact: SurfaceContact) -> ContactReaction {
        let tuning = &self.tuning;
        let jump_force = self.last_normalized_hold * tuning.max_jump_force;
        let since_jump = self.last_jump_time.map_or(f32::INFINITY, |t| now - t);
        let damped = since_jump >= tuning.damping_exclusion_time;
        let damping_factor = if damped { tuning.damping } else { 1.0 };

        // Always reflected away from the wall that was hit, whichever way the
        // character faces or the original jump went.
        let bounce_speed = jump_force * tuning.wall_bounce_fraction * damping_factor;
        let horizontal_velocity = contact.normal.x.signum() * bounce_speed;
        let bounce_lock = now + tuning.bounce_lock_time;

        self.airborne_horizontal_velocity = horizontal_velocity;
        self.velocity.x = horizontal_velocity;
        if let Some(facing) = Facing::from_sign(horizontal_velocity) {
            self.facing = facing;
        }
        self.takeoff_lock_until = bounce_lock;
        self.ground_sensor_suppress_until = bounce_lock;
        self.charge_state = ChargeState::NotCharging;

        debug!(
            "Wall bounce: t={:.3}, horizontal_velocity={:.1}, damped={}, takeoff_vx={:.1}",
            now, horizontal_velocity, damped, self.jump_start_horizontal_velocity
        );

        ContactReaction::WallBounce {
            horizontal_velocity,
            damped,
        }
    }
}
