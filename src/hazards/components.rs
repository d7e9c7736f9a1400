//! Hazards domain: force injectors and timed platforms.
//!
//! Timed hazards are explicit phase machines driven by the fixed clock; each
//! phase stores the deadline at which it ends.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Characters currently inside a sensor volume.
#[derive(Component, Debug, Default)]
pub struct ZoneOccupants(pub Vec<Entity>);

impl ZoneOccupants {
    pub fn enter(&mut self, entity: Entity) {
        if !self.0.contains(&entity) {
            self.0.push(entity);
        }
    }

    pub fn exit(&mut self, entity: Entity) {
        self.0.retain(|e| *e != entity);
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains(&entity)
    }
}

/// Range and cadence of wind gusts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GustSettings {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Seconds between gust changes.
    pub interval: f32,
}

impl GustSettings {
    pub const STEADY: Self = Self {
        min_scale: 1.0,
        max_scale: 1.0,
        interval: f32::INFINITY,
    };
}

/// Seeded gust strength that changes every `interval` seconds.
#[derive(Debug, Clone)]
pub struct GustPattern {
    rng: ChaCha8Rng,
    min_scale: f32,
    max_scale: f32,
    interval: f32,
    current_scale: f32,
    next_change: f32,
}

impl GustPattern {
    pub fn new(seed: u64, settings: GustSettings) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            min_scale: settings.min_scale.min(settings.max_scale),
            max_scale: settings.min_scale.max(settings.max_scale),
            interval: settings.interval.max(0.0),
            current_scale: 1.0,
            next_change: f32::NEG_INFINITY,
        }
    }

    /// Gust multiplier at `now`, rolling a new one when the interval elapses.
    pub fn sample(&mut self, now: f32) -> f32 {
        if now >= self.next_change {
            self.current_scale = self.rng.random_range(self.min_scale..=self.max_scale);
            self.next_change = now + self.interval;
        }
        self.current_scale
    }
}

/// Continuous sideways push on airborne characters.
#[derive(Component, Debug, Clone)]
#[require(ZoneOccupants)]
pub struct WindZone {
    /// Horizontal acceleration in pixels/s²; the sign is the blow direction.
    pub acceleration: f32,
    pub gusts: GustSettings,
    pattern: Option<GustPattern>,
}

impl WindZone {
    pub fn new(acceleration: f32, gusts: GustSettings) -> Self {
        Self {
            acceleration,
            gusts,
            pattern: None,
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.pattern.is_some()
    }

    pub fn seed(&mut self, seed: u64) {
        self.pattern = Some(GustPattern::new(seed, self.gusts));
    }

    /// Velocity delta for one tick of `dt` seconds. Unseeded zones blow steady.
    pub fn delta(&mut self, now: f32, dt: f32) -> f32 {
        let scale = self
            .pattern
            .as_mut()
            .map_or(1.0, |pattern| pattern.sample(now));
        self.acceleration * scale * dt
    }
}

/// Spring or bounce mushroom: launches a character on contact.
#[derive(Component, Debug, Clone)]
pub struct Spring {
    pub direction: Vec2,
    pub force: f32,
    /// Air control granted after the launch (bounce platforms).
    pub air_control: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PistonPhase {
    Idle,
    Extending,
    Cooldown,
}

/// Periodically launches everything standing in front of it.
#[derive(Component, Debug, Clone)]
#[require(ZoneOccupants)]
pub struct Piston {
    pub direction: Vec2,
    pub force: f32,
    pub idle_time: f32,
    pub extend_time: f32,
    pub cooldown_time: f32,
    phase: PistonPhase,
    phase_until: Option<f32>,
}

impl Piston {
    pub fn new(direction: Vec2, force: f32, idle_time: f32, extend_time: f32, cooldown_time: f32) -> Self {
        Self {
            direction,
            force,
            idle_time,
            extend_time,
            cooldown_time,
            phase: PistonPhase::Idle,
            phase_until: None,
        }
    }

    pub fn phase(&self) -> PistonPhase {
        self.phase
    }

    /// Advance the cycle. Returns true on the tick the piston fires.
    pub fn advance(&mut self, now: f32) -> bool {
        let deadline = *self.phase_until.get_or_insert(now + self.idle_time);
        if now < deadline {
            return false;
        }

        let (next, duration) = match self.phase {
            PistonPhase::Idle => (PistonPhase::Extending, self.extend_time),
            PistonPhase::Extending => (PistonPhase::Cooldown, self.cooldown_time),
            PistonPhase::Cooldown => (PistonPhase::Idle, self.idle_time),
        };
        self.phase = next;
        self.phase_until = Some(now + duration);
        next == PistonPhase::Extending
    }
}

/// Scales gravity for characters inside it.
#[derive(Component, Debug, Clone, Copy)]
#[require(ZoneOccupants)]
pub struct GravityZone {
    pub multiplier: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformPhase {
    Intact,
    Cracking { until: f32 },
    Broken { until: f32 },
}

/// Platform that gives way shortly after being landed on, then reforms.
#[derive(Component, Debug, Clone)]
pub struct BreakablePlatform {
    pub size: Vec2,
    pub crack_time: f32,
    pub respawn_time: f32,
    phase: PlatformPhase,
}

impl BreakablePlatform {
    pub fn new(size: Vec2, crack_time: f32, respawn_time: f32) -> Self {
        Self {
            size,
            crack_time,
            respawn_time,
            phase: PlatformPhase::Intact,
        }
    }

    pub fn phase(&self) -> PlatformPhase {
        self.phase
    }

    /// Start cracking. Only an intact platform can crack.
    pub fn crack(&mut self, now: f32) -> bool {
        if self.phase != PlatformPhase::Intact {
            return false;
        }
        self.phase = PlatformPhase::Cracking {
            until: now + self.crack_time,
        };
        true
    }

    /// Advance timers; returns the new phase when it changed.
    pub fn advance(&mut self, now: f32) -> Option<PlatformPhase> {
        let next = match self.phase {
            PlatformPhase::Cracking { until } if now >= until => PlatformPhase::Broken {
                until: now + self.respawn_time,
            },
            PlatformPhase::Broken { until } if now >= until => PlatformPhase::Intact,
            _ => return None,
        };
        self.phase = next;
        Some(next)
    }
}
