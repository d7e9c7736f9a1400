//! Core domain: shared resources for the simulation clock and run seed.

use bevy::prelude::*;
use rand::Rng;

/// Fixed simulation rate; every motion deadline is measured on this clock.
pub const FIXED_TICK_HZ: f64 = 60.0;

/// Downward acceleration applied by the physics engine, in pixels/s².
pub const WORLD_GRAVITY: f32 = 1800.0;

#[derive(Resource, Debug)]
pub struct RunConfig {
    /// Seeds every deterministic hazard (wind gusts) for this run.
    pub seed: u64,
}

/// Environment variable that pins the run seed for reproducible sessions.
pub const SEED_ENV_VAR: &str = "ASCENT_SEED";

impl Default for RunConfig {
    fn default() -> Self {
        std::env::var(SEED_ENV_VAR)
            .ok()
            .and_then(|seed| seed.parse().ok())
            .map(Self::with_seed)
            .unwrap_or_else(|| Self::with_seed(rand::rng().random()))
    }
}

impl RunConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self { seed }
    }

    /// Derive a stable per-entity seed so hazards don't share one stream.
    pub fn derive_seed(&self, salt: u64) -> u64 {
        self.seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}
