//! Hazards domain: wind, springs, pistons, gravity zones and breakable
//! platforms. All of them act on characters through the impulse gateway.

mod components;
mod systems;


pub use components::{
    BreakablePlatform, GravityZone, GustPattern, GustSettings, Piston, PistonPhase,
    PlatformPhase, Spring, WindZone, ZoneOccupants,
};

use bevy::prelude::*;

use crate::hazards::systems::{
    apply_gravity_zones, apply_wind, crack_breakable_platforms, cycle_pistons, seed_wind_gusts,
    tick_breakable_platforms, track_zone_occupants, trigger_springs,
};
use crate::movement::MotionSystems;

pub struct HazardsPlugin;

impl Plugin for HazardsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                seed_wind_gusts,
                track_zone_occupants,
                apply_wind,
                trigger_springs,
                cycle_pistons,
                apply_gravity_zones,
                crack_breakable_platforms,
                tick_breakable_platforms,
            )
                .chain()
                .after(MotionSystems::Resolve)
                .before(MotionSystems::Integrate),
        );
    }
}
