//! Core domain: simulation clock, world physics and run configuration.

mod resources;

pub use resources::{FIXED_TICK_HZ, RunConfig, WORLD_GRAVITY};

use avian2d::prelude::*;
use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Time::<Fixed>::from_hz(FIXED_TICK_HZ))
            .insert_resource(Gravity(Vec2::NEG_Y * WORLD_GRAVITY))
            .init_resource::<RunConfig>()
            .add_systems(Startup, (setup_camera, log_run_seed));
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn log_run_seed(run_config: Res<RunConfig>) {
    info!("Run seed: {}", run_config.seed);
}
