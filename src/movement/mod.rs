//! Movement domain: charge-jump locomotion plugin wiring and public exports.
//!
//! Everything that touches a character's velocity runs in `FixedUpdate`, in
//! this order:
//!
//! 1. [`MotionSystems::Resolve`]: read back physics, react to contacts, sense
//!    ground, drive the jump charge.
//! 2. Collaborators (hazards) queue impulses through [`ImpulseGateway`].
//! 3. [`MotionSystems::Integrate`]: apply queued impulses, then resolve and
//!    submit the velocity command.

mod bootstrap;
mod bounce;
mod components;
#[cfg(feature = "dev-tools")]
mod dev;
mod events;
mod gateway;
mod motion;
mod resources;
mod systems;

#[cfg(test)]
mod tests;

pub use bounce::{ContactReaction, SurfaceContact, SurfaceKind};
pub use components::{
    ChargeState, Facing, GameLayer, Ground, GroundSensor, GroundState, Player, Wall,
};
pub use events::{CeilingBouncedEvent, JumpReleasedEvent, LandedEvent, WallBouncedEvent};
pub use gateway::{ImpulseCommand, ImpulseGateway, ImpulseKind};
pub use motion::{CharacterMotion, GroundTransition, JumpLaunch};
pub use resources::{MotionTuning, MovementInput, TuningError};

use bevy::prelude::*;

use crate::movement::bootstrap::spawn_player;
use crate::movement::gateway::apply_impulse_commands;
use crate::movement::systems::{
    drive_jump_charge, integrate_motion, observe_physics, react_to_contacts, read_input,
    sense_ground, update_motion_feedback,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum MotionSystems {
    Resolve,
    Integrate,
}

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MotionTuning>()
            .init_resource::<MovementInput>()
            .add_message::<JumpReleasedEvent>()
            .add_message::<LandedEvent>()
            .add_message::<WallBouncedEvent>()
            .add_message::<CeilingBouncedEvent>()
            .add_message::<ImpulseCommand>()
            .configure_sets(
                FixedUpdate,
                (MotionSystems::Resolve, MotionSystems::Integrate).chain(),
            )
            .add_systems(Startup, spawn_player)
            .add_systems(Update, (read_input, update_motion_feedback))
            .add_systems(
                FixedUpdate,
                (
                    observe_physics,
                    react_to_contacts,
                    sense_ground,
                    drive_jump_charge,
                )
                    .chain()
                    .in_set(MotionSystems::Resolve),
            )
            .add_systems(
                FixedUpdate,
                (apply_impulse_commands, integrate_motion)
                    .chain()
                    .in_set(MotionSystems::Integrate),
            );

        #[cfg(feature = "dev-tools")]
        app.add_systems(Startup, dev::spawn_test_level)
            .add_systems(Update, dev::draw_trajectory_preview);
    }
}
