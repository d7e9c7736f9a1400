//! Movement domain: messages emitted by the motion core for audio, animation
//! and UI collaborators.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Fired when a charged jump leaves the ground
#[derive(Debug)]
pub struct JumpReleasedEvent {
    pub entity: Entity,
    /// Charge progress at release, in [0, 1]
    pub normalized_hold: f32,
}

impl Message for JumpReleasedEvent {}

/// Fired when an airborne character touches down
#[derive(Debug)]
pub struct LandedEvent {
    pub entity: Entity,
    /// Surface landed on, when the physics engine reported one
    pub surface: Option<Entity>,
}

impl Message for LandedEvent {}

/// Fired when an airborne character is reflected off a wall
#[derive(Debug)]
pub struct WallBouncedEvent {
    pub entity: Entity,
    /// Bounce came late enough after takeoff to lose strength
    pub damped: bool,
}

impl Message for WallBouncedEvent {}

/// Fired when an airborne character is reflected off a ceiling
#[derive(Debug)]
pub struct CeilingBouncedEvent {
    pub entity: Entity,
}

impl Message for CeilingBouncedEvent {}
