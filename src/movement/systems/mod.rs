//! Movement domain: system modules for locomotion updates.

pub(crate) mod contacts;
pub(crate) mod feedback;
pub(crate) mod input;
pub(crate) mod motion;
pub(crate) mod sensing;

pub(crate) use contacts::react_to_contacts;
pub(crate) use feedback::{MotionFeedback, update_motion_feedback};
pub(crate) use input::read_input;
pub(crate) use motion::{drive_jump_charge, integrate_motion};
pub(crate) use sensing::{observe_physics, sense_ground};
