//! Movement domain: sprite tint for charge, fatigue and bounce feedback.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::movement::{CeilingBouncedEvent, CharacterMotion, JumpReleasedEvent, WallBouncedEvent};

const FLASH_SECONDS: f32 = 0.12;

/// Short color flash after a motion event.
#[derive(Component, Debug, Default)]
pub struct MotionFeedback {
    flash_until: f32,
    flash_color: Color,
}

impl MotionFeedback {
    fn flash(&mut self, now: f32, color: Color) {
        self.flash_until = now + FLASH_SECONDS;
        self.flash_color = color;
    }
}

fn resting_color(motion: &CharacterMotion, now: f32) -> Color {
    if let Some(hold) = motion.tick_charge(now) {
        // White to amber as the charge builds
        Color::srgb(1.0, 1.0 - 0.3 * hold, 1.0 - 0.8 * hold)
    } else if motion.is_fatigued(now) {
        let t = motion.fatigue_remaining(now) / motion.tuning().fatigue_duration.max(f32::EPSILON);
        let v = 0.9 - 0.3 * t;
        Color::srgb(v, v, v)
    } else {
        Color::srgb(0.9, 0.9, 0.9)
    }
}

pub(crate) fn update_motion_feedback(
    time: Res<Time<Fixed>>,
    mut jumps: MessageReader<JumpReleasedEvent>,
    mut walls: MessageReader<WallBouncedEvent>,
    mut ceilings: MessageReader<CeilingBouncedEvent>,
    mut query: Query<(&CharacterMotion, &mut MotionFeedback, &mut Sprite)>,
) {
    let now = time.elapsed_secs();

    for event in jumps.read() {
        if let Ok((_, mut feedback, _)) = query.get_mut(event.entity) {
            let strength = 0.5 + 0.5 * event.normalized_hold;
            feedback.flash(now, Color::srgb(1.0, 1.0, 1.0 - 0.6 * strength));
        }
    }
    for event in walls.read() {
        if let Ok((_, mut feedback, _)) = query.get_mut(event.entity) {
            let color = if event.damped {
                Color::srgb(0.5, 0.6, 0.8)
            } else {
                Color::srgb(0.4, 0.7, 1.0)
            };
            feedback.flash(now, color);
        }
    }
    for event in ceilings.read() {
        if let Ok((_, mut feedback, _)) = query.get_mut(event.entity) {
            feedback.flash(now, Color::srgb(1.0, 0.5, 0.5));
        }
    }

    for (motion, feedback, mut sprite) in &mut query {
        sprite.color = if now < feedback.flash_until {
            feedback.flash_color
        } else {
            resting_color(motion, now)
        };
    }
}
