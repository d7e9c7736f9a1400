//! Movement domain: components and physics layers for locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (floors, platforms)
    Ground,
    /// Wall and ceiling surfaces
    Wall,
    /// Player character
    Player,
    /// Sensors (wind, springs, pistons) - should not block movement
    Sensor,
}

#[derive(Component, Debug)]
pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Facing that matches the sign of a horizontal value, if nonzero.
    pub fn from_sign(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Facing::Right)
        } else if x < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroundState {
    #[default]
    Grounded,
    /// Left the ground recently; jumps are still honored.
    CoyoteWindow,
    Airborne,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeState {
    #[default]
    NotCharging,
    Charging,
}

/// Anchor for the ground rays, relative to the character origin.
///
/// Characters without this component never report ground contact.
#[derive(Component, Debug, Clone, Copy)]
pub struct GroundSensor {
    /// Offset from the character origin to the center of the feet.
    pub offset: Vec2,
    /// Horizontal span covered by the ground rays.
    pub foot_width: f32,
    /// How far below the feet a surface still counts as ground.
    pub depth: f32,
}

impl GroundSensor {
    pub fn new(offset: Vec2, foot_width: f32, depth: f32) -> Self {
        Self {
            offset,
            foot_width,
            depth,
        }
    }

    /// Ray origins for the left and right foot in world space.
    pub fn ray_origins(&self, origin: Vec2) -> [Vec2; 2] {
        let feet = origin + self.offset;
        let half = self.foot_width * 0.5;
        [feet - Vec2::new(half, 0.0), feet + Vec2::new(half, 0.0)]
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall and ceiling colliders
#[derive(Component, Debug)]
pub struct Wall;
