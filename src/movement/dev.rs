//! Movement domain: debug-only test level and jump trajectory preview.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::WORLD_GRAVITY;
use crate::hazards::{BreakablePlatform, GravityZone, GustSettings, Piston, Spring, WindZone};
use crate::movement::{CharacterMotion, GameLayer, Ground, Wall};

const PREVIEW_SECONDS: f32 = 1.2;
const PREVIEW_STEPS: usize = 24;

fn solid_layers(layer: GameLayer) -> CollisionLayers {
    CollisionLayers::new(layer, [GameLayer::Player])
}

fn sensor_bundle(size: Vec2, position: Vec2, color: Color) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(-1.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        Sensor,
        CollisionEventsEnabled,
        CollisionLayers::new(GameLayer::Sensor, [GameLayer::Player]),
    )
}

fn block(size: Vec2, position: Vec2, color: Color) -> impl Bundle {
    (
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(0.0)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
    )
}

pub(crate) fn spawn_test_level(mut commands: Commands) {
    let wall_color = Color::srgb(0.3, 0.3, 0.4);
    let ground_color = Color::srgb(0.4, 0.5, 0.4);
    let platform_color = Color::srgb(0.5, 0.4, 0.3);

    // Floor
    commands.spawn((
        Ground,
        block(Vec2::new(800.0, 40.0), Vec2::new(0.0, -200.0), ground_color),
        solid_layers(GameLayer::Ground),
    ));
    // Ceiling; classified by its contact normal, so it shares the wall layer
    commands.spawn((
        Wall,
        block(Vec2::new(800.0, 40.0), Vec2::new(0.0, 320.0), wall_color),
        solid_layers(GameLayer::Wall),
    ));

    // Side walls
    for x in [-420.0, 420.0] {
        commands.spawn((
            Wall,
            block(Vec2::new(40.0, 560.0), Vec2::new(x, 60.0), wall_color),
            solid_layers(GameLayer::Wall),
        ));
    }

    // Ledges
    commands.spawn((
        Ground,
        block(Vec2::new(150.0, 20.0), Vec2::new(-250.0, -50.0), platform_color),
        solid_layers(GameLayer::Ground),
    ));
    commands.spawn((
        Ground,
        block(Vec2::new(150.0, 20.0), Vec2::new(250.0, 50.0), platform_color),
        solid_layers(GameLayer::Ground),
    ));

    // Breakable ledge in the middle
    let breakable_size = Vec2::new(120.0, 16.0);
    commands.spawn((
        Ground,
        BreakablePlatform::new(breakable_size, 0.5, 2.0),
        block(
            breakable_size,
            Vec2::new(0.0, 120.0),
            Color::srgb(0.7, 0.5, 0.3),
        ),
        solid_layers(GameLayer::Ground),
    ));

    // Wind blowing left over the right half
    commands.spawn((
        WindZone::new(
            -600.0,
            GustSettings {
                min_scale: 0.4,
                max_scale: 1.4,
                interval: 0.75,
            },
        ),
        sensor_bundle(
            Vec2::new(300.0, 360.0),
            Vec2::new(230.0, 100.0),
            Color::srgba(0.6, 0.8, 1.0, 0.15),
        ),
    ));

    // Bounce mushroom on the floor
    commands.spawn((
        Spring {
            direction: Vec2::Y,
            force: 1100.0,
            air_control: Some(0.4),
        },
        sensor_bundle(
            Vec2::new(48.0, 12.0),
            Vec2::new(-320.0, -174.0),
            Color::srgb(0.9, 0.3, 0.5),
        ),
    ));

    // Piston pushing right off the left wall
    commands.spawn((
        Piston::new(Vec2::new(1.0, 0.3), 700.0, 1.5, 0.2, 0.8),
        sensor_bundle(
            Vec2::new(60.0, 80.0),
            Vec2::new(-370.0, -140.0),
            Color::srgba(0.9, 0.6, 0.2, 0.3),
        ),
    ));

    // Low gravity column
    commands.spawn((
        GravityZone { multiplier: 0.4 },
        sensor_bundle(
            Vec2::new(100.0, 400.0),
            Vec2::new(-120.0, 60.0),
            Color::srgba(0.6, 0.4, 0.9, 0.15),
        ),
    ));
}

/// Draw the arc a release right now would follow, ignoring collisions.
pub(crate) fn draw_trajectory_preview(
    time: Res<Time<Fixed>>,
    characters: Query<(&CharacterMotion, &Transform)>,
    mut gizmos: Gizmos,
) {
    let now = time.elapsed_secs();

    for (motion, transform) in &characters {
        let Some(velocity) = motion.predicted_jump_velocity(now) else {
            continue;
        };
        let origin = transform.translation.truncate();
        let gravity = Vec2::NEG_Y * WORLD_GRAVITY * motion.gravity_scale();

        let points = (0..=PREVIEW_STEPS).map(|step| {
            let t = PREVIEW_SECONDS * step as f32 / PREVIEW_STEPS as f32;
            origin + velocity * t + 0.5 * gravity * t * t
        });
        gizmos.linestrip_2d(points, Color::srgba(1.0, 1.0, 0.4, 0.6));
    }
}
