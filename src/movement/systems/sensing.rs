//! Movement domain: ground sensing and physics read-back.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{CharacterMotion, GameLayer, GroundSensor, GroundTransition, LandedEvent};

/// Take over what the last physics step integrated before anything else runs.
pub(crate) fn observe_physics(
    mut query: Query<(&Transform, &LinearVelocity, &mut CharacterMotion)>,
) {
    for (transform, velocity, mut motion) in &mut query {
        motion.observe_physics(transform.translation.truncate(), velocity.0);
    }
}

pub(crate) fn sense_ground(
    time: Res<Time>,
    spatial_query: SpatialQuery,
    mut landed_events: MessageWriter<LandedEvent>,
    mut query: Query<(
        Entity,
        &Transform,
        Option<&GroundSensor>,
        &mut CharacterMotion,
    )>,
) {
    let now = time.elapsed_secs();
    // Filter to only hit Ground layer entities (not sensors, walls, etc.)
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (entity, transform, sensor, mut motion) in &mut query {
        let surface = match sensor {
            Some(sensor) if !motion.is_sensor_suppressed(now) => {
                let origin = transform.translation.truncate();
                sensor.ray_origins(origin).into_iter().find_map(|ray_origin| {
                    spatial_query
                        .cast_ray(ray_origin, Dir2::NEG_Y, sensor.depth, true, &ground_filter)
                        .map(|hit| hit.entity)
                })
            }
            Some(_) => None,
            None => {
                warn_once!(
                    "Character {:?} has no ground sensor; treating it as airborne",
                    entity
                );
                None
            }
        };

        match motion.apply_ground_sense(now, surface.is_some()) {
            GroundTransition::Landed => {
                landed_events.write(LandedEvent { entity, surface });
            }
            GroundTransition::LeftGround => {
                debug!(
                    "Left ground: t={:.3}, takeoff_vx={:.1}",
                    now,
                    motion.airborne_horizontal_velocity()
                );
            }
            GroundTransition::CoyoteExpired => {
                debug!("Coyote window expired: t={:.3}", now);
            }
            GroundTransition::None => {}
        }
    }
}
