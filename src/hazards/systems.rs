//! Hazards domain: systems that turn hazard state into impulse commands.
//!
//! These run between motion resolution and integration, so everything they
//! queue lands on this tick's velocity.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::core::RunConfig;
use crate::hazards::components::{
    BreakablePlatform, GravityZone, Piston, PlatformPhase, Spring, WindZone, ZoneOccupants,
};
use crate::movement::{CharacterMotion, GroundState, ImpulseGateway, LandedEvent};

/// Order a collision pair as (hazard, character), if it is one.
fn hazard_and_character(
    a: Entity,
    b: Entity,
    is_hazard: impl Fn(Entity) -> bool,
    is_character: impl Fn(Entity) -> bool,
) -> Option<(Entity, Entity)> {
    if is_hazard(a) && is_character(b) {
        Some((a, b))
    } else if is_hazard(b) && is_character(a) {
        Some((b, a))
    } else {
        None
    }
}

/// Give each new wind zone its own gust stream derived from the run seed.
pub(crate) fn seed_wind_gusts(
    run_config: Res<RunConfig>,
    mut zones: Query<(Entity, &mut WindZone), Added<WindZone>>,
) {
    for (entity, mut zone) in &mut zones {
        if zone.is_seeded() {
            continue;
        }
        let seed = run_config.derive_seed(entity.to_bits());
        zone.seed(seed);
        debug!("Wind zone {:?} gusts seeded with {}", entity, seed);
    }
}

pub(crate) fn track_zone_occupants(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    mut zones: Query<&mut ZoneOccupants>,
    characters: Query<(), With<CharacterMotion>>,
) {
    for event in started.read() {
        let Some((zone, character)) = hazard_and_character(
            event.collider1,
            event.collider2,
            |e| zones.contains(e),
            |e| characters.contains(e),
        ) else {
            continue;
        };
        if let Ok(mut occupants) = zones.get_mut(zone) {
            occupants.enter(character);
        }
    }

    for event in ended.read() {
        let Some((zone, character)) = hazard_and_character(
            event.collider1,
            event.collider2,
            |e| zones.contains(e),
            |e| characters.contains(e),
        ) else {
            continue;
        };
        if let Ok(mut occupants) = zones.get_mut(zone) {
            occupants.exit(character);
        }
    }

    for mut occupants in &mut zones {
        occupants.0.retain(|e| characters.contains(*e));
    }
}

pub(crate) fn apply_wind(
    time: Res<Time>,
    mut zones: Query<(&mut WindZone, &ZoneOccupants)>,
    characters: Query<&CharacterMotion>,
    mut gateway: ImpulseGateway,
) {
    let now = time.elapsed_secs();
    let dt = time.delta_secs();

    for (mut zone, occupants) in &mut zones {
        if occupants.0.is_empty() {
            continue;
        }
        let dvx = zone.delta(now, dt);
        for &entity in &occupants.0 {
            let Ok(motion) = characters.get(entity) else {
                continue;
            };
            // Grounded characters are driven by input alone
            if motion.ground_state() != GroundState::Grounded {
                gateway.add_velocity_delta(entity, dvx);
            }
        }
    }
}

pub(crate) fn trigger_springs(
    mut started: MessageReader<CollisionStart>,
    springs: Query<&Spring>,
    characters: Query<(), With<CharacterMotion>>,
    mut gateway: ImpulseGateway,
) {
    for event in started.read() {
        let Some((spring_entity, character)) = hazard_and_character(
            event.collider1,
            event.collider2,
            |e| springs.contains(e),
            |e| characters.contains(e),
        ) else {
            continue;
        };
        let Ok(spring) = springs.get(spring_entity) else {
            continue;
        };

        gateway.force_launch(character, spring.direction, spring.force, true);
        if let Some(duration) = spring.air_control {
            gateway.allow_air_control_for(character, duration);
        }
        debug!("Spring {:?} launched {:?}", spring_entity, character);
    }
}

pub(crate) fn cycle_pistons(
    time: Res<Time>,
    mut pistons: Query<(Entity, &mut Piston, &ZoneOccupants)>,
    mut gateway: ImpulseGateway,
) {
    let now = time.elapsed_secs();

    for (entity, mut piston, occupants) in &mut pistons {
        if !piston.advance(now) {
            continue;
        }
        debug!(
            "Piston {:?} fired at t={:.3} with {} occupant(s)",
            entity,
            now,
            occupants.0.len()
        );
        for &character in &occupants.0 {
            gateway.force_launch(character, piston.direction, piston.force, true);
        }
    }
}

/// Recompute gravity for characters entering or leaving gravity zones.
/// Overlapping zones stack multiplicatively; outside all zones the scale is 1.
pub(crate) fn apply_gravity_zones(
    mut started: MessageReader<CollisionStart>,
    mut ended: MessageReader<CollisionEnd>,
    zones: Query<(&GravityZone, &ZoneOccupants)>,
    characters: Query<(), With<CharacterMotion>>,
    mut gateway: ImpulseGateway,
) {
    let pairs = started
        .read()
        .map(|e| (e.collider1, e.collider2))
        .chain(ended.read().map(|e| (e.collider1, e.collider2)));

    let mut touched: Vec<Entity> = Vec::new();
    for (a, b) in pairs {
        if let Some((_, character)) = hazard_and_character(
            a,
            b,
            |e| zones.contains(e),
            |e| characters.contains(e),
        ) {
            if !touched.contains(&character) {
                touched.push(character);
            }
        }
    }

    for character in touched {
        let scale: f32 = zones
            .iter()
            .filter(|(_, occupants)| occupants.contains(character))
            .map(|(zone, _)| zone.multiplier)
            .product();
        gateway.set_gravity_scale(character, scale);
    }
}

pub(crate) fn crack_breakable_platforms(
    time: Res<Time>,
    mut landings: MessageReader<LandedEvent>,
    mut platforms: Query<&mut BreakablePlatform>,
) {
    let now = time.elapsed_secs();

    for landing in landings.read() {
        let Some(surface) = landing.surface else {
            continue;
        };
        if let Ok(mut platform) = platforms.get_mut(surface) {
            if platform.crack(now) {
                debug!("Platform {:?} cracking under {:?}", surface, landing.entity);
            }
        }
    }
}

pub(crate) fn tick_breakable_platforms(
    mut commands: Commands,
    time: Res<Time>,
    mut platforms: Query<(Entity, &mut BreakablePlatform, &mut Visibility)>,
) {
    let now = time.elapsed_secs();

    for (entity, mut platform, mut visibility) in &mut platforms {
        match platform.advance(now) {
            Some(PlatformPhase::Broken { .. }) => {
                commands.entity(entity).remove::<Collider>();
                *visibility = Visibility::Hidden;
                debug!("Platform {:?} broke", entity);
            }
            Some(PlatformPhase::Intact) => {
                commands
                    .entity(entity)
                    .insert(Collider::rectangle(platform.size.x, platform.size.y));
                *visibility = Visibility::Inherited;
                debug!("Platform {:?} reformed", entity);
            }
            Some(PlatformPhase::Cracking { .. }) | None => {}
        }
    }
}
