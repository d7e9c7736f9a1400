//! Movement domain: feeds physics contacts into the bounce reactor.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::movement::{
    CeilingBouncedEvent, CharacterMotion, ContactReaction, Ground, LandedEvent, SurfaceContact,
    Wall, WallBouncedEvent,
};

/// Turn a manifold normal, which points from the first collider to the
/// second, into one pointing from the surface to the character.
pub(crate) fn oriented_normal(manifold_normal: Vec2, character_is_first: bool) -> Vec2 {
    if character_is_first {
        -manifold_normal
    } else {
        manifold_normal
    }
}

/// Summarize `(normal, point count)` manifolds into one surface contact.
/// The normal comes from the first manifold that has points.
pub(crate) fn summarize_manifolds(
    manifolds: impl IntoIterator<Item = (Vec2, usize)>,
    character_is_first: bool,
) -> SurfaceContact {
    let mut normal = Vec2::ZERO;
    let mut point_count = 0;

    for (manifold_normal, points) in manifolds {
        if points > 0 && point_count == 0 {
            normal = oriented_normal(manifold_normal, character_is_first);
        }
        point_count += points;
    }

    SurfaceContact::new(normal, point_count)
}

fn surface_contact(pair: &ContactPair, character: Entity) -> SurfaceContact {
    summarize_manifolds(
        pair.manifolds.iter().map(|m| (m.normal, m.points.len())),
        pair.collider1 == character,
    )
}

pub(crate) fn react_to_contacts(
    time: Res<Time>,
    collisions: Collisions,
    mut collision_events: MessageReader<CollisionStart>,
    mut landed_events: MessageWriter<LandedEvent>,
    mut wall_events: MessageWriter<WallBouncedEvent>,
    mut ceiling_events: MessageWriter<CeilingBouncedEvent>,
    surfaces: Query<(), Or<(With<Ground>, With<Wall>)>>,
    mut characters: Query<&mut CharacterMotion>,
) {
    let now = time.elapsed_secs();

    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (character, surface) in pairs {
            if surfaces.get(surface).is_err() {
                continue;
            }
            let Ok(mut motion) = characters.get_mut(character) else {
                continue;
            };
            // Pair may already have separated; no points means nothing to do
            let Some(pair) = collisions.get(character, surface) else {
                continue;
            };

            let contact = surface_contact(pair, character);
            match motion.react_to_contact(now, contact) {
                ContactReaction::Landed => {
                    landed_events.write(LandedEvent {
                        entity: character,
                        surface: Some(surface),
                    });
                }
                ContactReaction::WallBounce { damped, .. } => {
                    wall_events.write(WallBouncedEvent {
                        entity: character,
                        damped,
                    });
                }
                ContactReaction::CeilingBounce { .. } => {
                    ceiling_events.write(CeilingBouncedEvent { entity: character });
                }
                ContactReaction::Ignored => {}
            }
        }
    }
}
