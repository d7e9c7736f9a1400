//! Movement domain: charge, lock, bounce and gateway behavior.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use proptest::prelude::*;

use super::gateway::apply_impulse_commands;
use super::systems::contacts::{oriented_normal, summarize_manifolds};
use super::systems::sense_ground;
use super::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

/// Small numbers that are easy to check by hand.
fn scenario_tuning() -> MotionTuning {
    MotionTuning {
        move_speed: 5.0,
        max_jump_force: 20.0,
        jump_time_limit: 1.0,
        ..default()
    }
}

fn grounded(tuning: MotionTuning) -> CharacterMotion {
    let mut motion = CharacterMotion::new(tuning).unwrap();
    assert_eq!(motion.apply_ground_sense(0.0, true), GroundTransition::Landed);
    motion
}

/// Grounded at t=0, charged from t=0 and released at `release_at`.
fn jumped(tuning: MotionTuning, axis: f32, release_at: f32) -> (CharacterMotion, JumpLaunch) {
    let mut motion = grounded(tuning);
    assert!(motion.begin_charge(0.0, axis));
    let launch = motion.release(release_at).unwrap();
    (motion, launch)
}

// -----------------------------------------------------------------------------
// Charge and release
// -----------------------------------------------------------------------------

#[test]
fn test_half_hold_scenario() {
    let mut motion = grounded(scenario_tuning());
    assert!(motion.begin_charge(1.0, 0.0));
    let launch = motion.release(1.5).unwrap();

    assert!(approx(launch.velocity.x, 5.0));
    assert!(approx(launch.velocity.y, 10.0));
    assert!(approx(launch.normalized_hold, 0.5));
    assert_eq!(motion.ground_state(), GroundState::Airborne);
    assert_eq!(motion.charge_state(), ChargeState::NotCharging);
}

proptest! {
    #[test]
    fn test_release_force_is_proportional_to_clamped_hold(hold in 0.0f32..3.0) {
        let tuning = scenario_tuning();
        let (_, launch) = jumped(tuning.clone(), 0.0, hold);

        let expected = (hold / tuning.jump_time_limit).clamp(0.0, 1.0) * tuning.max_jump_force;
        prop_assert!((launch.velocity.y - expected).abs() < 1e-3);
    }
}

#[test]
fn test_zero_hold_still_hops() {
    let (motion, launch) = jumped(MotionTuning::default(), 1.0, 0.0);

    assert_eq!(launch.normalized_hold, 0.0);
    assert_eq!(launch.velocity.y, 0.0);
    assert!(approx(launch.velocity.x, MotionTuning::default().move_speed));
    assert_eq!(motion.ground_state(), GroundState::Airborne);
    assert!(motion.is_fatigued(0.0));
}

#[test]
fn test_charge_input_turns_character_before_jump() {
    let (motion, launch) = jumped(MotionTuning::default(), -1.0, 0.3);

    assert_eq!(motion.facing(), Facing::Left);
    assert!(launch.velocity.x < 0.0);
}

#[test]
fn test_release_without_charge_does_nothing() {
    let mut motion = grounded(MotionTuning::default());
    assert_eq!(motion.release(1.0), None);
    assert_eq!(motion.ground_state(), GroundState::Grounded);
}

#[test]
fn test_tick_charge_and_prediction() {
    let mut motion = grounded(scenario_tuning());
    assert_eq!(motion.tick_charge(0.0), None);
    assert_eq!(motion.predicted_jump_velocity(0.0), None);

    motion.begin_charge(0.0, 0.0);
    assert!(approx(motion.tick_charge(0.25).unwrap(), 0.25));
    assert!(approx(motion.tick_charge(4.0).unwrap(), 1.0));

    let predicted = motion.predicted_jump_velocity(0.5).unwrap();
    let launch = motion.release(0.5).unwrap();
    assert_eq!(predicted, launch.velocity);
}

#[test]
fn test_charging_freezes_horizontal_velocity() {
    let mut motion = grounded(MotionTuning::default());
    assert!(motion.integrate(0.0, 1.0).x > 0.0);

    motion.begin_charge(0.1, 1.0);
    assert_eq!(motion.integrate(0.1, 1.0).x, 0.0);
    assert_eq!(motion.integrate(0.2, -1.0).x, 0.0);
}

// -----------------------------------------------------------------------------
// Coyote time and fatigue
// -----------------------------------------------------------------------------

#[test]
fn test_coyote_window_boundaries() {
    let mut motion = grounded(MotionTuning::default());
    let coyote = motion.tuning().coyote_time;
    let epsilon = 0.001;

    assert_eq!(
        motion.apply_ground_sense(0.02, false),
        GroundTransition::LeftGround
    );
    assert_eq!(motion.ground_state(), GroundState::CoyoteWindow);

    assert!(motion.can_begin_charge(coyote - epsilon));
    assert!(!motion.can_begin_charge(coyote + epsilon));
}

#[test]
fn test_coyote_window_expires_to_airborne() {
    let mut motion = grounded(MotionTuning::default());
    motion.apply_ground_sense(0.02, false);

    assert_eq!(motion.apply_ground_sense(0.05, false), GroundTransition::None);
    assert_eq!(
        motion.apply_ground_sense(0.2, false),
        GroundTransition::CoyoteExpired
    );
    assert_eq!(motion.ground_state(), GroundState::Airborne);
}

#[test]
fn test_jump_consumes_coyote_time() {
    let mut motion = grounded(MotionTuning::default());
    motion.apply_ground_sense(0.02, false);
    assert!(motion.begin_charge(0.05, 0.0));
    motion.release(0.05);

    // Fatigue is over, but the coyote window must not grant a second jump
    let after_fatigue = 0.05 + motion.tuning().fatigue_duration + 0.01;
    assert!(!motion.can_begin_charge(after_fatigue));
}

#[test]
fn test_fatigue_blocks_charge_and_slows_ground_speed() {
    let tuning = MotionTuning::default();
    let (mut motion, _) = jumped(tuning.clone(), 0.0, 1.0);
    let fatigue_end = 1.0 + tuning.fatigue_duration;

    // Land once the takeoff lock is over but fatigue is not
    let land_at = 1.0 + tuning.takeoff_lock_time + 0.01;
    assert_eq!(
        motion.apply_ground_sense(land_at, true),
        GroundTransition::Landed
    );
    assert!(motion.is_fatigued(land_at));
    assert!(!motion.can_begin_charge(land_at));
    assert!(motion.fatigue_remaining(land_at) > 0.0);

    let slowed = motion.integrate(land_at, 1.0).x;
    assert!(approx(
        slowed,
        tuning.move_speed * tuning.fatigue_speed_multiplier
    ));

    let rested = fatigue_end + 0.01;
    assert!(motion.can_begin_charge(rested));
    assert_eq!(motion.fatigue_remaining(rested), 0.0);
    assert!(approx(motion.integrate(rested, 1.0).x, tuning.move_speed));
}

// -----------------------------------------------------------------------------
// Airborne lock
// -----------------------------------------------------------------------------

#[test]
fn test_airborne_velocity_ignores_input() {
    let (mut motion, launch) = jumped(MotionTuning::default(), 1.0, 0.2);

    for (step, axis) in [-1.0, 1.0, 0.0, -0.5, -1.0].into_iter().enumerate() {
        let now = 0.2 + step as f32 * 0.05;
        assert_eq!(motion.integrate(now, axis).x, launch.velocity.x);
    }
    assert_eq!(motion.facing(), Facing::Right);
}

#[test]
fn test_walking_off_ledge_locks_last_ground_speed() {
    let mut motion = grounded(MotionTuning::default());
    let speed = motion.integrate(0.0, 1.0).x;

    motion.apply_ground_sense(0.05, false);
    assert_eq!(motion.integrate(0.06, -1.0).x, speed);
}

#[test]
fn test_ground_sense_ignored_during_takeoff_lock() {
    let (mut motion, _) = jumped(MotionTuning::default(), 0.0, 0.0);

    assert_eq!(motion.apply_ground_sense(0.05, true), GroundTransition::None);
    assert_eq!(motion.ground_state(), GroundState::Airborne);
}

#[test]
fn test_air_control_window_steers_then_relocks() {
    let tuning = MotionTuning::default();
    let (mut motion, launch) = jumped(tuning.clone(), 1.0, 0.0);

    motion.allow_air_control_for(0.1, 0.2);
    let steered = motion.integrate(0.2, -1.0).x;
    assert!(steered < 0.0);
    assert!(steered != launch.velocity.x);

    // Window over: the steered value is the new lock
    assert_eq!(motion.integrate(0.5, 1.0).x, steered);
}

// -----------------------------------------------------------------------------
// Contacts
// -----------------------------------------------------------------------------

#[test]
fn test_surface_classification() {
    assert_eq!(
        SurfaceContact::new(Vec2::X, 1).kind(),
        Some(SurfaceKind::Wall)
    );
    assert_eq!(
        SurfaceContact::new(Vec2::new(0.6, 0.8), 1).kind(),
        Some(SurfaceKind::Ground)
    );
    assert_eq!(
        SurfaceContact::new(Vec2::new(0.6, -0.8), 1).kind(),
        Some(SurfaceKind::Ceiling)
    );
    assert_eq!(
        SurfaceContact::new(Vec2::new(0.88, 0.47), 1).kind(),
        None
    );
}

#[test]
fn test_wall_bounce_reflects_away_from_wall() {
    let tuning = MotionTuning::default();
    let full = tuning.jump_time_limit;

    let (mut right, _) = jumped(tuning.clone(), 1.0, full);
    let reaction = right.react_to_contact(full + 0.01, SurfaceContact::new(Vec2::NEG_X, 1));
    let ContactReaction::WallBounce {
        horizontal_velocity,
        ..
    } = reaction
    else {
        panic!("expected a wall bounce, got {reaction:?}");
    };
    assert!(horizontal_velocity < 0.0);
    assert_eq!(right.facing(), Facing::Left);

    let (mut left, _) = jumped(tuning, -1.0, full);
    let reaction = left.react_to_contact(full + 0.01, SurfaceContact::new(Vec2::X, 1));
    let ContactReaction::WallBounce {
        horizontal_velocity,
        ..
    } = reaction
    else {
        panic!("expected a wall bounce, got {reaction:?}");
    };
    assert!(horizontal_velocity > 0.0);
    assert_eq!(left.facing(), Facing::Right);
}

#[test]
fn test_immediate_wall_hit_after_full_charge() {
    let (mut motion, launch) = jumped(scenario_tuning(), 0.0, 1.0);
    assert!(approx(launch.velocity.y, 20.0));

    let reaction = motion.react_to_contact(1.01, SurfaceContact::new(Vec2::NEG_X, 2));

    assert_eq!(
        reaction,
        ContactReaction::WallBounce {
            horizontal_velocity: -(20.0 * 0.33),
            damped: false,
        }
    );
    assert!(approx(motion.airborne_horizontal_velocity(), -6.6));
    assert!(approx(motion.integrate(1.02, 1.0).x, -6.6));
}

#[test]
fn test_late_wall_hit_is_damped() {
    let (mut motion, _) = jumped(scenario_tuning(), 0.0, 1.0);

    let reaction = motion.react_to_contact(1.5, SurfaceContact::new(Vec2::NEG_X, 1));
    let ContactReaction::WallBounce {
        horizontal_velocity,
        damped,
    } = reaction
    else {
        panic!("expected a wall bounce, got {reaction:?}");
    };
    assert!(damped);
    assert!(approx(horizontal_velocity, -3.3));
}

#[test]
fn test_wall_bounce_refreshes_short_lock() {
    let tuning = MotionTuning::default();
    let (mut motion, _) = jumped(tuning.clone(), 1.0, 0.3);
    let hit_at = 0.3 + tuning.takeoff_lock_time + 0.05;

    motion.react_to_contact(hit_at, SurfaceContact::new(Vec2::NEG_X, 1));

    assert!(motion.is_takeoff_locked(hit_at + tuning.bounce_lock_time * 0.5));
    assert!(motion.is_sensor_suppressed(hit_at + tuning.bounce_lock_time * 0.5));
    assert!(!motion.is_takeoff_locked(hit_at + tuning.bounce_lock_time));
}

#[test]
fn test_wall_bounce_follows_contact_normal_not_facing() {
    let tuning = MotionTuning::default();
    let (mut motion, _) = jumped(tuning.clone(), 1.0, tuning.jump_time_limit);
    let land_at = tuning.jump_time_limit + tuning.takeoff_lock_time + 0.01;
    assert_eq!(
        motion.apply_ground_sense(land_at, true),
        GroundTransition::Landed
    );

    // Knocked left while still facing right
    let launched = motion.force_launch(0.8, Vec2::NEG_X, 400.0, true).unwrap();
    assert!(approx(launched.x, -400.0));
    assert_eq!(motion.facing(), Facing::Right);

    // Left wall: normal points right, towards the character
    let reaction = motion.react_to_contact(0.85, SurfaceContact::new(Vec2::X, 1));
    let ContactReaction::WallBounce {
        horizontal_velocity,
        damped,
    } = reaction
    else {
        panic!("expected a wall bounce, got {reaction:?}");
    };
    assert!(damped);
    assert!(approx(horizontal_velocity, 900.0 * 0.33 * 0.5));
    assert_eq!(motion.facing(), Facing::Right);
    assert!(motion.integrate(0.86, 0.0).x > 0.0);
}

#[test]
fn test_walls_only_bounce_airborne_characters() {
    let mut motion = grounded(MotionTuning::default());
    assert_eq!(
        motion.react_to_contact(0.5, SurfaceContact::new(Vec2::NEG_X, 1)),
        ContactReaction::Ignored
    );
}

#[test]
fn test_ceiling_bounce_sends_character_down() {
    let (mut motion, launch) = jumped(MotionTuning::default(), 1.0, 0.4);
    motion.integrate(0.4, 0.0);

    let reaction = motion.react_to_contact(0.45, SurfaceContact::new(Vec2::NEG_Y, 1));

    assert_eq!(
        reaction,
        ContactReaction::CeilingBounce {
            vertical_velocity: -launch.velocity.y,
        }
    );
    assert_eq!(motion.velocity().y, -launch.velocity.y);
    assert_eq!(motion.velocity().x, launch.velocity.x);
}

#[test]
fn test_contacts_without_points_are_ignored() {
    let (mut motion, _) = jumped(MotionTuning::default(), 1.0, 0.4);
    assert_eq!(
        motion.react_to_contact(0.5, SurfaceContact::new(Vec2::NEG_X, 0)),
        ContactReaction::Ignored
    );
}

#[test]
fn test_ground_contact_lands_and_cancels_charge() {
    let tuning = MotionTuning::default();
    let (mut motion, _) = jumped(tuning.clone(), 1.0, 0.4);

    // Still inside the takeoff lock
    assert_eq!(
        motion.react_to_contact(0.41, SurfaceContact::new(Vec2::Y, 2)),
        ContactReaction::Ignored
    );

    let land_at = 0.4 + tuning.takeoff_lock_time + 0.01;
    assert_eq!(
        motion.react_to_contact(land_at, SurfaceContact::new(Vec2::Y, 2)),
        ContactReaction::Landed
    );
    assert_eq!(motion.ground_state(), GroundState::Grounded);
    assert_eq!(motion.airborne_horizontal_velocity(), 0.0);
    assert_eq!(motion.integrate(land_at, 0.0).x, 0.0);
}

// -----------------------------------------------------------------------------
// External impulses
// -----------------------------------------------------------------------------

#[test]
fn test_cancel_jump_charge_is_idempotent() {
    let mut motion = grounded(MotionTuning::default());
    motion.begin_charge(0.0, 0.0);

    assert!(motion.cancel_jump_charge());
    assert!(!motion.cancel_jump_charge());
    assert_eq!(motion.charge_state(), ChargeState::NotCharging);
    assert_eq!(motion.ground_state(), GroundState::Grounded);
    assert!(!motion.is_fatigued(0.1));
}

#[test]
fn test_force_launch_cancels_charge() {
    let mut motion = grounded(MotionTuning::default());
    motion.begin_charge(0.0, 1.0);

    let velocity = motion.force_launch(0.1, Vec2::Y, 500.0, true).unwrap();

    assert_eq!(velocity, Vec2::new(0.0, 500.0));
    assert_eq!(motion.velocity(), velocity);
    assert_eq!(motion.charge_state(), ChargeState::NotCharging);
    assert_eq!(motion.ground_state(), GroundState::Airborne);
    assert_eq!(motion.release(0.2), None);
}

#[test]
fn test_force_launch_reset_along_axis() {
    let mut reset = CharacterMotion::new(MotionTuning::default()).unwrap();
    reset.observe_physics(Vec2::ZERO, Vec2::new(0.0, -300.0));
    let mut keep = reset.clone();

    let reset_velocity = reset.force_launch(0.0, Vec2::Y, 500.0, true).unwrap();
    let kept_velocity = keep.force_launch(0.0, Vec2::Y, 500.0, false).unwrap();

    assert!(approx(reset_velocity.y, 500.0));
    assert!(approx(kept_velocity.y, 200.0));
}

#[test]
fn test_force_launch_sets_airborne_lock_from_launch() {
    let mut motion = grounded(MotionTuning::default());
    motion.force_launch(0.0, Vec2::new(1.0, 1.0), 400.0, true);

    let expected = 400.0 * std::f32::consts::FRAC_1_SQRT_2;
    assert!(approx(motion.airborne_horizontal_velocity(), expected));
    assert!(approx(motion.integrate(0.05, -1.0).x, expected));
    assert!(!motion.can_begin_charge(0.05));
}

#[test]
fn test_force_launch_with_zero_direction_is_ignored() {
    let mut motion = grounded(MotionTuning::default());
    motion.begin_charge(0.0, 0.0);

    assert_eq!(motion.force_launch(0.1, Vec2::ZERO, 500.0, true), None);
    assert!(motion.is_charging());
    assert_eq!(motion.ground_state(), GroundState::Grounded);
}

#[test]
fn test_velocity_delta_pushes_airborne_lock() {
    let (mut motion, launch) = jumped(MotionTuning::default(), 1.0, 0.2);
    motion.add_velocity_delta(-30.0);
    motion.add_velocity_delta(-20.0);

    assert!(approx(motion.integrate(0.25, 1.0).x, launch.velocity.x - 50.0));
}

#[derive(Resource)]
struct Target(Entity);

fn issue_impulses(target: Res<Target>, mut gateway: ImpulseGateway) {
    gateway.force_launch(target.0, Vec2::Y, 200.0, true);
    gateway.force_launch(target.0, Vec2::Y, 300.0, true);
    gateway.add_velocity_delta(target.0, 10.0);
    gateway.add_velocity_delta(target.0, 5.0);
    gateway.set_gravity_scale(target.0, 0.5);
}

#[test]
fn test_gateway_commands_apply_in_issue_order() {
    let mut app = App::new();
    app.init_resource::<Time>()
        .add_message::<ImpulseCommand>()
        .add_systems(Update, (issue_impulses, apply_impulse_commands).chain());

    let motion = CharacterMotion::new(MotionTuning::default()).unwrap();
    let entity = app.world_mut().spawn(motion).id();
    app.insert_resource(Target(entity));

    app.update();

    let motion = app.world().get::<CharacterMotion>(entity).unwrap();
    // Second launch resets the first along its axis
    assert!(approx(motion.velocity().y, 300.0));
    assert!(approx(motion.airborne_horizontal_velocity(), 15.0));
    assert_eq!(motion.gravity_scale(), 0.5);
}

#[test]
fn test_gateway_cancel_reaches_charging_character() {
    let mut app = App::new();
    app.init_resource::<Time>()
        .add_message::<ImpulseCommand>()
        .add_systems(Update, apply_impulse_commands);

    let entity = app.world_mut().spawn(grounded(MotionTuning::default())).id();
    app.world_mut()
        .get_mut::<CharacterMotion>(entity)
        .unwrap()
        .begin_charge(0.0, 0.0);

    for _ in 0..2 {
        app.world_mut().write_message(ImpulseCommand {
            target: entity,
            kind: ImpulseKind::CancelCharge,
        });
    }
    app.update();

    let motion = app.world().get::<CharacterMotion>(entity).unwrap();
    assert_eq!(motion.charge_state(), ChargeState::NotCharging);
    assert_eq!(motion.ground_state(), GroundState::Grounded);
}

// -----------------------------------------------------------------------------
// Configuration
// -----------------------------------------------------------------------------

#[test]
fn test_construction_rejects_non_positive_windows() {
    let zero_limit = MotionTuning {
        jump_time_limit: 0.0,
        ..default()
    };
    assert_eq!(
        CharacterMotion::new(zero_limit).unwrap_err(),
        TuningError::NotPositive {
            field: "jump_time_limit",
            value: 0.0,
        }
    );

    let negative_coyote = MotionTuning {
        coyote_time: -0.1,
        ..default()
    };
    assert_eq!(
        CharacterMotion::new(negative_coyote).unwrap_err(),
        TuningError::NotPositive {
            field: "coyote_time",
            value: -0.1,
        }
    );
}

#[test]
fn test_validation_rejects_out_of_range_values() {
    let tuning = MotionTuning {
        damping: 1.5,
        ..default()
    };
    assert!(matches!(
        tuning.validate(),
        Err(TuningError::OutOfUnitRange {
            field: "damping",
            ..
        })
    ));

    let tuning = MotionTuning {
        bounce_lock_time: 0.5,
        takeoff_lock_time: 0.1,
        ..default()
    };
    assert!(matches!(
        tuning.validate(),
        Err(TuningError::BounceLockTooLong { .. })
    ));

    let tuning = MotionTuning {
        move_speed: f32::INFINITY,
        ..default()
    };
    assert!(tuning.validate().is_err());
}

#[test]
fn test_infinite_time_windows_are_rejected() {
    let infinite_limit = MotionTuning {
        jump_time_limit: f32::INFINITY,
        ..default()
    };
    assert_eq!(
        infinite_limit.validate(),
        Err(TuningError::NotPositive {
            field: "jump_time_limit",
            value: f32::INFINITY,
        })
    );

    let infinite_coyote = MotionTuning {
        coyote_time: f32::INFINITY,
        ..default()
    };
    assert!(CharacterMotion::new(infinite_coyote).is_err());
}

#[test]
fn test_tuning_error_messages_name_the_field() {
    let err = TuningError::NotPositive {
        field: "coyote_time",
        value: 0.0,
    };
    assert!(err.to_string().contains("coyote_time"));
}

// -----------------------------------------------------------------------------
// Physics adapters
// -----------------------------------------------------------------------------

#[test]
fn test_oriented_normal_points_at_character() {
    // Surface first: the manifold normal already points at the character
    assert_eq!(oriented_normal(Vec2::Y, false), Vec2::Y);
    // Character first: the manifold normal points at the surface
    assert_eq!(oriented_normal(Vec2::NEG_Y, true), Vec2::Y);
    assert_eq!(oriented_normal(Vec2::X, true), Vec2::NEG_X);
}

#[test]
fn test_manifold_order_decides_floor_or_ceiling() {
    // Character standing on a floor, reported with the character first
    let floor = summarize_manifolds([(Vec2::NEG_Y, 2)], true);
    assert_eq!(floor.kind(), Some(SurfaceKind::Ground));

    // Same normal with the surface first is a ceiling above the character
    let ceiling = summarize_manifolds([(Vec2::NEG_Y, 2)], false);
    assert_eq!(ceiling.kind(), Some(SurfaceKind::Ceiling));
}

#[test]
fn test_manifold_summary_counts_points_and_skips_empty_manifolds() {
    let contact = summarize_manifolds([(Vec2::X, 0), (Vec2::NEG_X, 1), (Vec2::Y, 2)], false);

    assert_eq!(contact.point_count, 3);
    assert_eq!(contact.normal, Vec2::NEG_X);
}

#[test]
fn test_manifolds_without_points_are_ignored() {
    let contact = summarize_manifolds([(Vec2::Y, 0)], false);
    assert_eq!(contact.point_count, 0);
    assert_eq!(contact.normal, Vec2::ZERO);

    let (mut motion, _) = jumped(MotionTuning::default(), 1.0, 0.4);
    assert_eq!(motion.react_to_contact(1.0, contact), ContactReaction::Ignored);
    assert_eq!(motion.ground_state(), GroundState::Airborne);

    let empty = summarize_manifolds(std::iter::empty(), true);
    assert_eq!(empty.point_count, 0);
}

#[derive(Resource, Default)]
struct Landings(usize);

fn count_landings(mut reader: MessageReader<LandedEvent>, mut landings: ResMut<Landings>) {
    landings.0 += reader.read().count();
}

fn sensing_app() -> App {
    let mut app = App::new();
    app.init_resource::<Time>()
        .init_resource::<SpatialQueryPipeline>()
        .init_resource::<Landings>()
        .add_message::<LandedEvent>()
        .add_systems(Update, (sense_ground, count_landings).chain());
    app
}

#[test]
fn test_character_without_ground_sensor_is_never_grounded() {
    let mut app = sensing_app();

    let airborne = app
        .world_mut()
        .spawn((
            CharacterMotion::new(MotionTuning::default()).unwrap(),
            Transform::default(),
        ))
        .id();
    let was_grounded = app
        .world_mut()
        .spawn((grounded(MotionTuning::default()), Transform::default()))
        .id();

    app.update();
    app.update();

    let world = app.world();
    let state = |entity: Entity| world.get::<CharacterMotion>(entity).unwrap().ground_state();
    assert_eq!(state(airborne), GroundState::Airborne);
    assert_ne!(state(was_grounded), GroundState::Grounded);
    assert_eq!(world.resource::<Landings>().0, 0);
}

#[test]
fn test_sensor_over_empty_world_leaves_ground() {
    let mut app = sensing_app();
    let tuning = MotionTuning::default();

    let entity = app
        .world_mut()
        .spawn((
            grounded(tuning.clone()),
            GroundSensor::new(Vec2::new(0.0, -24.0), tuning.foot_width, tuning.ground_ray_depth),
            Transform::default(),
        ))
        .id();

    app.update();

    let motion = app.world().get::<CharacterMotion>(entity).unwrap();
    assert_eq!(motion.ground_state(), GroundState::CoyoteWindow);
    assert_eq!(app.world().resource::<Landings>().0, 0);
}
