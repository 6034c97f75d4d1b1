//! Motion domain: tests for derived constants, grace windows, jumps and integration.

use std::sync::{Arc, Mutex};

use bevy::prelude::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;

type EventLog = Arc<Mutex<Vec<ControllerEvent>>>;

fn build(params: ControllerParams) -> PlatformerController {
    PlatformerController::new(params).expect("params should be valid")
}

fn record(controller: &mut PlatformerController) -> EventLog {
    let log: EventLog = Arc::default();
    let sink = Arc::clone(&log);
    controller.subscribe(move |event| sink.lock().unwrap().push(*event));
    log
}

fn take(log: &EventLog) -> Vec<ControllerEvent> {
    std::mem::take(&mut *log.lock().unwrap())
}

fn idle(controller: &mut PlatformerController, body: &mut PlaneBody, dt: f32, steps: usize) {
    for _ in 0..steps {
        controller.step(MoveInput::default(), body, dt);
    }
}

/// Jump from rest on a floor at y = 0; returns apex height, time and vertical velocity there.
fn measure_apex(params: ControllerParams, hold: bool, dt: f32) -> (f32, f32, f32) {
    let mut controller = build(params);
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 5);

    assert_eq!(controller.press_jump(&body), JumpOutcome::Ground);
    if !hold {
        controller.release_jump();
    }

    let mut apex = 0.0_f32;
    let mut apex_time = 0.0;
    let mut apex_velocity = f32::MAX;
    let steps = (2.0 * controller.params().jump_duration / dt) as usize;
    for i in 1..=steps {
        let result = controller.step(MoveInput::default(), &mut body, dt);
        let height = -result.position.y;
        if height > apex {
            apex = height;
            apex_time = i as f32 * dt;
            apex_velocity = result.velocity.y;
        }
    }
    (apex, apex_time, apex_velocity)
}

fn approx(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

// -----------------------------------------------------------------------------
// Derived constants
// -----------------------------------------------------------------------------

#[test]
fn test_derived_constants_for_defaults() {
    let derived = DerivedConstants::from_params(&ControllerParams::default());

    assert!(approx(derived.default_gravity, 3333.333, 0.01));
    assert!(approx(derived.jump_velocity, 1000.0, 0.001));
    assert!(approx(derived.double_jump_velocity, 816.4966, 0.01));
    assert!(approx(derived.release_gravity_multiplier, 2.5, 0.0001));
}

#[test]
fn test_double_jump_velocity_keeps_height_sign() {
    let g = gravity(-150.0, 0.3);
    assert!(g < 0.0);
    assert!(jump_velocity_for_gravity(-100.0, g) < 0.0);
    assert!(jump_velocity_for_gravity(100.0, g) > 0.0);
    assert_eq!(jump_velocity_for_gravity(0.0, g), 0.0);
}

#[test]
fn test_release_multiplier_positive_for_inverted_gravity() {
    let g = gravity(-150.0, 0.3);
    let v = jump_velocity(-150.0, 0.3);
    assert!(approx(release_gravity_multiplier(v, -60.0, g), 2.5, 0.0001));
}

// -----------------------------------------------------------------------------
// Parameter validation
// -----------------------------------------------------------------------------

#[test]
fn test_default_params_are_valid() {
    assert!(ControllerParams::default().validate().is_ok());
}

#[test]
fn test_zero_duration_fails_fast() {
    let params = ControllerParams {
        jump_duration: 0.0,
        ..Default::default()
    };
    assert_eq!(
        PlatformerController::new(params).unwrap_err(),
        ParamsError::NonPositiveDuration(0.0)
    );
}

#[test]
fn test_min_height_above_max_rejected() {
    let params = ControllerParams {
        min_jump_height: 200.0,
        ..Default::default()
    };
    assert!(matches!(
        params.validate(),
        Err(ParamsError::MinAboveMax { .. })
    ));
}

#[test]
fn test_non_finite_and_mixed_direction_rejected() {
    let nan = ControllerParams {
        friction: f32::NAN,
        ..Default::default()
    };
    let err = nan.validate().unwrap_err();
    assert!(matches!(err, ParamsError::NonFinite { field: "friction", .. }));
    assert!(err.to_string().contains("friction"));

    let mixed = ControllerParams {
        min_jump_height: -60.0,
        ..Default::default()
    };
    assert!(matches!(
        mixed.validate(),
        Err(ParamsError::MixedGravityDirection { .. })
    ));

    let zero_min = ControllerParams {
        min_jump_height: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        zero_min.validate(),
        Err(ParamsError::ZeroHeight { field: "min_jump_height" })
    ));
}

#[test]
fn test_non_positive_windows_are_disabled_not_invalid() {
    let params = ControllerParams {
        coyote_time: -1.0,
        jump_buffer: 0.0,
        ..Default::default()
    };
    let controller = build(params);
    assert!(controller.grace().coyote().is_none());
    assert!(controller.grace().jump_buffer().is_none());
}

// -----------------------------------------------------------------------------
// Grace windows
// -----------------------------------------------------------------------------

#[test]
fn test_countdown_lifecycle() {
    let mut timer = Countdown::new(0.1);
    assert_eq!(timer.duration(), 0.1);
    assert!(timer.is_stopped());
    assert!(!timer.is_active());

    timer.start();
    assert!(timer.is_running());
    timer.advance(0.05);
    assert!(timer.is_active());
    assert!(approx(timer.elapsed(), 0.05, 1e-6));

    timer.advance(0.06);
    assert!(!timer.is_active());
    assert!(timer.is_stopped());

    timer.start();
    assert_eq!(timer.elapsed(), 0.0);
    assert!(timer.is_active());
    timer.stop();
    assert!(!timer.is_active());
}

#[test]
fn test_countdown_includes_end_of_window() {
    let dt = 1.0 / 60.0;
    let mut timer = Countdown::new(0.1);
    timer.start();
    for _ in 0..6 {
        timer.advance(dt);
    }
    assert!(timer.elapsed() > 0.1);
    assert!(timer.is_active());

    timer.advance(dt);
    assert!(!timer.is_active());
    assert!(timer.is_stopped());
}

#[test]
fn test_disabled_windows_always_inactive() {
    let mut windows = GraceWindows::new(0.0, 0.0);
    windows.start_coyote();
    assert!(!windows.start_jump_buffer());
    assert!(!windows.is_coyote_active());
    assert!(!windows.is_buffer_active());
}

#[test]
fn test_coyote_restart_resets_to_full_duration() {
    let mut windows = GraceWindows::new(0.1, 0.1);
    windows.start_coyote();
    windows.advance(0.08);
    windows.start_coyote();
    windows.advance(0.08);
    assert!(windows.is_coyote_active());
    windows.stop_coyote();
    assert!(!windows.is_coyote_active());
}

// -----------------------------------------------------------------------------
// Jump arcs
// -----------------------------------------------------------------------------

#[test]
fn test_held_jump_reaches_max_height_at_duration() {
    let params = ControllerParams::default();
    let (apex, apex_time, apex_velocity) = measure_apex(params, true, 1.0 / 2000.0);

    assert!(approx(apex, 150.0, 1.5), "apex was {}", apex);
    assert!(approx(apex_time, 0.3, 0.005), "apex time was {}", apex_time);
    assert!(apex_velocity.abs() < 10.0, "apex velocity was {}", apex_velocity);
}

#[test]
fn test_held_jump_apex_matches_height_for_random_params() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x6a75_6d70);
    let dt = 1.0 / 2000.0;

    for _ in 0..12 {
        let height: f32 = rng.random_range(20.0..400.0);
        let duration: f32 = rng.random_range(0.15..0.8);
        let params = ControllerParams {
            max_jump_height: height,
            min_jump_height: height * 0.4,
            jump_duration: duration,
            ..Default::default()
        };

        let (apex, apex_time, _) = measure_apex(params, true, dt);
        assert!(
            approx(apex, height, height * 0.01),
            "H={} T={} apex={}",
            height,
            duration,
            apex
        );
        assert!(
            approx(apex_time, duration, duration * 0.02),
            "H={} T={} apex_time={}",
            height,
            duration,
            apex_time
        );
    }
}

#[test]
fn test_released_jump_caps_at_min_height() {
    for max_height in [150.0, 300.0] {
        let params = ControllerParams {
            max_jump_height: max_height,
            min_jump_height: 60.0,
            ..Default::default()
        };
        let (apex, _, _) = measure_apex(params, false, 1.0 / 4000.0);
        assert!(
            approx(apex, 60.0, 0.9),
            "max={} apex={}",
            max_height,
            apex
        );
    }
}

// -----------------------------------------------------------------------------
// Coyote time
// -----------------------------------------------------------------------------

/// Walk off a ledge, wait `airborne_steps` of length `dt` and press jump.
fn press_after_leaving_ground(
    dt: f32,
    airborne_steps: usize,
) -> (JumpOutcome, PlatformerController) {
    let mut controller = build(ControllerParams::default());
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 5);

    body.floor = None;
    idle(&mut controller, &mut body, dt, 1);
    assert!(!body.is_on_floor());
    idle(&mut controller, &mut body, dt, airborne_steps);

    let outcome = controller.press_jump(&body);
    (outcome, controller)
}

#[test]
fn test_coyote_jump_inside_window_is_ground_jump() {
    let (outcome, controller) = press_after_leaving_ground(0.01, 5);
    assert_eq!(outcome, JumpOutcome::Ground);
    assert_eq!(controller.state().jump_type, JumpType::Ground);
    assert_eq!(controller.state().jumps_left, 1);
    assert!(!controller.grace().is_coyote_active());
}

#[test]
fn test_coyote_jump_after_window_spends_air_jump() {
    let (outcome, controller) = press_after_leaving_ground(0.01, 11);
    assert_eq!(outcome, JumpOutcome::Air);
    assert_eq!(controller.state().jump_type, JumpType::Air);
    assert_eq!(controller.state().jumps_left, 0);
}

#[test]
fn test_coyote_window_end_is_inclusive_at_60hz() {
    let dt = 1.0 / 60.0;

    let (outcome, _) = press_after_leaving_ground(dt, 6);
    assert_eq!(outcome, JumpOutcome::Ground);

    let (outcome, _) = press_after_leaving_ground(dt, 7);
    assert_eq!(outcome, JumpOutcome::Air);
}

#[test]
fn test_coyote_jump_after_window_without_air_jumps_fails() {
    let dt = 0.01;
    let params = ControllerParams {
        double_jumps: 0,
        jump_buffer: 0.0,
        ..Default::default()
    };
    let mut controller = build(params);
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 5);
    body.floor = None;
    idle(&mut controller, &mut body, dt, 12);

    let before = controller.velocity();
    assert_eq!(controller.press_jump(&body), JumpOutcome::Ignored);
    assert_eq!(controller.velocity(), before);
}

#[test]
fn test_no_second_ground_jump_from_coyote() {
    let dt = 0.01;
    let mut controller = build(ControllerParams {
        double_jumps: 0,
        ..Default::default()
    });
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 5);

    assert_eq!(controller.press_jump(&body), JumpOutcome::Ground);
    idle(&mut controller, &mut body, dt, 2);
    assert!(!controller.can_ground_jump(&body));
    assert!(!controller.can_double_jump(&body));
    assert_eq!(controller.press_jump(&body), JumpOutcome::Buffered);
}

// -----------------------------------------------------------------------------
// Jump buffer
// -----------------------------------------------------------------------------

fn dropping_setup() -> (PlatformerController, PlaneBody, EventLog) {
    let params = ControllerParams {
        double_jumps: 0,
        ..Default::default()
    };
    let mut controller = build(params);
    let log = record(&mut controller);
    let body = PlaneBody::new(Vec2::new(0.0, -400.0), Some(0.0), None);
    (controller, body, log)
}

/// Number of steps of length `dt` run before the step that reports the landing.
fn landing_step(dt: f32) -> usize {
    let (mut controller, mut body, log) = dropping_setup();
    for i in 0..1000 {
        controller.step(MoveInput::default(), &mut body, dt);
        if take(&log).contains(&ControllerEvent::HitGround) {
            return i;
        }
    }
    panic!("body never landed");
}

#[test]
fn test_buffered_press_jumps_on_landing_step() {
    let landing = landing_step(0.01);
    assert!(landing > 25);

    let (mut controller, mut body, log) = dropping_setup();
    idle(&mut controller, &mut body, 0.01, landing - 5);
    assert_eq!(controller.press_jump(&body), JumpOutcome::Buffered);

    idle(&mut controller, &mut body, 0.01, 5);
    assert!(take(&log).is_empty());

    controller.step(MoveInput::default(), &mut body, 0.01);
    assert_eq!(
        take(&log),
        vec![
            ControllerEvent::HitGround,
            ControllerEvent::Jumped { ground: true }
        ]
    );
    assert_eq!(controller.state().jump_type, JumpType::Ground);
    assert!(controller.velocity().y < 0.0);
    assert!(!controller.grace().is_buffer_active());
}

#[test]
fn test_stale_buffered_press_is_dropped() {
    let landing = landing_step(0.01);

    let (mut controller, mut body, log) = dropping_setup();
    idle(&mut controller, &mut body, 0.01, landing - 21);
    assert_eq!(controller.press_jump(&body), JumpOutcome::Buffered);

    idle(&mut controller, &mut body, 0.01, 22);
    assert_eq!(take(&log), vec![ControllerEvent::HitGround]);
    assert_eq!(controller.state().jump_type, JumpType::None);
}

/// Press jump so that the landing step is the `steps_to_landing`-th step after
/// the press; returns the events of that landing step.
fn buffered_press_before_landing(dt: f32, steps_to_landing: usize) -> Vec<ControllerEvent> {
    let landing = landing_step(dt);
    assert!(landing >= steps_to_landing);

    let (mut controller, mut body, log) = dropping_setup();
    idle(&mut controller, &mut body, dt, landing + 1 - steps_to_landing);
    assert_eq!(controller.press_jump(&body), JumpOutcome::Buffered);
    idle(&mut controller, &mut body, dt, steps_to_landing - 1);
    assert!(take(&log).is_empty());

    controller.step(MoveInput::default(), &mut body, dt);
    take(&log)
}

#[test]
fn test_jump_buffer_end_is_inclusive_at_60hz() {
    let dt = 1.0 / 60.0;

    assert_eq!(
        buffered_press_before_landing(dt, 6),
        vec![
            ControllerEvent::HitGround,
            ControllerEvent::Jumped { ground: true }
        ]
    );
    assert_eq!(
        buffered_press_before_landing(dt, 7),
        vec![ControllerEvent::HitGround]
    );
}

#[test]
fn test_press_on_touchdown_jumps_once() {
    let (mut controller, mut body, log) = dropping_setup();
    let mut touched = false;
    for _ in 0..1000 {
        let result = controller.step(MoveInput::default(), &mut body, 0.01);
        if result.contacts.floor {
            touched = true;
            break;
        }
    }
    assert!(touched);
    assert!(take(&log).is_empty());

    assert_eq!(controller.press_jump(&body), JumpOutcome::Ground);
    controller.step(MoveInput::default(), &mut body, 0.01);

    assert_eq!(
        take(&log),
        vec![
            ControllerEvent::Jumped { ground: true },
            ControllerEvent::HitGround
        ]
    );
    assert_eq!(controller.state().jump_type, JumpType::Ground);
    assert!(!controller.grace().is_coyote_active());
}

// -----------------------------------------------------------------------------
// Air jumps and landing
// -----------------------------------------------------------------------------

#[test]
fn test_two_air_jumps_then_ignored() {
    let dt = 0.01;
    let params = ControllerParams {
        double_jumps: 2,
        jump_buffer: 0.0,
        ..Default::default()
    };
    let mut controller = build(params);
    let log = record(&mut controller);
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 5);
    take(&log);

    assert_eq!(controller.press_jump(&body), JumpOutcome::Ground);
    idle(&mut controller, &mut body, dt, 20);
    assert_eq!(controller.press_jump(&body), JumpOutcome::Air);
    assert_eq!(controller.state().jumps_left, 1);
    idle(&mut controller, &mut body, dt, 5);
    assert_eq!(controller.press_jump(&body), JumpOutcome::Air);
    assert_eq!(controller.state().jumps_left, 0);
    assert_eq!(
        take(&log),
        vec![
            ControllerEvent::Jumped { ground: true },
            ControllerEvent::Jumped { ground: false },
            ControllerEvent::Jumped { ground: false },
        ]
    );

    let before = *controller.state();
    assert_eq!(controller.press_jump(&body), JumpOutcome::Ignored);
    assert_eq!(controller.state().velocity, before.velocity);
    assert_eq!(controller.state().jumps_left, 0);
    assert_eq!(controller.state().jump_type, JumpType::Air);
    assert!(take(&log).is_empty());

    // Landing restores the full allotment and emits a single notification.
    for _ in 0..400 {
        controller.step(MoveInput::default(), &mut body, dt);
    }
    assert_eq!(take(&log), vec![ControllerEvent::HitGround]);
    assert_eq!(controller.state().jumps_left, 2);
    assert_eq!(controller.state().jump_type, JumpType::None);
}

#[test]
fn test_air_jump_with_none_left_is_noop() {
    let mut controller = build(ControllerParams {
        double_jumps: 0,
        ..Default::default()
    });
    let log = record(&mut controller);
    let before = *controller.state();

    assert!(!controller.air_jump());
    assert_eq!(*controller.state(), before);
    assert!(take(&log).is_empty());
}

#[test]
fn test_air_jump_does_not_use_release_gravity() {
    let policy = GravityPolicy {
        falling: 1.5,
        release: 2.5,
    };
    assert_eq!(policy.multiplier(-100.0, 3000.0, false, JumpType::Air), 1.0);
    assert_eq!(policy.multiplier(-100.0, 3000.0, false, JumpType::Ground), 2.5);
    assert_eq!(policy.multiplier(-100.0, 3000.0, false, JumpType::None), 2.5);
    assert_eq!(policy.multiplier(-100.0, 3000.0, true, JumpType::Ground), 1.0);
    assert_eq!(policy.multiplier(100.0, 3000.0, true, JumpType::Air), 1.5);
    assert_eq!(policy.multiplier(0.0, 3000.0, false, JumpType::Ground), 1.0);
}

#[test]
fn test_gravity_policy_follows_inverted_gravity() {
    let policy = GravityPolicy {
        falling: 1.5,
        release: 2.5,
    };
    assert_eq!(policy.multiplier(-100.0, -3000.0, false, JumpType::Ground), 1.5);
    assert_eq!(policy.multiplier(100.0, -3000.0, false, JumpType::Ground), 2.5);
}

#[test]
fn test_inverted_gravity_grounds_on_ceiling() {
    let params = ControllerParams {
        max_jump_height: -150.0,
        min_jump_height: -60.0,
        double_jump_height: -100.0,
        ..Default::default()
    };
    let mut controller = build(params);
    let mut body = PlaneBody::new(Vec2::ZERO, None, Some(0.0));
    idle(&mut controller, &mut body, 0.01, 3);

    assert!(body.is_on_ceiling());
    assert!(controller.is_on_ground(&body));
    assert_eq!(controller.press_jump(&body), JumpOutcome::Ground);
    assert!(approx(controller.velocity().y, 1000.0, 0.01));

    let floor_body = PlaneBody::on_floor(0.0, 0.0);
    assert!(!controller.is_on_ground(&floor_body));
}

// -----------------------------------------------------------------------------
// Horizontal integration
// -----------------------------------------------------------------------------

#[test]
fn test_horizontal_tie_break() {
    let both = MoveInput {
        left: true,
        right: true,
    };
    assert_eq!(horizontal_acceleration(both, 100.0, TieBreak::RightWins), 100.0);
    assert_eq!(horizontal_acceleration(both, 100.0, TieBreak::Neutral), 0.0);
    let left = MoveInput {
        left: true,
        right: false,
    };
    assert_eq!(horizontal_acceleration(left, 100.0, TieBreak::RightWins), -100.0);
    assert_eq!(
        horizontal_acceleration(MoveInput::default(), 100.0, TieBreak::RightWins),
        0.0
    );
}

#[test]
fn test_both_directions_held_moves_right_by_default() {
    let dt = 0.01;
    let mut controller = build(ControllerParams::default());
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    let input = MoveInput {
        left: true,
        right: true,
    };
    controller.step(input, &mut body, dt);
    assert!(approx(controller.velocity().x, 100.0, 1e-3));
    assert!(body.position.x > 0.0);
}

#[test]
fn test_friction_decays_without_overshoot() {
    let dt = 0.01;
    let mut controller = build(ControllerParams::default());
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    idle(&mut controller, &mut body, dt, 3);

    for start in [300.0_f32, -300.0] {
        controller.set_velocity(Vec2::new(start, 0.0));
        let mut previous = start;
        for _ in 0..60 {
            controller.step(MoveInput::default(), &mut body, dt);
            let vx = controller.velocity().x;
            let expected = previous / (1.0 + dt * 20.0);
            assert!(approx(vx, expected, expected.abs() * 1e-5));
            assert_eq!(vx.signum(), start.signum());
            assert!(vx.abs() < previous.abs());
            previous = vx;
        }
    }
}

#[test]
fn test_integrate_applies_friction_before_acceleration() {
    let velocity = integrate(Vec2::new(10.0, 0.0), Vec2::new(100.0, 50.0), 10.0, 0.1);
    assert!(approx(velocity.x, 15.0, 1e-5));
    assert!(approx(velocity.y, 5.0, 1e-5));
    assert_eq!(apply_friction(0.0, 20.0, 0.1), 0.0);
}

#[test]
fn test_invalid_dt_leaves_state_untouched() {
    let mut controller = build(ControllerParams::default());
    let mut body = PlaneBody::on_floor(0.0, 0.0);
    let before = *controller.state();
    controller.step(MoveInput::default(), &mut body, 0.0);
    controller.step(MoveInput::default(), &mut body, f32::NAN);
    assert_eq!(*controller.state(), before);
}

// -----------------------------------------------------------------------------
// Observers
// -----------------------------------------------------------------------------

#[test]
fn test_unsubscribed_observer_stops_receiving() {
    let mut controller = build(ControllerParams::default());
    let log = record(&mut controller);
    let other: EventLog = Arc::default();
    let sink = Arc::clone(&other);
    let id = controller.subscribe(move |event| sink.lock().unwrap().push(*event));

    let mut body = PlaneBody::on_floor(0.0, 0.0);
    controller.step(MoveInput::default(), &mut body, 0.01);
    assert!(controller.unsubscribe(id));
    assert!(!controller.unsubscribe(id));
    controller.press_jump(&body);

    assert_eq!(
        take(&log),
        vec![
            ControllerEvent::HitGround,
            ControllerEvent::Jumped { ground: true }
        ]
    );
    assert_eq!(take(&other), vec![ControllerEvent::HitGround]);
}

#[test]
fn test_observer_list_tracks_subscriptions() {
    let mut observers = Observers::default();
    assert!(observers.is_empty());

    let first = observers.subscribe(|_| {});
    let second = observers.subscribe(|_| {});
    assert_ne!(first, second);
    assert_eq!(observers.len(), 2);

    assert!(observers.unsubscribe(first));
    assert_eq!(observers.len(), 1);
    assert!(observers.unsubscribe(second));
    assert!(observers.is_empty());
}
