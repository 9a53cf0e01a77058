// Host-side tests for the inertial rotation controller.

use crossfield_core::{InertialRotationController, RotationParams, SpinSource};

const DT: f32 = 1.0 / 60.0;

fn controller() -> InertialRotationController {
    InertialRotationController::new(RotationParams::default())
}

#[test]
fn starts_with_idle_spin() {
    let c = controller();
    assert_eq!(c.rotation(), 0.0);
    assert_eq!(c.angular_velocity(), c.params.idle_speed);
    assert_eq!(c.source(), SpinSource::Idle);
    assert!(!c.is_dragging());
}

#[test]
fn drag_rotates_directly_and_flings_on_release() {
    let mut c = controller();
    c.begin_drag(100.0);
    assert_eq!(c.angular_velocity(), 0.0);
    c.drag_to(150.0);
    let sens = c.params.drag_sensitivity;
    let inertia = c.params.drag_inertia;
    assert!((c.rotation() - 50.0 * sens).abs() < 1e-6);
    assert!((c.angular_velocity() - 50.0 * inertia).abs() < 1e-6);

    // only the latest delta sets the velocity
    c.drag_to(160.0);
    assert!((c.angular_velocity() - 10.0 * inertia).abs() < 1e-6);
    assert!((c.rotation() - 60.0 * sens).abs() < 1e-6);

    c.end_drag();
    assert!(!c.is_dragging());
    assert!((c.angular_velocity() - 10.0 * inertia).abs() < 1e-6);
}

#[test]
fn friction_decays_fling_each_tick() {
    let mut c = controller();
    c.begin_drag(0.0);
    c.drag_to(200.0);
    c.end_drag();
    let v0 = c.angular_velocity();
    let r0 = c.rotation();
    c.tick(DT, false);
    let v1 = c.angular_velocity();
    assert!((v1 - v0 * c.params.friction).abs() < 1e-6);
    assert!((c.rotation() - (r0 + v1 * DT)).abs() < 1e-5);
}

#[test]
fn ambient_spin_never_stops() {
    let mut c = controller();
    c.begin_drag(500.0);
    c.drag_to(300.0);
    c.end_drag();
    assert!(c.angular_velocity() < 0.0);
    for _ in 0..5000 {
        c.tick(DT, false);
    }
    let v = c.angular_velocity();
    // settles on the floor in the flung direction
    assert!(v < 0.0, "velocity {v}");
    assert!((v.abs() - c.params.idle_speed).abs() < 1e-4, "velocity {v} off the floor");
    assert_eq!(c.source(), SpinSource::Idle);
}

#[test]
fn idle_spin_holds_the_floor_from_rest() {
    let mut c = controller();
    c.begin_drag(0.0);
    c.end_drag();
    assert_eq!(c.angular_velocity(), 0.0);
    let mut prev = 0.0;
    for _ in 0..3000 {
        c.tick(DT, false);
        let v = c.angular_velocity();
        assert!(v >= prev, "idle ease went backwards: {v} < {prev}");
        assert!(v <= c.params.idle_speed + 1e-6, "overshot the floor: {v}");
        prev = v;
    }
    assert!((prev - c.params.idle_speed).abs() < 1e-4, "settled at {prev}");
}

#[test]
fn active_gesture_lets_velocity_decay() {
    let mut c = controller();
    for _ in 0..2000 {
        c.tick(DT, true);
    }
    assert!(c.angular_velocity().abs() < 1e-6);
}

#[test]
fn hand_motion_spins_against_travel() {
    let mut c = controller();
    let v0 = c.angular_velocity();
    c.apply_hand_x(0.5);
    assert_eq!(c.angular_velocity(), v0, "first sample only records position");
    c.apply_hand_x(0.6);
    let expected = v0 - 0.1 * c.params.gesture_sensitivity;
    assert!((c.angular_velocity() - expected).abs() < 1e-5);
    assert_eq!(c.source(), SpinSource::Gesture);
}

#[test]
fn drag_suppresses_hand_input() {
    let mut c = controller();
    c.begin_drag(10.0);
    c.apply_hand_x(0.2);
    c.apply_hand_x(0.9);
    assert_eq!(c.angular_velocity(), 0.0);
    assert_eq!(c.source(), SpinSource::Drag);

    // the hand position was still tracked, so the first post-drag sample does not jump
    c.end_drag();
    c.apply_hand_x(0.9);
    assert_eq!(c.angular_velocity(), 0.0);
}

#[test]
fn tick_is_a_no_op_while_dragging() {
    let mut c = controller();
    c.begin_drag(0.0);
    c.drag_to(40.0);
    let (r, v) = (c.rotation(), c.angular_velocity());
    for _ in 0..10 {
        c.tick(DT, false);
    }
    assert_eq!(c.rotation(), r);
    assert_eq!(c.angular_velocity(), v);
}

#[test]
fn release_hand_prevents_jump_on_return() {
    let mut c = controller();
    c.apply_hand_x(0.1);
    c.release_hand();
    let v = c.angular_velocity();
    c.apply_hand_x(0.9);
    assert_eq!(c.angular_velocity(), v);
}

#[test]
fn cancel_gesture_spin_keeps_drag_momentum() {
    let mut c = controller();
    c.apply_hand_x(0.2);
    c.apply_hand_x(0.5);
    assert_ne!(c.angular_velocity(), 0.0);
    c.cancel_gesture_spin();
    assert_eq!(c.angular_velocity(), 0.0);
    assert_eq!(c.source(), SpinSource::Idle);

    c.begin_drag(0.0);
    c.drag_to(100.0);
    c.end_drag();
    let flung = c.angular_velocity();
    c.cancel_gesture_spin();
    assert_eq!(c.angular_velocity(), flung);
}

#[test]
fn rotation_stays_within_one_turn() {
    let mut c = controller();
    c.begin_drag(0.0);
    for i in 1..=200 {
        c.drag_to(i as f32 * 97.0);
        let r = c.rotation();
        assert!((0.0..=std::f32::consts::TAU).contains(&r), "rotation {r}");
    }
}
