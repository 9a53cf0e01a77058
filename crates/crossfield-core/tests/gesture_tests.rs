// Host-side tests for landmark validation and gesture classification.

use crossfield_core::landmarks::LANDMARK_COUNT;
use crossfield_core::{
    Finger, GestureClassifier, GestureEvent, GestureParams, GestureStatus, HandPose, HandSample,
    Handedness, LandmarkError, RawHand,
};
use glam::Vec2;

const POINT: [bool; 5] = [false, true, false, false, false];
const VICTORY: [bool; 5] = [false, true, true, false, false];
const THREE: [bool; 5] = [false, false, true, true, true];
const OPEN: [bool; 5] = [true; 5];
const FIST: [bool; 5] = [false; 5];

fn hand_at(x: f32, extended: [bool; 5]) -> HandSample {
    let raw = RawHand::synthetic(Handedness::Right, Vec2::new(x, 0.8), extended);
    HandSample::from_raw(&raw).expect("synthetic hand is valid")
}

fn hand(extended: [bool; 5]) -> HandSample {
    hand_at(0.5, extended)
}

fn classifier() -> GestureClassifier {
    GestureClassifier::new(GestureParams::default())
}

#[test]
fn pose_priority_table() {
    assert_eq!(HandPose::classify(POINT), Some(HandPose::Point));
    assert_eq!(HandPose::classify(VICTORY), Some(HandPose::Victory));
    assert_eq!(HandPose::classify(THREE), Some(HandPose::ThreeFingers));
    assert_eq!(HandPose::classify(OPEN), Some(HandPose::OpenPalm));
    assert_eq!(HandPose::classify([false, true, true, true, true]), Some(HandPose::OpenPalm));
    assert_eq!(HandPose::classify(FIST), Some(HandPose::Fist));
    // thumb alongside the index is no longer an exact match
    assert_eq!(HandPose::classify([true, true, false, false, false]), None);
    assert_eq!(HandPose::classify([true, false, false, false, true]), None);
    assert_eq!(HandPose::classify([false, true, true, true, false]), None);
}

#[test]
fn synthetic_hands_read_back_their_fingers() {
    for handedness in [Handedness::Left, Handedness::Right] {
        for extended in [POINT, VICTORY, THREE, OPEN, FIST, [true, false, true, false, true]] {
            let raw = RawHand::synthetic(handedness, Vec2::new(0.4, 0.7), extended);
            let sample = HandSample::from_raw(&raw).expect("valid");
            assert_eq!(sample.handedness(), handedness);
            assert_eq!(sample.extended_fingers(1.65), extended, "{handedness:?}");
        }
    }
}

#[test]
fn reference_distance_is_wrist_to_palm() {
    let sample = hand(OPEN);
    assert!((sample.reference_distance() - 0.15).abs() < 1e-5);
    assert_eq!(sample.wrist(), Vec2::new(0.5, 0.8));
    assert!(sample.fingertip(Finger::Middle).y < sample.palm_centre().y);
}

#[test]
fn malformed_samples_are_rejected() {
    let good = RawHand::synthetic(Handedness::Right, Vec2::new(0.5, 0.5), OPEN);

    let short = RawHand {
        points: good.points[..20].to_vec(),
        ..good.clone()
    };
    assert_eq!(
        HandSample::from_raw(&short),
        Err(LandmarkError::WrongCount { expected: LANDMARK_COUNT, got: 20 })
    );

    let mut nan = good.clone();
    nan.points[7] = [f32::NAN, 0.5];
    assert_eq!(HandSample::from_raw(&nan), Err(LandmarkError::NonFinite { index: 7 }));

    let flat = RawHand {
        points: vec![[0.5, 0.5]; LANDMARK_COUNT],
        handedness: "Right".into(),
    };
    assert!(matches!(HandSample::from_raw(&flat), Err(LandmarkError::Degenerate { .. })));

    let odd = RawHand {
        handedness: "Both".into(),
        ..good
    };
    assert_eq!(
        HandSample::from_raw(&odd),
        Err(LandmarkError::UnknownHandedness("Both".into()))
    );
}

#[test]
fn held_point_fires_view_once_per_cooldown() {
    let mut c = classifier();
    let sample = hand(POINT);
    let mut views = Vec::new();
    for frame in 0..125 {
        let now = frame as f64 * 16.0;
        let out = c.classify(&sample, now);
        assert_eq!(out.status, GestureStatus::Detected(HandPose::Point));
        if out.events.contains(&GestureEvent::View) {
            views.push(now);
        }
    }
    // frames at 0, 16, ... 1984: the second VIEW lands on the first frame past 1000 ms
    assert_eq!(views, vec![0.0, 1008.0]);
}

#[test]
fn cooldown_spans_different_actions() {
    let mut c = classifier();
    assert_eq!(c.classify(&hand(POINT), 0.0).events.as_slice(), &[GestureEvent::View]);
    assert!(c.classify(&hand(VICTORY), 400.0).events.is_empty());
    assert!(c.classify(&hand(THREE), 999.0).events.is_empty());
    assert_eq!(c.classify(&hand(THREE), 1000.0).events.as_slice(), &[GestureEvent::Close]);
    assert_eq!(c.classify(&hand(VICTORY), 2100.0).events.as_slice(), &[GestureEvent::Next]);
}

#[test]
fn state_signals_fire_every_sample() {
    let mut c = classifier();
    let open = hand(OPEN);
    let mut t = 0.0;
    while t < 3000.0 {
        let out = c.classify(&open, t);
        assert_eq!(out.events.as_slice(), &[GestureEvent::SetStructured], "at {t} ms");
        t += 16.0;
    }
    let out = c.classify(&hand(FIST), t);
    assert_eq!(out.events.as_slice(), &[GestureEvent::SetScattered]);
    assert_eq!(out.status, GestureStatus::Detected(HandPose::Fist));
}

#[test]
fn state_signals_restart_the_action_cooldown() {
    let mut c = classifier();
    c.classify(&hand(OPEN), 0.0);
    assert!(c.classify(&hand(POINT), 500.0).events.is_empty());
    assert_eq!(c.classify(&hand(POINT), 1000.0).events.as_slice(), &[GestureEvent::View]);
}

#[test]
fn unmatched_pose_is_indeterminate() {
    let mut c = classifier();
    c.classify(&hand(POINT), 0.0);
    let out = c.classify(&hand([true, true, false, false, true]), 16.0);
    assert_eq!(out.status, GestureStatus::Indeterminate);
    assert!(out.events.is_empty());
    assert_eq!(c.last_pose(), Some(HandPose::Point));
}

#[test]
fn absence_keeps_last_pose() {
    let mut c = classifier();
    c.classify(&hand(VICTORY), 0.0);
    c.observe_absence();
    assert_eq!(c.status(), GestureStatus::Inactive);
    assert_eq!(c.last_pose(), Some(HandPose::Victory));

    c.reset();
    assert_eq!(c.last_pose(), None);
    // reset also forgets the cooldown
    assert_eq!(c.classify(&hand(POINT), 10.0).events.as_slice(), &[GestureEvent::View]);
}

#[test]
fn hand_x_follows_the_wrist() {
    let mut c = classifier();
    for x in [0.1_f32, 0.35, 0.9] {
        let out = c.classify(&hand_at(x, [true, false, true, false, true]), 0.0);
        assert_eq!(out.hand_x, x);
    }
}

#[test]
fn event_kinds() {
    assert!(GestureEvent::View.is_edge_triggered());
    assert!(GestureEvent::Close.is_edge_triggered());
    assert!(!GestureEvent::SetStructured.is_edge_triggered());
    assert_eq!(HandPose::Victory.event(), GestureEvent::Next);
    assert!(GestureEvent::Next.morph_state().is_none());
}
