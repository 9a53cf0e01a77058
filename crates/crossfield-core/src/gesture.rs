//! Hand pose classification into viewer actions and morph state signals.
//!
//! Actions (`View`, `Next`, `Close`) are edge-triggered and rate limited by a
//! cooldown that restarts on every accepted event. State signals
//! (`SetStructured`, `SetScattered`) are level-triggered: they fire on every
//! sample the pose holds and ignore the cooldown.

use crate::constants::{ACTION_COOLDOWN_MS, FINGER_EXTENSION_RATIO};
use crate::landmarks::HandSample;
use crate::morph::MorphState;
use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct GestureParams {
    pub extension_ratio: f32,
    pub cooldown_ms: f64,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            extension_ratio: FINGER_EXTENSION_RATIO,
            cooldown_ms: ACTION_COOLDOWN_MS,
        }
    }
}

/// Recognized hand shapes, in classification priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandPose {
    /// Index finger only.
    Point,
    /// Index and middle.
    Victory,
    /// Middle, ring and pinky.
    ThreeFingers,
    /// Four or five fingers.
    OpenPalm,
    /// No finger extended.
    Fist,
}

impl HandPose {
    /// Classify an extension pattern (thumb, index, middle, ring, pinky).
    pub fn classify(extended: [bool; 5]) -> Option<Self> {
        let count = extended.iter().filter(|e| **e).count();
        match extended {
            [false, true, false, false, false] => Some(HandPose::Point),
            [false, true, true, false, false] => Some(HandPose::Victory),
            [false, false, true, true, true] => Some(HandPose::ThreeFingers),
            _ if count >= 4 => Some(HandPose::OpenPalm),
            _ if count == 0 => Some(HandPose::Fist),
            _ => None,
        }
    }

    pub fn event(self) -> GestureEvent {
        match self {
            HandPose::Point => GestureEvent::View,
            HandPose::Victory => GestureEvent::Next,
            HandPose::ThreeFingers => GestureEvent::Close,
            HandPose::OpenPalm => GestureEvent::SetStructured,
            HandPose::Fist => GestureEvent::SetScattered,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HandPose::Point => "point",
            HandPose::Victory => "victory",
            HandPose::ThreeFingers => "three-fingers",
            HandPose::OpenPalm => "open-palm",
            HandPose::Fist => "fist",
        }
    }
}

/// Photo-viewer commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureAction {
    View,
    Next,
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GestureEvent {
    View,
    Next,
    Close,
    SetStructured,
    SetScattered,
}

impl GestureEvent {
    pub fn is_edge_triggered(self) -> bool {
        self.action().is_some()
    }

    pub fn action(self) -> Option<GestureAction> {
        match self {
            GestureEvent::View => Some(GestureAction::View),
            GestureEvent::Next => Some(GestureAction::Next),
            GestureEvent::Close => Some(GestureAction::Close),
            GestureEvent::SetStructured | GestureEvent::SetScattered => None,
        }
    }

    pub fn morph_state(self) -> Option<MorphState> {
        match self {
            GestureEvent::SetStructured => Some(MorphState::Structured),
            GestureEvent::SetScattered => Some(MorphState::Scattered),
            _ => None,
        }
    }
}

/// What the status readout shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureStatus {
    /// No hand in view, or gestures disabled.
    #[default]
    Inactive,
    /// A hand is present but its pose matches nothing.
    Indeterminate,
    Detected(HandPose),
}

/// Result of classifying one sample.
#[derive(Clone, Debug, PartialEq)]
pub struct Classification {
    pub status: GestureStatus,
    pub events: SmallVec<[GestureEvent; 1]>,
    /// Normalized wrist X, always present for a hand sample.
    pub hand_x: f32,
}

pub struct GestureClassifier {
    pub params: GestureParams,
    status: GestureStatus,
    last_pose: Option<HandPose>,
    last_accepted_ms: Option<f64>,
}

impl GestureClassifier {
    pub fn new(params: GestureParams) -> Self {
        Self {
            params,
            status: GestureStatus::Inactive,
            last_pose: None,
            last_accepted_ms: None,
        }
    }

    pub fn status(&self) -> GestureStatus {
        self.status
    }

    /// Last recognized pose; survives hand absence.
    pub fn last_pose(&self) -> Option<HandPose> {
        self.last_pose
    }

    fn cooling_down(&self, now_ms: f64) -> bool {
        self.last_accepted_ms
            .is_some_and(|t| now_ms - t < self.params.cooldown_ms)
    }

    /// Classify a validated sample observed at `now_ms`.
    pub fn classify(&mut self, sample: &HandSample, now_ms: f64) -> Classification {
        let extended = sample.extended_fingers(self.params.extension_ratio);
        let mut events = SmallVec::new();

        self.status = match HandPose::classify(extended) {
            Some(pose) => {
                self.last_pose = Some(pose);
                let event = pose.event();
                if event.is_edge_triggered() && self.cooling_down(now_ms) {
                    log::trace!("[gesture] {} suppressed by cooldown", pose.as_str());
                } else {
                    if event.is_edge_triggered() {
                        log::info!("[gesture] {} -> {:?}", pose.as_str(), event);
                    }
                    self.last_accepted_ms = Some(now_ms);
                    events.push(event);
                }
                GestureStatus::Detected(pose)
            }
            None => GestureStatus::Indeterminate,
        };

        Classification {
            status: self.status,
            events,
            hand_x: sample.wrist().x,
        }
    }

    /// No hand this frame: report inactive, keep the last pose, change nothing else.
    pub fn observe_absence(&mut self) {
        self.status = GestureStatus::Inactive;
    }

    /// Forget timing and display state, e.g. when gestures are switched off.
    pub fn reset(&mut self) {
        self.status = GestureStatus::Inactive;
        self.last_pose = None;
        self.last_accepted_ms = None;
    }
}
