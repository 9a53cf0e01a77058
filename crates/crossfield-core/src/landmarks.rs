//! Hand landmark records at the detector boundary.
//!
//! The detector hands over loosely shaped data ([`RawHand`]); everything past
//! [`HandSample::from_raw`] works on a validated, fixed-size 21-point record.

use crate::constants::MIN_REFERENCE_DISTANCE;
use crate::error::LandmarkError;
use glam::Vec2;

pub const LANDMARK_COUNT: usize = 21;
pub const WRIST: usize = 0;
/// Middle-finger MCP joint, used as the palm centre.
pub const PALM_CENTRE: usize = 9;
/// Thumb, index, middle, ring, pinky tips.
pub const FINGERTIPS: [usize; 5] = [4, 8, 12, 16, 20];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn tip_landmark(self) -> usize {
        FINGERTIPS[self.index()]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handedness {
    Left,
    Right,
}

impl Handedness {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Left" | "left" | "L" => Some(Handedness::Left),
            "Right" | "right" | "R" => Some(Handedness::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
        }
    }
}

/// One hand as the detector reports it: normalized `[x, y]` points (y grows
/// downward) and a handedness label.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawHand {
    pub points: Vec<[f32; 2]>,
    pub handedness: String,
}

/// What the detector delivers for one video frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectorFrame {
    Hand(RawHand),
    Absent,
}

impl RawHand {
    /// Synthesize a plausible hand with the wrist at `wrist` and the given
    /// fingers stretched out. Extended tips sit at 2.4x the wrist-to-palm
    /// distance, curled ones at 1.1x.
    pub fn synthetic(handedness: Handedness, wrist: Vec2, extended: [bool; 5]) -> Self {
        const PALM: f32 = 0.15;
        const EXTENDED_LEN: f32 = PALM * 2.4;
        const CURLED_LEN: f32 = PALM * 1.1;
        // fan of finger directions measured from straight up, in degrees
        const FAN_DEG: [f32; 5] = [-60.0, -20.0, 0.0, 20.0, 40.0];
        let mirror = match handedness {
            Handedness::Left => -1.0,
            Handedness::Right => 1.0,
        };

        let mut points = vec![[0.0_f32; 2]; LANDMARK_COUNT];
        points[WRIST] = wrist.to_array();
        for finger in Finger::ALL {
            let f = finger.index();
            let angle = (FAN_DEG[f] * mirror).to_radians();
            let dir = Vec2::new(angle.sin(), -angle.cos());
            let len = if extended[f] { EXTENDED_LEN } else { CURLED_LEN };
            let base = wrist + dir * PALM;
            let tip = wrist + dir * len;
            for joint in 0..4 {
                let t = joint as f32 / 3.0;
                points[1 + f * 4 + joint] = base.lerp(tip, t).to_array();
            }
        }
        Self {
            points,
            handedness: handedness.as_str().to_string(),
        }
    }
}

/// Validated 21-point hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandSample {
    points: [Vec2; LANDMARK_COUNT],
    handedness: Handedness,
}

impl HandSample {
    pub fn from_raw(raw: &RawHand) -> Result<Self, LandmarkError> {
        Self::from_points(&raw.points, &raw.handedness)
    }

    pub fn from_points(points: &[[f32; 2]], handedness: &str) -> Result<Self, LandmarkError> {
        if points.len() != LANDMARK_COUNT {
            return Err(LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            });
        }
        let handedness = Handedness::from_label(handedness)
            .ok_or_else(|| LandmarkError::UnknownHandedness(handedness.to_string()))?;

        let mut fixed = [Vec2::ZERO; LANDMARK_COUNT];
        for (index, (slot, p)) in fixed.iter_mut().zip(points).enumerate() {
            let v = Vec2::from_array(*p);
            if !v.is_finite() {
                return Err(LandmarkError::NonFinite { index });
            }
            *slot = v;
        }

        let sample = Self {
            points: fixed,
            handedness,
        };
        let distance = sample.reference_distance();
        if distance < MIN_REFERENCE_DISTANCE {
            return Err(LandmarkError::Degenerate { distance });
        }
        Ok(sample)
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn point(&self, index: usize) -> Option<Vec2> {
        self.points.get(index).copied()
    }

    pub fn wrist(&self) -> Vec2 {
        self.points[WRIST]
    }

    pub fn palm_centre(&self) -> Vec2 {
        self.points[PALM_CENTRE]
    }

    pub fn fingertip(&self, finger: Finger) -> Vec2 {
        self.points[finger.tip_landmark()]
    }

    /// Wrist to palm-centre distance; the hand's own length unit.
    pub fn reference_distance(&self) -> f32 {
        self.wrist().distance(self.palm_centre())
    }

    /// Per finger, whether its tip reaches beyond `ratio` reference lengths
    /// from the wrist.
    pub fn extended_fingers(&self, ratio: f32) -> [bool; 5] {
        let threshold = self.reference_distance() * ratio;
        let wrist = self.wrist();
        Finger::ALL.map(|finger| self.fingertip(finger).distance(wrist) > threshold)
    }
}
