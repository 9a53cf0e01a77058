//! Scripted stand-in for the camera hand tracker.
//!
//! Runs on its own thread at roughly tracker rate and cycles through a fixed
//! pose script, delivering frames through a [`LandmarkSender`]. It stops as
//! soon as the subscription is revoked.

use crossfield_core::landmarks::LANDMARK_COUNT;
use crossfield_core::{DetectorFrame, Handedness, LandmarkSender, RawHand};
use glam::Vec2;
use std::thread;
use std::time::Duration;

pub const DETECTOR_INTERVAL: Duration = Duration::from_millis(66); // ~15 Hz

#[derive(Clone, Copy, Debug)]
enum Step {
    Pose { extended: [bool; 5], sweep: f32 },
    Absent,
    Malformed,
}

/// (step, frames to hold it)
const SCRIPT: &[(Step, u32)] = &[
    (Step::Pose { extended: [true; 5], sweep: 0.0 }, 15),
    (Step::Pose { extended: [false; 5], sweep: 0.0 }, 15),
    (Step::Pose { extended: [false, true, false, false, false], sweep: 0.0 }, 20),
    (Step::Pose { extended: [false, true, true, false, false], sweep: 0.25 }, 20),
    (Step::Pose { extended: [false, false, true, true, true], sweep: -0.25 }, 20),
    (Step::Absent, 10),
    (Step::Malformed, 3),
];

fn frame_for(step: Step, t: f32) -> DetectorFrame {
    match step {
        Step::Pose { extended, sweep } => {
            let wrist = Vec2::new(0.5 + sweep * (t - 0.5), 0.8);
            DetectorFrame::Hand(RawHand::synthetic(Handedness::Right, wrist, extended))
        }
        Step::Absent => DetectorFrame::Absent,
        Step::Malformed => DetectorFrame::Hand(RawHand {
            points: vec![[0.5, 0.5]; LANDMARK_COUNT / 2],
            handedness: "Right".to_string(),
        }),
    }
}

/// Start the detector thread. Joins to the number of frames delivered.
pub fn spawn(sender: LandmarkSender) -> std::io::Result<thread::JoinHandle<u64>> {
    thread::Builder::new()
        .name("landmark-detector".into())
        .spawn(move || {
            let mut delivered = 0u64;
            loop {
                for (step, hold) in SCRIPT {
                    for i in 0..*hold {
                        let t = i as f32 / (*hold).max(1) as f32;
                        if !sender.deliver(frame_for(*step, t)) {
                            log::info!("[detector] subscription revoked after {} frames", delivered);
                            return delivered;
                        }
                        delivered += 1;
                        thread::sleep(DETECTOR_INTERVAL);
                    }
                }
            }
        })
}
