//! Procedural point sampling for the two layouts.
//!
//! All samplers are stateless; randomness comes from the caller's RNG so a
//! seeded `StdRng` reproduces a whole field.

use crate::constants::{OFF_AXIS_MAX_ATTEMPTS, OFF_AXIS_MIN_RADIUS_FRACTION};
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// One of the three principal axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Unit vector with uniformly distributed direction.
fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let cos_phi = rng.gen_range(-1.0_f32..=1.0);
    let sin_phi = (1.0 - cos_phi * cos_phi).max(0.0).sqrt();
    Vec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Point uniformly distributed by volume inside a sphere of `radius`.
///
/// The radial coordinate is `radius * cbrt(u)`, which compensates for the
/// r² growth of shell area so the cloud is not biased toward the surface.
pub fn sphere<R: Rng + ?Sized>(rng: &mut R, radius: f32) -> Vec3 {
    let r = radius * rng.gen::<f32>().cbrt();
    let p = unit_direction(rng) * r;
    // rounding in the direction can leave |p| a hair above r
    let len = p.length();
    if len > radius && len > 0.0 {
        p * (radius / len)
    } else {
        p
    }
}

/// Perpendicular distance from `p` to the X, Y and Z axes.
pub fn axis_distances(p: Vec3) -> [f32; 3] {
    [
        (p.y * p.y + p.z * p.z).sqrt(),
        (p.x * p.x + p.z * p.z).sqrt(),
        (p.x * p.x + p.y * p.y).sqrt(),
    ]
}

/// True when `p` is farther than `threshold` from every principal axis.
pub fn clears_axes(p: Vec3, threshold: f32) -> bool {
    axis_distances(p).iter().all(|d| *d > threshold)
}

/// Result of a bounded rejection-sampling run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffAxisSample {
    pub point: Vec3,
    pub attempts: usize,
    pub conforming: bool,
}

/// Rejection-sample a point in the `[0.3, 1.0] * radius` shell that keeps
/// more than `axis_threshold` away from all three axes.
///
/// Gives up after [`OFF_AXIS_MAX_ATTEMPTS`] draws and returns the last
/// candidate with `conforming == false`.
pub fn off_axis_sample<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f32,
    axis_threshold: f32,
) -> OffAxisSample {
    let mut candidate = Vec3::ZERO;
    for attempt in 1..=OFF_AXIS_MAX_ATTEMPTS {
        let r = radius * rng.gen_range(OFF_AXIS_MIN_RADIUS_FRACTION..=1.0);
        candidate = unit_direction(rng) * r;
        if clears_axes(candidate, axis_threshold) {
            return OffAxisSample {
                point: candidate,
                attempts: attempt,
                conforming: true,
            };
        }
    }
    OffAxisSample {
        point: candidate,
        attempts: OFF_AXIS_MAX_ATTEMPTS,
        conforming: false,
    }
}

/// Off-axis point; see [`off_axis_sample`]. Exhaustion is logged, not reported.
pub fn off_axis<R: Rng + ?Sized>(rng: &mut R, radius: f32, axis_threshold: f32) -> Vec3 {
    let sample = off_axis_sample(rng, radius, axis_threshold);
    if !sample.conforming {
        log::debug!(
            "[sampling] off-axis cap of {} reached (radius={:.2}, threshold={:.2}); keeping last candidate",
            OFF_AXIS_MAX_ATTEMPTS,
            radius,
            axis_threshold
        );
    }
    sample.point
}

/// Point on one arm of the coordinate cross.
///
/// The arm is `axis` or a uniformly random one. Along the arm the point is
/// uniform in `[-arm_length/2, arm_length/2]`; across it the offset is
/// area-uniform within a disk of radius `thickness`. Each component then gets
/// uniform noise in `[-noise_amplitude, noise_amplitude]`.
pub fn cross<R: Rng + ?Sized>(
    rng: &mut R,
    arm_length: f32,
    thickness: f32,
    noise_amplitude: f32,
    axis: Option<Axis>,
) -> Vec3 {
    let axis = axis.unwrap_or_else(|| Axis::random(rng));
    let half = arm_length * 0.5;
    let along = rng.gen_range(-half..=half);
    let disk_r = rng.gen::<f32>().sqrt() * thickness;
    let angle = rng.gen::<f32>() * TAU;
    let (u, v) = (disk_r * angle.cos(), disk_r * angle.sin());

    let mut p = match axis {
        Axis::X => Vec3::new(along, u, v),
        Axis::Y => Vec3::new(u, along, v),
        Axis::Z => Vec3::new(u, v, along),
    };
    if noise_amplitude > 0.0 {
        p += Vec3::new(
            rng.gen_range(-1.0_f32..=1.0),
            rng.gen_range(-1.0_f32..=1.0),
            rng.gen_range(-1.0_f32..=1.0),
        ) * noise_amplitude;
    }
    p
}
