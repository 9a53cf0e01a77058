// Host-side tests for the procedural samplers.

use crossfield_core::sampling::{
    axis_distances, clears_axes, cross, off_axis, off_axis_sample, sphere, Axis,
};
use crossfield_core::constants::OFF_AXIS_MAX_ATTEMPTS;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn sphere_points_stay_inside_radius() {
    let mut rng = rng();
    for radius in [0.25_f32, 1.0, 12.0, 150.0] {
        for _ in 0..5000 {
            let p = sphere(&mut rng, radius);
            assert!(
                p.length() <= radius,
                "point {p:?} escapes radius {radius} (|p| = {})",
                p.length()
            );
        }
    }
}

#[test]
fn sphere_density_is_volumetric() {
    // Equal-volume shells: r³ spread uniformly over [0, 1) for a unit sphere.
    let mut rng = rng();
    const N: usize = 60_000;
    const BINS: usize = 10;
    let mut counts = [0usize; BINS];
    for _ in 0..N {
        let r3 = sphere(&mut rng, 1.0).length().powi(3);
        let bin = ((r3 * BINS as f32) as usize).min(BINS - 1);
        counts[bin] += 1;
    }
    let expected = N as f32 / BINS as f32;
    for (i, c) in counts.iter().enumerate() {
        let dev = (*c as f32 - expected).abs() / expected;
        assert!(dev < 0.1, "shell {i} holds {c}, expected about {expected}");
    }
}

#[test]
fn sphere_directions_are_balanced() {
    let mut rng = rng();
    const N: usize = 20_000;
    let mut positive = [0usize; 3];
    for _ in 0..N {
        let p = sphere(&mut rng, 3.0);
        for (axis, count) in positive.iter_mut().enumerate() {
            if p[axis] > 0.0 {
                *count += 1;
            }
        }
    }
    for (axis, count) in positive.iter().enumerate() {
        let frac = *count as f32 / N as f32;
        assert!((frac - 0.5).abs() < 0.03, "axis {axis} positive fraction {frac}");
    }
}

#[test]
fn axis_distances_are_perpendicular_distances() {
    let d = axis_distances(Vec3::new(3.0, 4.0, 0.0));
    assert!((d[0] - 4.0).abs() < 1e-6);
    assert!((d[1] - 3.0).abs() < 1e-6);
    assert!((d[2] - 5.0).abs() < 1e-6);
    assert!(!clears_axes(Vec3::new(0.0, 0.0, 5.0), 0.1));
    assert!(clears_axes(Vec3::new(2.0, 2.0, 2.0), 2.0));
}

#[test]
fn off_axis_conforms_in_nearly_every_call() {
    let mut rng = rng();
    for (radius, threshold) in [(5.0_f32, 1.0_f32), (7.0, 1.4), (2.0, 0.3)] {
        let conforming = (0..100)
            .filter(|_| clears_axes(off_axis(&mut rng, radius, threshold), threshold))
            .count();
        assert!(
            conforming >= 99,
            "only {conforming}/100 conforming for R={radius} T={threshold}"
        );
    }
}

#[test]
fn off_axis_stays_in_radial_band() {
    let mut rng = rng();
    for _ in 0..2000 {
        let p = off_axis(&mut rng, 5.0, 1.0);
        let r = p.length();
        assert!(r >= 0.3 * 5.0 - 1e-4 && r <= 5.0 + 1e-4, "radius {r} outside band");
    }
}

#[test]
fn off_axis_gives_up_after_attempt_cap() {
    let mut rng = rng();
    // No point within radius 2 can be 10 away from every axis.
    let sample = off_axis_sample(&mut rng, 2.0, 10.0);
    assert!(!sample.conforming);
    assert_eq!(sample.attempts, OFF_AXIS_MAX_ATTEMPTS);
    let r = sample.point.length();
    assert!(r >= 0.6 - 1e-4 && r <= 2.0 + 1e-4);

    let ok = off_axis_sample(&mut rng, 5.0, 1.0);
    assert!(ok.conforming);
    assert!(ok.attempts >= 1 && ok.attempts <= OFF_AXIS_MAX_ATTEMPTS);
}

#[test]
fn cross_points_hug_the_selected_axis() {
    let mut rng = rng();
    let (len, thickness) = (16.0_f32, 0.7_f32);
    for axis in Axis::ALL {
        for _ in 0..3000 {
            let p = cross(&mut rng, len, thickness, 0.0, Some(axis));
            let k = axis.index();
            assert!(p[k] >= -len / 2.0 && p[k] <= len / 2.0, "{axis:?} component {}", p[k]);
            let radial = axis_distances(p)[k];
            assert!(radial <= thickness + 1e-5, "radial offset {radial} on {axis:?}");
        }
    }
}

#[test]
fn cross_disk_offset_is_area_uniform() {
    // Area-uniform disk: half the points fall inside radius thickness/√2.
    let mut rng = rng();
    let thickness = 1.0_f32;
    let inner = (0..20_000)
        .filter(|_| {
            let p = cross(&mut rng, 4.0, thickness, 0.0, Some(Axis::Y));
            axis_distances(p)[1] < thickness / 2.0_f32.sqrt()
        })
        .count();
    let frac = inner as f32 / 20_000.0;
    assert!((frac - 0.5).abs() < 0.03, "inner fraction {frac}");
}

#[test]
fn cross_noise_is_bounded_and_random_axis_covers_all_arms() {
    let mut rng = rng();
    let (len, thickness, noise) = (10.0_f32, 0.5_f32, 0.2_f32);
    let mut far_along = [0usize; 3];
    for _ in 0..6000 {
        let p = cross(&mut rng, len, thickness, noise, None);
        for k in 0..3 {
            assert!(p[k].abs() <= len / 2.0 + noise + 1e-5);
        }
        // Points far out on an arm identify it unambiguously.
        for (k, count) in far_along.iter_mut().enumerate() {
            if p[k].abs() > thickness + noise + 0.5 {
                *count += 1;
            }
        }
    }
    for (k, count) in far_along.iter().enumerate() {
        assert!(*count > 1200, "arm {k} drew only {count} far points");
    }
}
