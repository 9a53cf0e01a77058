use crate::constants::{
    CROSS_ARM_LENGTH, CROSS_NOISE, CROSS_THICKNESS, FIELD_SCATTER_RADIUS, PARTICLE_BASE_SCALE,
    PARTICLE_SCALE_MAX, PARTICLE_SCALE_MIN,
};
use crate::sampling;
use glam::Vec3;
use rand::prelude::*;
use std::f32::consts::TAU;

/// A particle or ornament with a target position in each layout.
#[derive(Clone, Debug, PartialEq)]
pub struct DualPositionEntity {
    pub structured_position: Vec3,
    pub scatter_position: Vec3,
    /// In `[0, 2π)`; desynchronizes the floating motion.
    pub phase_offset: f32,
    pub scale: f32,
    /// Self-rotation in rad/s, if the entity spins.
    pub rotation_speed: Option<f32>,
}

impl DualPositionEntity {
    pub fn new(structured_position: Vec3, scatter_position: Vec3, phase_offset: f32, scale: f32) -> Self {
        Self {
            structured_position,
            scatter_position,
            phase_offset: phase_offset.rem_euclid(TAU),
            scale,
            rotation_speed: None,
        }
    }

    pub fn with_rotation_speed(mut self, speed: f32) -> Self {
        self.rotation_speed = Some(speed);
        self
    }
}

#[derive(Clone, Debug)]
pub struct FieldParams {
    pub scatter_radius: f32,
    pub arm_length: f32,
    pub thickness: f32,
    pub noise: f32,
    pub base_scale: f32,
    pub scale_min: f32,
    pub scale_max: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            scatter_radius: FIELD_SCATTER_RADIUS,
            arm_length: CROSS_ARM_LENGTH,
            thickness: CROSS_THICKNESS,
            noise: CROSS_NOISE,
            base_scale: PARTICLE_BASE_SCALE,
            scale_min: PARTICLE_SCALE_MIN,
            scale_max: PARTICLE_SCALE_MAX,
        }
    }
}

/// Uniform phase in `[0, 2π)`.
pub fn random_phase<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.gen::<f32>() * TAU).rem_euclid(TAU)
}

/// Build the fixed ambient population: cross arms when structured, a
/// volumetric cloud when scattered.
pub fn build_particle_field<R: Rng + ?Sized>(
    count: usize,
    params: &FieldParams,
    rng: &mut R,
) -> Vec<DualPositionEntity> {
    (0..count)
        .map(|_| {
            let structured =
                sampling::cross(rng, params.arm_length, params.thickness, params.noise, None);
            let scatter = sampling::sphere(rng, params.scatter_radius);
            let phase = random_phase(rng);
            let scale = params.base_scale * rng.gen_range(params.scale_min..=params.scale_max);
            DualPositionEntity::new(structured, scatter, phase, scale)
        })
        .collect()
}
