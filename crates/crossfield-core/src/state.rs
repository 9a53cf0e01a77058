//! Render-facing types: the camera and per-entity draw instances.
//!
//! These avoid platform-specific APIs; a front-end uploads the instances and
//! builds its matrices from the camera.

use crate::constants::{CAMERA_DISTANCE, CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, CAMERA_DISTANCE),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// World-space ray through pixel (`sx`, `sy`) of a `width` x `height`
    /// viewport. Returns `(origin, direction)`.
    pub fn screen_ray(&self, sx: f32, sy: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let width = width.max(1.0);
        let height = height.max(1.0);
        let ndc_x = (2.0 * sx / width) - 1.0;
        let ndc_y = 1.0 - (2.0 * sy / height);
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let rd = (p1 - self.eye).normalize_or_zero();
        (self.eye, rd)
    }

    /// Pixel position of world point `p`, or `None` when it is behind the camera.
    pub fn world_to_screen(&self, p: Vec3, width: f32, height: f32) -> Option<Vec2> {
        let clip = self.projection_matrix() * self.view_matrix() * p.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * width,
            (1.0 - ndc.y) * 0.5 * height,
        ))
    }
}

pub const INSTANCE_PARTICLE: u32 = 0;
pub const INSTANCE_ORNAMENT: u32 = 1;

/// One drawable, laid out for direct upload to an instance buffer.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawInstance {
    pub position: [f32; 3],
    pub scale: f32,
    /// Self-rotation in radians.
    pub spin: f32,
    pub kind: u32,
}

impl DrawInstance {
    pub fn as_bytes(instances: &[DrawInstance]) -> &[u8] {
        bytemuck::cast_slice(instances)
    }
}
