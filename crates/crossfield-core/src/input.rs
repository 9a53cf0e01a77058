use crate::ornaments::OrnamentId;
use glam::Vec3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// What the pointer went down on, as decided by the front-end's picking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Background,
    Ornament(OrnamentId),
}

/// Pointer event in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: f32,
    pub y: f32,
    pub target: PointerTarget,
}

impl PointerEvent {
    pub fn down(x: f32, y: f32, target: PointerTarget) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            y,
            target,
        }
    }

    pub fn moved(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            y,
            target: PointerTarget::Background,
        }
    }

    pub fn up(x: f32, y: f32) -> Self {
        Self {
            phase: PointerPhase::Up,
            x,
            y,
            target: PointerTarget::Background,
        }
    }
}

/// Nearest forward hit of a ray (unit `ray_dir`) with a sphere.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Forward hit distance of a ray with the plane through `point` with `normal`.
#[inline]
pub fn ray_plane(ray_origin: Vec3, ray_dir: Vec3, point: Vec3, normal: Vec3) -> Option<f32> {
    let denom = ray_dir.dot(normal);
    if denom.abs() <= 1e-6 {
        return None;
    }
    let t = (point - ray_origin).dot(normal) / denom;
    (t >= 0.0).then_some(t)
}
