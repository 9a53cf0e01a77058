//! User photos placed in the field as ornaments.
//!
//! Ornaments live in an identifier-keyed map plus an insertion-order list.
//! Identifiers are never reused, removal never touches another entry, and
//! only an explicit drag rewrites an ornament's structured position.

use crate::constants::{
    ORNAMENT_AXIS_CLEARANCE, ORNAMENT_SCALE, ORNAMENT_SCATTER_RADIUS, ORNAMENT_SPIN_MAX,
    ORNAMENT_STRUCTURED_RADIUS,
};
use crate::entity::{random_phase, DualPositionEntity};
use crate::input::ray_plane;
use crate::sampling;
use fnv::FnvHashMap;
use glam::Vec3;
use rand::prelude::*;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OrnamentId(pub u64);

impl fmt::Display for OrnamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct OrnamentParams {
    pub structured_radius: f32,
    pub axis_clearance: f32,
    pub scatter_radius: f32,
    pub scale: f32,
    pub spin_max: f32,
}

impl Default for OrnamentParams {
    fn default() -> Self {
        Self {
            structured_radius: ORNAMENT_STRUCTURED_RADIUS,
            axis_clearance: ORNAMENT_AXIS_CLEARANCE,
            scatter_radius: ORNAMENT_SCATTER_RADIUS,
            scale: ORNAMENT_SCALE,
            spin_max: ORNAMENT_SPIN_MAX,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PhotoOrnament {
    pub id: OrnamentId,
    /// Caller-supplied image reference (file name, URL, handle).
    pub label: String,
    pub entity: DualPositionEntity,
}

#[derive(Clone, Copy, Debug)]
struct OrnamentDrag {
    id: OrnamentId,
    plane_point: Vec3,
    plane_normal: Vec3,
    grab_offset: Vec3,
}

pub struct PhotoOrnamentManager {
    pub params: OrnamentParams,
    entries: FnvHashMap<OrnamentId, PhotoOrnament>,
    order: Vec<OrnamentId>,
    next_id: u64,
    drag: Option<OrnamentDrag>,
}

impl PhotoOrnamentManager {
    pub fn new(params: OrnamentParams) -> Self {
        Self {
            params,
            entries: FnvHashMap::default(),
            order: Vec::new(),
            next_id: 1,
            drag: None,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: OrnamentId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: OrnamentId) -> Option<&PhotoOrnament> {
        self.entries.get(&id)
    }

    /// Ornaments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PhotoOrnament> + '_ {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn ids(&self) -> &[OrnamentId] {
        &self.order
    }

    /// Place a new ornament: off-axis when structured, anywhere in the
    /// cloud when scattered. Both targets are drawn once, here.
    pub fn add<R: Rng + ?Sized>(&mut self, label: impl Into<String>, rng: &mut R) -> OrnamentId {
        let p = &self.params;
        let structured = sampling::off_axis(rng, p.structured_radius, p.axis_clearance);
        let scatter = sampling::sphere(rng, p.scatter_radius);
        let spin = if p.spin_max > 0.0 {
            rng.gen_range(-p.spin_max..=p.spin_max)
        } else {
            0.0
        };
        let entity = DualPositionEntity::new(structured, scatter, random_phase(rng), p.scale)
            .with_rotation_speed(spin);

        let id = OrnamentId(self.next_id);
        self.next_id += 1;
        let label = label.into();
        log::info!("[ornaments] added {} ({})", id, label);
        self.entries.insert(id, PhotoOrnament { id, label, entity });
        self.order.push(id);
        id
    }

    /// Remove `id`. Unknown identifiers are ignored and return `None`.
    pub fn remove(&mut self, id: OrnamentId) -> Option<PhotoOrnament> {
        let removed = self.entries.remove(&id)?;
        self.order.retain(|other| *other != id);
        if self.dragged() == Some(id) {
            self.drag = None;
        }
        log::info!("[ornaments] removed {}", id);
        Some(removed)
    }

    pub fn clear(&mut self) {
        if !self.order.is_empty() {
            log::info!("[ornaments] cleared {}", self.order.len());
        }
        self.entries.clear();
        self.order.clear();
        self.drag = None;
    }

    pub fn dragged(&self) -> Option<OrnamentId> {
        self.drag.map(|d| d.id)
    }

    /// Floating gain for `id`: zero while it is being dragged.
    pub fn float_gain(&self, id: OrnamentId) -> f32 {
        if self.dragged() == Some(id) {
            0.0
        } else {
            1.0
        }
    }

    /// Grab `id` at its `rendered` position. The drag plane passes through
    /// that position with `plane_normal` (facing the camera); the offset
    /// between the pointer hit and the ornament is kept for the whole drag.
    ///
    /// All vectors are in the ornament's own (group-local) frame.
    ///
    /// The pointer hit is stored as-is in `structured_position`, so the
    /// ornament only tracks the pointer exactly once fully structured. Mid
    /// morph it lags by the blend, and while scattered the drag moves only
    /// the structured target, which shows once the field forms up.
    pub fn begin_drag(
        &mut self,
        id: OrnamentId,
        rendered: Vec3,
        ray_origin: Vec3,
        ray_dir: Vec3,
        plane_normal: Vec3,
    ) -> bool {
        if !self.contains(id) {
            return false;
        }
        let Some(t) = ray_plane(ray_origin, ray_dir, rendered, plane_normal) else {
            return false;
        };
        let hit = ray_origin + ray_dir * t;
        self.drag = Some(OrnamentDrag {
            id,
            plane_point: rendered,
            plane_normal,
            grab_offset: rendered - hit,
        });
        log::debug!("[ornaments] begin drag on {}", id);
        true
    }

    /// Move the dragged ornament to follow the pointer ray.
    pub fn drag_to(&mut self, ray_origin: Vec3, ray_dir: Vec3) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        let Some(t) = ray_plane(ray_origin, ray_dir, drag.plane_point, drag.plane_normal) else {
            return false;
        };
        let target = ray_origin + ray_dir * t + drag.grab_offset;
        match self.entries.get_mut(&drag.id) {
            Some(ornament) => {
                ornament.entity.structured_position = target;
                true
            }
            None => {
                self.drag = None;
                false
            }
        }
    }

    pub fn end_drag(&mut self) -> Option<OrnamentId> {
        let id = self.drag.take().map(|d| d.id);
        if let Some(id) = id {
            log::debug!("[ornaments] end drag on {}", id);
        }
        id
    }
}
