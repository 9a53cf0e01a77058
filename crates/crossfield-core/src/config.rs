use crate::constants::PARTICLE_COUNT;
use crate::entity::FieldParams;
use crate::error::ConfigError;
use crate::gesture::GestureParams;
use crate::morph::MorphParams;
use crate::ornaments::OrnamentParams;
use crate::rotation::RotationParams;
use crate::state::Camera;

/// Everything an [`crate::Installation`] is built from.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub seed: u64,
    pub field: FieldParams,
    pub ornaments: OrnamentParams,
    pub morph: MorphParams,
    pub rotation: RotationParams,
    pub gesture: GestureParams,
    pub camera: Camera,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: 42,
            field: FieldParams::default(),
            ornaments: OrnamentParams::default(),
            morph: MorphParams::default(),
            rotation: RotationParams::default(),
            gesture: GestureParams::default(),
            camera: Camera::default(),
        }
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::EmptyField);
        }

        let f = &self.field;
        positive("field.scatter_radius", f.scatter_radius)?;
        positive("field.arm_length", f.arm_length)?;
        non_negative("field.thickness", f.thickness)?;
        non_negative("field.noise", f.noise)?;
        positive("field.base_scale", f.base_scale)?;
        positive("field.scale_min", f.scale_min)?;
        if f.scale_min > f.scale_max {
            return Err(ConfigError::ScaleRange {
                min: f.scale_min,
                max: f.scale_max,
            });
        }

        let o = &self.ornaments;
        positive("ornaments.structured_radius", o.structured_radius)?;
        non_negative("ornaments.axis_clearance", o.axis_clearance)?;
        if o.axis_clearance >= o.structured_radius {
            return Err(ConfigError::ClearanceTooLarge {
                clearance: o.axis_clearance,
                radius: o.structured_radius,
            });
        }
        positive("ornaments.scatter_radius", o.scatter_radius)?;
        positive("ornaments.scale", o.scale)?;
        non_negative("ornaments.spin_max", o.spin_max)?;

        let m = &self.morph;
        positive("morph.rate", m.rate)?;
        non_negative("morph.float_amplitude", m.float_amplitude)?;

        let r = &self.rotation;
        if !(r.friction > 0.0 && r.friction < 1.0) {
            return Err(ConfigError::Friction(r.friction));
        }
        non_negative("rotation.drag_sensitivity", r.drag_sensitivity)?;
        non_negative("rotation.drag_inertia", r.drag_inertia)?;
        non_negative("rotation.gesture_sensitivity", r.gesture_sensitivity)?;
        non_negative("rotation.idle_speed", r.idle_speed)?;
        non_negative("rotation.idle_ease", r.idle_ease)?;

        positive("gesture.extension_ratio", self.gesture.extension_ratio)?;
        non_negative("gesture.cooldown_ms", self.gesture.cooldown_ms as f32)?;

        positive("camera.fovy_radians", self.camera.fovy_radians)?;
        positive("camera.znear", self.camera.znear)?;
        Ok(())
    }
}
