use crate::constants::{
    DRAG_INERTIA, DRAG_SENSITIVITY, GESTURE_SENSITIVITY, IDLE_EASE, IDLE_SPIN, ROTATION_FRICTION,
};
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct RotationParams {
    pub drag_sensitivity: f32,
    pub drag_inertia: f32,
    pub gesture_sensitivity: f32,
    /// Per-tick velocity multiplier while not dragging, in `(0, 1)`.
    pub friction: f32,
    pub idle_speed: f32,
    pub idle_ease: f32,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            drag_sensitivity: DRAG_SENSITIVITY,
            drag_inertia: DRAG_INERTIA,
            gesture_sensitivity: GESTURE_SENSITIVITY,
            friction: ROTATION_FRICTION,
            idle_speed: IDLE_SPIN,
            idle_ease: IDLE_EASE,
        }
    }
}

/// Which input last wrote the angular velocity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpinSource {
    #[default]
    Idle,
    Drag,
    Gesture,
}

/// Group rotation about the vertical axis with flung momentum.
///
/// Drag and hand input are mutually exclusive: while a drag is active, hand
/// travel is tracked but never reaches the velocity.
pub struct InertialRotationController {
    pub params: RotationParams,
    rotation: f32,
    angular_velocity: f32,
    last_pointer_x: f32,
    dragging: bool,
    last_hand_x: Option<f32>,
    source: SpinSource,
}

impl InertialRotationController {
    pub fn new(params: RotationParams) -> Self {
        let angular_velocity = params.idle_speed;
        Self {
            params,
            rotation: 0.0,
            angular_velocity,
            last_pointer_x: 0.0,
            dragging: false,
            last_hand_x: None,
            source: SpinSource::Idle,
        }
    }

    /// Current angle, wrapped to one turn.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn source(&self) -> SpinSource {
        self.source
    }

    pub fn begin_drag(&mut self, pointer_x: f32) {
        self.dragging = true;
        self.last_pointer_x = pointer_x;
        self.angular_velocity = 0.0;
        self.source = SpinSource::Drag;
    }

    pub fn drag_to(&mut self, pointer_x: f32) {
        if !self.dragging {
            return;
        }
        let delta_x = pointer_x - self.last_pointer_x;
        self.last_pointer_x = pointer_x;
        self.add_rotation(delta_x * self.params.drag_sensitivity);
        self.angular_velocity = delta_x * self.params.drag_inertia;
    }

    /// Release the drag; the last velocity carries on as momentum.
    pub fn end_drag(&mut self) {
        if self.dragging {
            log::debug!("[rotation] fling at {:.3} rad/s", self.angular_velocity);
        }
        self.dragging = false;
    }

    /// Feed the normalized wrist X of the current hand sample.
    pub fn apply_hand_x(&mut self, hand_x: f32) {
        let previous = self.last_hand_x.replace(hand_x);
        if self.dragging {
            return;
        }
        if let Some(previous) = previous {
            let delta = hand_x - previous;
            if delta != 0.0 {
                self.angular_velocity -= delta * self.params.gesture_sensitivity;
                self.source = SpinSource::Gesture;
            }
        }
    }

    /// Record the hand position without letting it steer, e.g. while some
    /// other pointer interaction owns the scene.
    pub fn track_hand_x(&mut self, hand_x: f32) {
        self.last_hand_x = Some(hand_x);
    }

    /// Forget the last hand position so a returning hand does not jump.
    pub fn release_hand(&mut self) {
        self.last_hand_x = None;
    }

    /// Drop any velocity the hand contributed, keeping drag momentum.
    pub fn cancel_gesture_spin(&mut self) {
        self.last_hand_x = None;
        if self.source == SpinSource::Gesture && !self.dragging {
            self.angular_velocity = 0.0;
            self.source = SpinSource::Idle;
        }
    }

    /// Apply friction, idle spin and integrate. No-op while dragging.
    pub fn tick(&mut self, dt: f32, gesture_active: bool) {
        if self.dragging {
            return;
        }
        let p = &self.params;
        // friction only bleeds off speed above the idle floor; below it the
        // spin eases up to the floor instead
        if self.angular_velocity.abs() < p.idle_speed && !gesture_active {
            let direction = if self.angular_velocity < 0.0 { -1.0 } else { 1.0 };
            self.angular_velocity += (p.idle_speed * direction - self.angular_velocity) * p.idle_ease;
            self.source = SpinSource::Idle;
        } else {
            self.angular_velocity *= p.friction;
        }
        self.add_rotation(self.angular_velocity * dt.max(0.0));
    }

    fn add_rotation(&mut self, delta: f32) {
        self.rotation = (self.rotation + delta).rem_euclid(TAU);
    }
}
