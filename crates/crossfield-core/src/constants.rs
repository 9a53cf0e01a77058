//! Tuning constants for the field, morph, rotation and gesture layers.
//!
//! These express intended behavior (radii, time constants, thresholds) and
//! keep magic numbers out of the algorithms. The parameter structs in
//! [`crate::config`] default to these values.

// Ambient particle field
pub const PARTICLE_COUNT: usize = 1200;
pub const FIELD_SCATTER_RADIUS: f32 = 12.0; // scattered cloud radius
pub const CROSS_ARM_LENGTH: f32 = 16.0; // full length of each cross arm
pub const CROSS_THICKNESS: f32 = 0.7; // disk radius around each arm
pub const CROSS_NOISE: f32 = 0.15; // per-axis jitter on cross positions
pub const PARTICLE_SCALE_MIN: f32 = 0.5;
pub const PARTICLE_SCALE_MAX: f32 = 1.0;
pub const PARTICLE_BASE_SCALE: f32 = 0.12;

// Sampling
pub const OFF_AXIS_MIN_RADIUS_FRACTION: f32 = 0.3; // radial band is [0.3, 1.0] * radius
pub const OFF_AXIS_MAX_ATTEMPTS: usize = 100;

// Photo ornaments
pub const ORNAMENT_STRUCTURED_RADIUS: f32 = 7.0; // R_s
pub const ORNAMENT_AXIS_CLEARANCE: f32 = 1.4; // T, minimum distance to every axis
pub const ORNAMENT_SCATTER_RADIUS: f32 = 10.0; // R_c
pub const ORNAMENT_SCALE: f32 = 1.0;
pub const ORNAMENT_SPIN_MAX: f32 = 0.4; // rad/s, sampled in [-max, max]
pub const ORNAMENT_PICK_RADIUS: f32 = 0.9; // ray-sphere radius for picking

// Morph
pub const MORPH_RATE: f32 = 2.5; // per second
pub const MORPH_SNAP_EPSILON: f32 = 1e-4; // progress snaps to target inside this band
pub const FLOAT_AMPLITUDE: f32 = 0.35;
pub const FLOAT_FREQUENCIES: [f32; 3] = [0.71, 0.93, 0.57]; // rad/s per axis
pub const FLOAT_PHASE_SHIFTS: [f32; 3] = [0.0, 2.09, 4.19]; // per-axis offsets

// Rotation
pub const DRAG_SENSITIVITY: f32 = 0.005; // rad per pixel while dragging
pub const DRAG_INERTIA: f32 = 0.02; // rad/s per pixel of the last drag step
pub const GESTURE_SENSITIVITY: f32 = 6.0; // rad/s per unit of normalized hand travel
pub const ROTATION_FRICTION: f32 = 0.95; // per tick, while not dragging
pub const IDLE_SPIN: f32 = 0.08; // rad/s floor for ambient spin
pub const IDLE_EASE: f32 = 0.05; // per tick blend toward the floor

// Gesture classification
pub const FINGER_EXTENSION_RATIO: f32 = 1.65;
pub const ACTION_COOLDOWN_MS: f64 = 1000.0;
pub const MIN_REFERENCE_DISTANCE: f32 = 1e-4; // below this the hand is degenerate

// Camera
pub const CAMERA_DISTANCE: f32 = 30.0;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Frame stepping
pub const MAX_TICK_SECONDS: f32 = 0.1; // stalled frames are clamped to this
