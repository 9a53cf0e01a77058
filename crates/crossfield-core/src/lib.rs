//! Core of the crossfield installation: a particle and photo-ornament field
//! that morphs between a scattered cloud and a coordinate cross, steered by
//! pointer drags and hand gestures.
//!
//! Nothing here touches a window, GPU or camera feed. Front-ends feed ticks,
//! pointer events and detector frames in, and read draw instances, morph
//! progress, gesture status and events out.

pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod gesture;
pub mod input;
pub mod installation;
pub mod landmarks;
pub mod mailbox;
pub mod morph;
pub mod ornaments;
pub mod rotation;
pub mod sampling;
pub mod state;

pub use config::SceneConfig;
pub use entity::{build_particle_field, DualPositionEntity, FieldParams};
pub use error::{ConfigError, LandmarkError};
pub use gesture::{
    Classification, GestureAction, GestureClassifier, GestureEvent, GestureParams, GestureStatus,
    HandPose,
};
pub use input::{PointerEvent, PointerPhase, PointerTarget};
pub use installation::{Installation, InstallationEvent, InteractionContext};
pub use landmarks::{DetectorFrame, Finger, HandSample, Handedness, RawHand};
pub use mailbox::{LandmarkSender, LandmarkSubscription, Mailbox};
pub use morph::{MorphEngine, MorphParams, MorphState};
pub use ornaments::{OrnamentId, OrnamentParams, PhotoOrnament, PhotoOrnamentManager};
pub use rotation::{InertialRotationController, RotationParams, SpinSource};
pub use sampling::Axis;
pub use state::{Camera, DrawInstance};
