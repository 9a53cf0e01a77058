use thiserror::Error;

/// Why a detector frame was rejected at the landmark boundary.
///
/// These never escape the tick: the frame is logged and skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LandmarkError {
    #[error("expected {expected} landmarks, got {got}")]
    WrongCount { expected: usize, got: usize },
    #[error("landmark {index} has a non-finite coordinate")]
    NonFinite { index: usize },
    #[error("degenerate hand: wrist and palm centre are {distance} apart")]
    Degenerate { distance: f32 },
    #[error("unknown handedness label {0:?}")]
    UnknownHandedness(String),
}

/// Invalid scene configuration, reported by `SceneConfig::validate`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("axis clearance {clearance} must be smaller than the ornament radius {radius}")]
    ClearanceTooLarge { clearance: f32, radius: f32 },
    #[error("friction must lie in (0, 1), got {0}")]
    Friction(f32),
    #[error("scale range is inverted: min {min} > max {max}")]
    ScaleRange { min: f32, max: f32 },
    #[error("particle count must be at least 1")]
    EmptyField,
}
