//! Global blend between the scattered and structured layouts.
//!
//! Progress chases the target of the current [`MorphState`] with a
//! frame-rate independent exponential step. Each entity's rendered position is
//! a smoothstep blend of its two targets plus a floating offset that fades out
//! as the structure forms.

use crate::constants::{
    FLOAT_AMPLITUDE, FLOAT_FREQUENCIES, FLOAT_PHASE_SHIFTS, MORPH_RATE, MORPH_SNAP_EPSILON,
};
use crate::entity::DualPositionEntity;
use glam::Vec3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MorphState {
    #[default]
    Scattered,
    Structured,
}

impl MorphState {
    /// Progress value this state pulls toward.
    pub fn target(self) -> f32 {
        match self {
            MorphState::Scattered => 0.0,
            MorphState::Structured => 1.0,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            MorphState::Scattered => MorphState::Structured,
            MorphState::Structured => MorphState::Scattered,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MorphState::Scattered => "scattered",
            MorphState::Structured => "structured",
        }
    }
}

#[derive(Clone, Debug)]
pub struct MorphParams {
    /// Exponential approach rate per second. Must be positive.
    pub rate: f32,
    pub float_amplitude: f32,
    pub float_frequencies: [f32; 3],
    pub float_phase_shifts: [f32; 3],
}

impl Default for MorphParams {
    fn default() -> Self {
        Self {
            rate: MORPH_RATE,
            float_amplitude: FLOAT_AMPLITUDE,
            float_frequencies: FLOAT_FREQUENCIES,
            float_phase_shifts: FLOAT_PHASE_SHIFTS,
        }
    }
}

/// Smoothstep, `3p² - 2p³`, with the input clamped to `[0, 1]`.
#[inline]
pub fn ease(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

/// Interpolated (non-floating) position at `progress`.
///
/// Written as a weighted sum so both endpoints are reproduced bit-exactly.
#[inline]
pub fn blend(scatter: Vec3, structured: Vec3, progress: f32) -> Vec3 {
    let e = ease(progress);
    scatter * (1.0 - e) + structured * e
}

pub struct MorphEngine {
    pub params: MorphParams,
    state: MorphState,
    progress: f32,
    elapsed: f64,
}

impl MorphEngine {
    pub fn new(params: MorphParams) -> Self {
        Self {
            params,
            state: MorphState::Scattered,
            progress: 0.0,
            elapsed: 0.0,
        }
    }

    pub fn state(&self) -> MorphState {
        self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn eased_progress(&self) -> f32 {
        ease(self.progress)
    }

    /// Seconds of simulated time, used as the phase clock for floating.
    pub fn elapsed(&self) -> f32 {
        self.elapsed as f32
    }

    /// Returns `true` when the state actually changed.
    pub fn set_state(&mut self, state: MorphState) -> bool {
        if self.state == state {
            return false;
        }
        log::info!(
            "[morph] {} -> {} at progress {:.3}",
            self.state.as_str(),
            state.as_str(),
            self.progress
        );
        self.state = state;
        true
    }

    pub fn toggle(&mut self) -> MorphState {
        self.set_state(self.state.toggled());
        self.state
    }

    /// Advance progress and the floating clock by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        self.elapsed += dt as f64;
        let target = self.state.target();
        // the step fraction is capped at 1 so progress lands on, never past, the target
        let step = (self.params.rate * dt).clamp(0.0, 1.0);
        self.progress += (target - self.progress) * step;
        if (target - self.progress).abs() < MORPH_SNAP_EPSILON {
            self.progress = target;
        }
        self.progress = self.progress.clamp(0.0, 1.0);
    }

    /// Floating offset for `entity`; `gain` scales it (0 while dragged).
    pub fn float_offset(&self, entity: &DualPositionEntity, gain: f32) -> Vec3 {
        let amplitude = self.params.float_amplitude * (1.0 - self.eased_progress()) * gain;
        if amplitude == 0.0 {
            return Vec3::ZERO;
        }
        let t = self.elapsed();
        let f = self.params.float_frequencies;
        let s = self.params.float_phase_shifts;
        let phase = entity.phase_offset;
        Vec3::new(
            (f[0] * t + phase + s[0]).sin(),
            (f[1] * t + phase + s[1]).sin(),
            (f[2] * t + phase + s[2]).sin(),
        ) * amplitude
    }

    /// Rendered position of `entity` this frame.
    pub fn resolve(&self, entity: &DualPositionEntity, gain: f32) -> Vec3 {
        blend(entity.scatter_position, entity.structured_position, self.progress)
            + self.float_offset(entity, gain)
    }

    /// Self-rotation angle of `entity` in radians.
    pub fn spin(&self, entity: &DualPositionEntity) -> f32 {
        let speed = entity.rotation_speed.unwrap_or(0.0);
        entity.phase_offset + speed * self.elapsed()
    }
}
