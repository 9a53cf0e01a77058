//! The installation: field, ornaments and every input source behind one tick.
//!
//! Positions produced here are in the group's local frame. The renderer
//! applies the group rotation ([`Installation::rotation`]) about the Y axis.

use crate::config::SceneConfig;
use crate::constants::{MAX_TICK_SECONDS, ORNAMENT_PICK_RADIUS};
use crate::entity::{build_particle_field, DualPositionEntity};
use crate::error::ConfigError;
use crate::gesture::{GestureAction, GestureClassifier, GestureEvent, GestureStatus, HandPose};
use crate::input::{ray_sphere, PointerEvent, PointerPhase, PointerTarget};
use crate::landmarks::{DetectorFrame, HandSample};
use crate::mailbox::{LandmarkSender, LandmarkSubscription};
use crate::morph::{MorphEngine, MorphState};
use crate::ornaments::{OrnamentId, PhotoOrnament, PhotoOrnamentManager};
use crate::rotation::InertialRotationController;
use crate::state::{Camera, DrawInstance, INSTANCE_ORNAMENT, INSTANCE_PARTICLE};
use glam::{Quat, Vec2, Vec3};
use rand::prelude::*;

/// Outbound notifications for the viewer and the toggle indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallationEvent {
    Action(GestureAction),
    StateChanged(MorphState),
}

/// Hand-derived values shared between detector ingestion and the tick.
///
/// Single writer per field: only frame ingestion writes these, the rotation
/// and status readers only read them, and a reader may see values one tick
/// old. A host that ingests on a preemptive thread must wrap this in a lock
/// or atomics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InteractionContext {
    pub hand_active: bool,
    pub hand_x: Option<f32>,
    pub last_pose: Option<HandPose>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PointerMode {
    #[default]
    Idle,
    Rotating,
    Ornament(OrnamentId),
}

pub struct Installation {
    rng: StdRng,
    camera: Camera,
    viewport: Vec2,
    particles: Vec<DualPositionEntity>,
    ornaments: PhotoOrnamentManager,
    morph: MorphEngine,
    rotation: InertialRotationController,
    classifier: GestureClassifier,
    subscription: Option<LandmarkSubscription>,
    context: InteractionContext,
    pointer: PointerMode,
    clock_ms: f64,
    events: Vec<InstallationEvent>,
}

impl Installation {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let SceneConfig {
            particle_count,
            seed,
            field,
            ornaments,
            morph,
            rotation,
            gesture,
            camera,
        } = config;

        let mut rng = StdRng::seed_from_u64(seed);
        let particles = build_particle_field(particle_count, &field, &mut rng);
        log::info!(
            "[installation] particles={} seed={} scatter_r={:.1} arm={:.1}",
            particles.len(),
            seed,
            field.scatter_radius,
            field.arm_length
        );

        Ok(Self {
            rng,
            camera,
            viewport: Vec2::new(1280.0, 720.0),
            particles,
            ornaments: PhotoOrnamentManager::new(ornaments),
            morph: MorphEngine::new(morph),
            rotation: InertialRotationController::new(rotation),
            classifier: GestureClassifier::new(gesture),
            subscription: None,
            context: InteractionContext::default(),
            pointer: PointerMode::Idle,
            clock_ms: 0.0,
            events: Vec::new(),
        })
    }

    // ---------------- Accessors ----------------

    pub fn particles(&self) -> &[DualPositionEntity] {
        &self.particles
    }

    pub fn ornaments(&self) -> &PhotoOrnamentManager {
        &self.ornaments
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn morph_state(&self) -> MorphState {
        self.morph.state()
    }

    pub fn progress(&self) -> f32 {
        self.morph.progress()
    }

    /// Group rotation about Y, in radians.
    pub fn rotation(&self) -> f32 {
        self.rotation.rotation()
    }

    pub fn angular_velocity(&self) -> f32 {
        self.rotation.angular_velocity()
    }

    pub fn gesture_status(&self) -> GestureStatus {
        self.classifier.status()
    }

    pub fn interaction(&self) -> InteractionContext {
        self.context
    }

    pub fn gestures_enabled(&self) -> bool {
        self.subscription.is_some()
    }

    /// Milliseconds of simulated time since creation.
    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    pub fn drain_events(&mut self) -> Vec<InstallationEvent> {
        std::mem::take(&mut self.events)
    }

    // ---------------- Commands ----------------

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width.max(1.0), height.max(1.0));
        self.camera.aspect = self.viewport.x / self.viewport.y;
    }

    /// Returns `true` and queues a notification when the state changed.
    pub fn set_morph_state(&mut self, state: MorphState) -> bool {
        let changed = self.morph.set_state(state);
        if changed {
            self.events.push(InstallationEvent::StateChanged(state));
        }
        changed
    }

    pub fn toggle_morph(&mut self) -> MorphState {
        let next = self.morph.state().toggled();
        self.set_morph_state(next);
        next
    }

    pub fn add_image(&mut self, label: impl Into<String>) -> OrnamentId {
        self.ornaments.add(label, &mut self.rng)
    }

    /// Unknown or already deleted identifiers are ignored.
    pub fn delete_image(&mut self, id: OrnamentId) -> bool {
        if self.pointer == PointerMode::Ornament(id) {
            self.pointer = PointerMode::Idle;
        }
        self.ornaments.remove(id).is_some()
    }

    pub fn clear_images(&mut self) {
        if matches!(self.pointer, PointerMode::Ornament(_)) {
            self.pointer = PointerMode::Idle;
        }
        self.ornaments.clear();
    }

    /// Subscribe a detector. Any previous subscription is revoked first.
    pub fn enable_gestures(&mut self) -> LandmarkSender {
        if let Some(old) = self.subscription.take() {
            old.revoke();
        }
        let (subscription, sender) = LandmarkSubscription::open();
        self.subscription = Some(subscription);
        log::info!("[gesture] detector subscribed");
        sender
    }

    /// Cancel the subscription and drop every hand-derived contribution.
    /// Deliveries racing with this call are discarded.
    pub fn disable_gestures(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.revoke();
            log::info!("[gesture] detector unsubscribed");
        }
        self.context = InteractionContext::default();
        self.classifier.reset();
        self.rotation.cancel_gesture_spin();
    }

    // ---------------- Pointer ----------------

    pub fn pointer(&mut self, ev: PointerEvent) {
        match ev.phase {
            PointerPhase::Down => self.pointer_down(ev),
            PointerPhase::Move => match self.pointer {
                PointerMode::Rotating => self.rotation.drag_to(ev.x),
                PointerMode::Ornament(_) => {
                    let (ro, rd) = self.local_ray(ev.x, ev.y);
                    self.ornaments.drag_to(ro, rd);
                }
                PointerMode::Idle => {}
            },
            PointerPhase::Up => self.release_pointer(),
        }
    }

    /// End whatever the pointer currently holds.
    fn release_pointer(&mut self) {
        match std::mem::take(&mut self.pointer) {
            PointerMode::Rotating => self.rotation.end_drag(),
            PointerMode::Ornament(_) => {
                self.ornaments.end_drag();
            }
            PointerMode::Idle => {}
        }
    }

    fn pointer_down(&mut self, ev: PointerEvent) {
        // a second press without a release (multi-touch, lost pointerup)
        // replaces the interaction in progress
        self.release_pointer();
        match ev.target {
            PointerTarget::Background => {
                self.rotation.begin_drag(ev.x);
                self.pointer = PointerMode::Rotating;
            }
            PointerTarget::Ornament(id) => {
                let Some(rendered) = self.ornament_position(id) else {
                    log::debug!("[ornaments] pointer down on stale {}", id);
                    return;
                };
                let (ro, rd) = self.local_ray(ev.x, ev.y);
                let normal = self.group_rotation().inverse() * -self.camera.forward();
                if self.ornaments.begin_drag(id, rendered, ro, rd, normal) {
                    self.pointer = PointerMode::Ornament(id);
                }
            }
        }
    }

    /// Ornament under viewport pixel (`x`, `y`), nearest first.
    pub fn pick_ornament(&self, x: f32, y: f32) -> Option<OrnamentId> {
        let (ro, rd) = self.local_ray(x, y);
        let mut best = None::<(OrnamentId, f32)>;
        for ornament in self.ornaments.iter() {
            let center = self.resolve_ornament(ornament);
            let radius = ORNAMENT_PICK_RADIUS * ornament.entity.scale;
            if let Some(t) = ray_sphere(ro, rd, center, radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((ornament.id, t)),
                }
            }
        }
        best.map(|(id, _)| id)
    }

    fn group_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.rotation.rotation())
    }

    /// Pointer ray expressed in the group's local frame.
    fn local_ray(&self, x: f32, y: f32) -> (Vec3, Vec3) {
        let (ro, rd) = self
            .camera
            .screen_ray(x, y, self.viewport.x, self.viewport.y);
        let inv = self.group_rotation().inverse();
        (inv * ro, inv * rd)
    }

    // ---------------- Tick ----------------

    /// Advance everything by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_TICK_SECONDS)
        } else {
            0.0
        };
        self.clock_ms += dt as f64 * 1000.0;

        let frame = self.subscription.as_ref().and_then(LandmarkSubscription::poll);
        if let Some(frame) = frame {
            self.ingest(frame);
        }
        // the group holds still under a dragged ornament
        if !matches!(self.pointer, PointerMode::Ornament(_)) {
            self.rotation.tick(dt, self.context.hand_active);
        }
        self.morph.tick(dt);
    }

    fn ingest(&mut self, frame: DetectorFrame) {
        match frame {
            DetectorFrame::Absent => {
                if self.context.hand_active {
                    log::debug!("[gesture] hand lost");
                }
                self.context.hand_active = false;
                self.context.hand_x = None;
                self.classifier.observe_absence();
                self.rotation.release_hand();
            }
            DetectorFrame::Hand(raw) => {
                let sample = match HandSample::from_raw(&raw) {
                    Ok(sample) => sample,
                    Err(e) => {
                        log::debug!("[gesture] skipped frame: {}", e);
                        return;
                    }
                };
                let result = self.classifier.classify(&sample, self.clock_ms);
                self.context.hand_active = true;
                self.context.hand_x = Some(result.hand_x);
                self.context.last_pose = self.classifier.last_pose();
                if self.pointer == PointerMode::Idle {
                    self.rotation.apply_hand_x(result.hand_x);
                } else {
                    self.rotation.track_hand_x(result.hand_x);
                }
                for event in result.events {
                    self.apply_gesture_event(event);
                }
            }
        }
    }

    fn apply_gesture_event(&mut self, event: GestureEvent) {
        if let Some(action) = event.action() {
            self.events.push(InstallationEvent::Action(action));
        }
        if let Some(state) = event.morph_state() {
            self.set_morph_state(state);
        }
    }

    // ---------------- Draw output ----------------

    fn resolve_ornament(&self, ornament: &PhotoOrnament) -> Vec3 {
        self.morph
            .resolve(&ornament.entity, self.ornaments.float_gain(ornament.id))
    }

    /// Rendered local position of ornament `id`.
    pub fn ornament_position(&self, id: OrnamentId) -> Option<Vec3> {
        self.ornaments.get(id).map(|o| self.resolve_ornament(o))
    }

    /// Viewport pixel position of ornament `id` after the group rotation.
    pub fn ornament_screen_position(&self, id: OrnamentId) -> Option<Vec2> {
        let local = self.ornament_position(id)?;
        self.camera
            .world_to_screen(self.group_rotation() * local, self.viewport.x, self.viewport.y)
    }

    pub fn particle_instances(&self, out: &mut Vec<DrawInstance>) {
        out.clear();
        out.extend(self.particles.iter().map(|p| DrawInstance {
            position: self.morph.resolve(p, 1.0).to_array(),
            scale: p.scale,
            spin: self.morph.spin(p),
            kind: INSTANCE_PARTICLE,
        }));
    }

    pub fn ornament_instances(&self, out: &mut Vec<(OrnamentId, DrawInstance)>) {
        out.clear();
        out.extend(self.ornaments.iter().map(|o| {
            (
                o.id,
                DrawInstance {
                    position: self.resolve_ornament(o).to_array(),
                    scale: o.entity.scale,
                    spin: self.morph.spin(&o.entity),
                    kind: INSTANCE_ORNAMENT,
                },
            )
        }));
    }
}
