use anyhow::Context;
use crossfield_core::{
    DrawInstance, Installation, InstallationEvent, OrnamentId, PointerEvent, PointerTarget,
    SceneConfig,
};
use instant::Instant;
use std::str::FromStr;
use std::time::Duration;

mod detector;

const VIEWPORT: (f32, f32) = (1280.0, 720.0);
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Scripted interactions standing in for a person at the screen.
#[derive(Clone, Debug)]
enum Cue {
    AddImage(&'static str),
    /// Drag the background from `from_x` to `to_x` and let go.
    Fling { from_x: f32, to_x: f32 },
    /// Drag the n-th ornament by a pixel offset.
    DragOrnament { nth: usize, offset: (f32, f32) },
    DeleteImage { nth: usize },
    Toggle,
    DisableGestures,
}

fn env_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key}={raw:?} is not valid")),
        Err(_) => Ok(default),
    }
}

fn run_cue(installation: &mut Installation, ids: &mut Vec<OrnamentId>, cue: &Cue) {
    match cue {
        Cue::AddImage(label) => ids.push(installation.add_image(*label)),
        Cue::Fling { from_x, to_x } => {
            let y = VIEWPORT.1 * 0.5;
            installation.pointer(PointerEvent::down(*from_x, y, PointerTarget::Background));
            let steps = 6;
            for i in 1..=steps {
                let x = from_x + (to_x - from_x) * i as f32 / steps as f32;
                installation.pointer(PointerEvent::moved(x, y));
            }
            installation.pointer(PointerEvent::up(*to_x, y));
            log::info!(
                "[host] fling released at {:.3} rad/s",
                installation.angular_velocity()
            );
        }
        Cue::DragOrnament { nth, offset } => {
            let Some(id) = ids.get(*nth).copied() else {
                return;
            };
            let Some(start) = installation.ornament_screen_position(id) else {
                log::warn!("[host] ornament {} is off screen", id);
                return;
            };
            let picked = installation.pick_ornament(start.x, start.y);
            log::info!("[host] pick at ornament {} found {:?}", id, picked);
            installation.pointer(PointerEvent::down(start.x, start.y, PointerTarget::Ornament(id)));
            installation.pointer(PointerEvent::moved(start.x + offset.0, start.y + offset.1));
            installation.pointer(PointerEvent::up(start.x + offset.0, start.y + offset.1));
            if let Some(o) = installation.ornaments().get(id) {
                let p = o.entity.structured_position;
                log::info!(
                    "[host] ornament {} now structured at ({:.2},{:.2},{:.2})",
                    id,
                    p.x,
                    p.y,
                    p.z
                );
            }
        }
        Cue::DeleteImage { nth } => {
            if let Some(id) = ids.get(*nth).copied() {
                let removed = installation.delete_image(id);
                log::info!("[host] delete {} -> {}", id, removed);
            }
        }
        Cue::Toggle => {
            let state = installation.toggle_morph();
            log::info!("[host] toggled to {}", state.as_str());
        }
        Cue::DisableGestures => installation.disable_gestures(),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let defaults = SceneConfig::default();
    let config = SceneConfig {
        seed: env_or("CROSSFIELD_SEED", defaults.seed)?,
        particle_count: env_or("CROSSFIELD_PARTICLES", defaults.particle_count)?,
        ..defaults
    };
    let seconds: f32 = env_or("CROSSFIELD_SECONDS", 14.0)?;

    let mut installation = Installation::new(config).context("invalid scene configuration")?;
    installation.set_viewport(VIEWPORT.0, VIEWPORT.1);

    let mut ids: Vec<OrnamentId> = ["aurora.jpg", "harbour.png", "picnic.jpg"]
        .into_iter()
        .map(|label| installation.add_image(label))
        .collect();

    let sender = installation.enable_gestures();
    let detector = detector::spawn(sender).context("failed to start the landmark detector")?;

    let mut cues: Vec<(f32, Cue)> = vec![
        (1.0, Cue::AddImage("late-arrival.jpg")),
        (3.0, Cue::Fling { from_x: 400.0, to_x: 700.0 }),
        (5.0, Cue::DragOrnament { nth: 0, offset: (80.0, -40.0) }),
        (7.0, Cue::DeleteImage { nth: 1 }),
        (7.5, Cue::DeleteImage { nth: 1 }),
        (9.0, Cue::Toggle),
        (seconds - 2.0, Cue::DisableGestures),
    ];
    cues.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut cues = cues.into_iter().peekable();

    let start = Instant::now();
    let mut last = start;
    let mut next_report = 1.0_f32;
    let mut particles: Vec<DrawInstance> = Vec::with_capacity(installation.particles().len());
    let mut ornaments = Vec::new();

    loop {
        let now = Instant::now();
        let dt = (now - last).as_secs_f32();
        last = now;
        let elapsed = (now - start).as_secs_f32();
        if elapsed >= seconds {
            break;
        }

        while let Some((_, cue)) = cues.next_if(|(at, _)| *at <= elapsed) {
            run_cue(&mut installation, &mut ids, &cue);
        }

        installation.tick(dt);
        for event in installation.drain_events() {
            match event {
                InstallationEvent::Action(action) => log::info!("[viewer] {:?}", action),
                InstallationEvent::StateChanged(state) => {
                    log::info!("[indicator] {}", state.as_str())
                }
            }
        }

        installation.particle_instances(&mut particles);
        installation.ornament_instances(&mut ornaments);

        if elapsed >= next_report {
            next_report += 1.0;
            let ctx = installation.interaction();
            log::info!(
                "[frame] t={:.1}s state={} progress={:.3} rot={:.2} vel={:.3} gesture={:?} hand_x={:?} ornaments={} upload={}B",
                elapsed,
                installation.morph_state().as_str(),
                installation.progress(),
                installation.rotation(),
                installation.angular_velocity(),
                installation.gesture_status(),
                ctx.hand_x,
                ornaments.len(),
                DrawInstance::as_bytes(&particles).len()
            );
        }

        std::thread::sleep(FRAME_INTERVAL);
    }

    installation.disable_gestures();
    match detector.join() {
        Ok(frames) => log::info!("[host] detector delivered {} frames", frames),
        Err(_) => log::error!("[host] detector thread panicked"),
    }
    Ok(())
}
