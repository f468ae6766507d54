//! Headless demo driving the orbit camera controller with scripted input.

use std::path::Path;

use glam::Vec2;
use orbit_rig::camera::{Camera, OrbitCameraController, OrbitPose};
use orbit_rig::input::{InputEvent, MouseButton, NullSurface, Touches};
use orbit_rig::options::Options;
use orbit_rig::util::easing::EasingFunction;
use orbit_rig::util::frame_timing::FrameTiming;
use orbit_rig::OrbitError;
use web_time::{Duration, Instant};

const FRAMES: u32 = 240;

/// Synthetic input for frame `frame`: a drag, a few wheel notches, a
/// pinch, and nothing while the fly-to runs.
fn scripted_input(frame: u32) -> Vec<InputEvent> {
    match frame {
        0 => vec![InputEvent::PointerDown {
            x: 400.0,
            y: 300.0,
            button: MouseButton::Left,
        }],
        1..=30 => vec![InputEvent::PointerMove {
            x: 400.0 + frame as f32 * 4.0,
            y: 300.0 - frame as f32 * 1.5,
        }],
        31 => vec![InputEvent::PointerUp {
            button: MouseButton::Left,
        }],
        40 | 44 | 48 => vec![InputEvent::Wheel { delta_y: 100.0 }],
        150 => vec![InputEvent::TouchStart {
            touches: Touches::two(Vec2::new(300.0, 300.0), Vec2::new(500.0, 300.0)),
        }],
        151..=170 => {
            let spread = 200.0 - (frame - 150) as f32 * 5.0;
            vec![InputEvent::TouchMove {
                touches: Touches::two(
                    Vec2::new(400.0 - spread / 2.0, 300.0),
                    Vec2::new(400.0 + spread / 2.0, 300.0),
                ),
            }]
        }
        171 => vec![InputEvent::TouchEnd {
            touches: Touches::NONE,
        }],
        _ => Vec::new(),
    }
}

fn run(options: &Options) -> Result<(), OrbitError> {
    let mut surface = NullSurface::default();
    let mut rig = OrbitCameraController::new(
        Camera::default(),
        &mut surface,
        options.orbit.clone(),
    )?
    .with_target([0.0_f32, 1.0, 0.0])?;

    let start = Instant::now();
    let mut timing = FrameTiming::starting_at(options.frame.target_fps, start);
    let step = if timing.min_frame_duration().is_zero() {
        Duration::from_millis(16)
    } else {
        timing.min_frame_duration()
    };

    let mut now = start;
    for frame in 0..FRAMES {
        now += step;
        let dt = timing.tick(now);

        let consumed = rig.handle_events(scripted_input(frame));
        if frame == 60 {
            let handle = rig.start_tween(
                OrbitPose::new(135.0, 35.0, 6.0),
                Duration::from_millis(1200),
                EasingFunction::DEFAULT,
                now,
            )?;
            log::info!("frame {frame}: fly-to started ({handle:?})");
        }

        rig.frame(now, dt);

        if frame % 20 == 0 || (consumed > 0 && frame % 5 == 0) {
            let eye = rig.camera().eye;
            log::info!(
                "frame {frame:3}: yaw {:7.2} pitch {:6.2} distance {:5.2} eye ({:6.2}, {:6.2}, {:6.2}) {:?}",
                rig.yaw(),
                rig.pitch(),
                rig.distance(),
                eye.x,
                eye.y,
                eye.z,
                rig.motion_source(),
            );
        }
    }

    log::info!("simulated {FRAMES} frames at {:.1} fps", timing.fps());
    let camera = rig.destroy(&mut surface);
    log::info!("final view matrix {:?}", camera.build_view());
    Ok(())
}

fn write_schema(path: &Path) -> Result<(), OrbitError> {
    let schema = serde_json::to_string_pretty(&Options::json_schema())
        .map_err(|e| OrbitError::OptionsParse(e.to_string()))?;
    std::fs::write(path, schema)?;
    log::info!("options schema written to {}", path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.as_slice() {
        [flag, path] if flag == "--schema" => write_schema(Path::new(path)),
        [path] => Options::load(Path::new(path)).and_then(|opts| run(&opts)),
        [] => run(&Options::default()),
        _ => {
            log::error!("Usage: orbit-rig [OPTIONS.toml] | --schema <OUT.json>");
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
