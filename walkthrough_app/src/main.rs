//! Walkthrough demo application
//!
//! Loads navigation settings and a level, then replays a scripted key and
//! mouse track through the scene at a fixed frame rate, logging the pose,
//! gate decisions and camera switches. Run with `RUST_LOG=debug` to see every
//! denial.

use clap::{value_parser, Arg, Command};
use nav_engine::foundation::color::hsl_to_rgb;
use nav_engine::foundation::logging;
use nav_engine::foundation::math::constants::PI;
use nav_engine::prelude::*;
use slotmap::SlotMap;

const DEFAULT_FRAMES: u32 = 600;
const DEFAULT_DT: f32 = 1.0 / 60.0;
const WINDOW_SIZE: (f32, f32) = (1260.0, 720.0);

/// Models the bundled room refers to
const MODEL_NAMES: [&str; 5] = ["teapot", "box", "wall", "floor", "ceiling"];

/// Application errors
#[derive(thiserror::Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug)]
struct Options {
    config_path: Option<String>,
    level_path: Option<String>,
    save_level_path: Option<String>,
    frames: u32,
    delta_time: f32,
}

fn parse_options() -> Result<Options, AppError> {
    let matches = Command::new("walkthrough")
        .about("Replays a scripted walk through a level and logs each navigation decision")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Navigation settings (.toml or .ron)"),
        )
        .arg(
            Arg::new("level")
                .short('l')
                .long("level")
                .value_name("FILE")
                .help("Level layout (.toml or .ron); the bundled room is used if omitted"),
        )
        .arg(
            Arg::new("save-level")
                .long("save-level")
                .value_name("FILE")
                .help("Write the level in use to FILE before running"),
        )
        .arg(
            Arg::new("frames")
                .short('f')
                .long("frames")
                .value_name("COUNT")
                .help("Number of frames to simulate")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("dt")
                .long("dt")
                .value_name("SECONDS")
                .help("Fixed frame delta in seconds")
                .value_parser(value_parser!(f32)),
        )
        .get_matches();

    let delta_time = matches.get_one::<f32>("dt").copied().unwrap_or(DEFAULT_DT);
    if !(delta_time.is_finite() && delta_time > 0.0) {
        return Err(AppError::InvalidArgument(format!("--dt must be positive, got {delta_time}")));
    }

    Ok(Options {
        config_path: matches.get_one::<String>("config").cloned(),
        level_path: matches.get_one::<String>("level").cloned(),
        save_level_path: matches.get_one::<String>("save-level").cloned(),
        frames: matches.get_one::<u32>("frames").copied().unwrap_or(DEFAULT_FRAMES),
        delta_time,
    })
}

/// Feed the window events a player would produce on `frame`.
///
/// Walk toward the crate until blocked, look right, strafe, flick through the
/// overview cameras and back, then back away.
fn scripted_events(frame: u32, input: &mut InputState) {
    let (width, height) = WINDOW_SIZE;
    let centre = (f64::from(width) * 0.5, f64::from(height) * 0.5);

    match frame {
        0 => input.handle_key_input(KeyCode::W, true),
        180 => input.handle_key_input(KeyCode::W, false),
        181..=200 => input.handle_mouse_move(centre.0 + 40.0, centre.1),
        201 => input.handle_key_input(KeyCode::D, true),
        260 => input.handle_key_input(KeyCode::D, false),
        300 => input.handle_key_input(KeyCode::Q, true),
        360 => input.handle_key_input(KeyCode::Q, false),
        361 => input.handle_key_input(KeyCode::E, true),
        421 => input.handle_key_input(KeyCode::E, false),
        430 => input.handle_key_input(KeyCode::S, true),
        _ => {}
    }
}

/// Spin, bob and hue-cycle the centre teapot
fn animate_teapot(scene: &mut Scene, time: f32, hue: f32) {
    if let Some(teapot) = scene.entity_mut("Teapot") {
        teapot.tint = hsl_to_rgb(&Vec3::new(hue, 1.0, 0.75));
        teapot.rotation = Orientation::from_pitch_yaw(0.0, time * PI);
        teapot.position = Vec3::new(0.0, (time * PI).sin() * 0.25 + 1.0, 0.0);
    }
}

fn run(options: &Options) -> Result<(), AppError> {
    let config = match &options.config_path {
        Some(path) => NavigationConfig::load_from_file(path)?,
        None => NavigationConfig::default(),
    };
    let level = match &options.level_path {
        Some(path) => LevelDescription::load_from_file(path)?,
        None => LevelDescription::default(),
    };
    if let Some(path) = &options.save_level_path {
        level.save_to_file(path)?;
        log::info!("Level written to {}", path);
    }

    let mut scene = Scene::new(config, &level)?;

    let mut models: SlotMap<ModelId, &str> = SlotMap::with_key();
    for name in MODEL_NAMES {
        let id = models.insert(name);
        if scene.bind_model(name, id) == 0 {
            log::warn!("Model '{}' is not used by any entity", name);
        }
    }

    let (width, height) = WINDOW_SIZE;
    let mut input = InputState::new(Vec2::new(width, height));
    let mut timer = FrameTimer::new();
    let mut fps = FpsCounter::new();
    let mut hue = 0.0_f32;
    let mut blocked_frames = 0_u32;

    log::info!(
        "Replaying {} frames at {:.4}s per frame ({} models loaded)",
        options.frames,
        options.delta_time,
        models.len()
    );

    for frame in 0..options.frames {
        let now = f64::from(frame) * f64::from(options.delta_time);
        let delta_time = timer.tick(now);

        hue += delta_time;
        if hue > 1.0 {
            hue -= 1.0;
        }

        scripted_events(frame, &mut input);
        let report = scene.update(&input.take_frame(), delta_time);

        if report.camera_switched {
            log::info!("Frame {}: switched to {:?}", frame, report.active_camera);
        }
        if report.was_blocked() {
            blocked_frames += 1;
        }

        animate_teapot(&mut scene, timer.total_time(), hue);

        let draw_calls = scene.draw_calls();
        let uniform = scene.active_camera().uniform();
        log::trace!(
            "Frame {}: {} draw calls, {} collider boxes, {} uniform bytes",
            frame,
            draw_calls.len(),
            scene.collider_draw_calls().len(),
            uniform.as_bytes().len()
        );

        if let Some(sample) = fps.record(delta_time) {
            let player = scene.player_collider().ground_position();
            log::info!("FPS: {} | Player Pos: [{:.1}, {:.1}]", sample, player.x, player.y);
        }
    }

    let camera = scene.rig().camera(CameraId::FirstPerson);
    log::info!(
        "Finished at {:?} (pitch {:.3}, yaw {:.3}); movement blocked on {} frames",
        camera.position,
        camera.pitch,
        camera.yaw,
        blocked_frames
    );
    Ok(())
}

fn main() {
    logging::init();

    let result = parse_options().and_then(|options| run(&options));
    if let Err(e) = result {
        log::error!("Walkthrough failed: {}", e);
        std::process::exit(1);
    }
}
