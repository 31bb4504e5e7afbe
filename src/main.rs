//! Spinner Arena headless runner
//!
//! Runs the simulation for a fixed stretch of simulated time and prints a JSON
//! summary. Usage: `spinner-arena [spec.json] [seconds]`

use std::path::Path;
use std::process::ExitCode;

use spinner_arena::audio::AudioCue;
use spinner_arena::renderer::FrameSnapshot;
use spinner_arena::settings::Settings;
use spinner_arena::sim::{Driver, Registry, ResetSpec, TickInput};

/// Default run length (seconds)
const DEFAULT_SECONDS: f64 = 10.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Spinner Arena (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (spec_path, seconds) = match args.as_slice() {
        [] => (None, DEFAULT_SECONDS),
        [one] => match one.parse::<f64>() {
            Ok(s) => (None, s),
            Err(_) => (Some(one.as_str()), DEFAULT_SECONDS),
        },
        [path, secs, ..] => (Some(path.as_str()), secs.parse().unwrap_or(DEFAULT_SECONDS)),
    };

    let spec = match spec_path {
        Some(path) => match ResetSpec::load(Path::new(path)) {
            Ok(spec) => spec,
            Err(e) => {
                log::error!("Cannot load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => ResetSpec::default(),
    };

    let mut registry = match Registry::new(spec) {
        Ok(registry) => registry,
        Err(e) => {
            log::error!("Invalid simulation setup: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let settings = Settings::default();
    let mut cue = AudioCue::new();
    settings.configure_audio(&mut cue);

    let mut driver = Driver::default();
    let frames = (seconds / driver.step()).ceil() as u64;
    let frame_dt = driver.step();
    let mut max_height: f64 = 0.0;

    for frame in 0..frames {
        // Scripted demo input: the player hops at 1s, the arena at 2s
        let mut input = TickInput::default();
        if frame == 60 {
            input.player_jump = true;
        }
        if frame == 120 {
            input.arena_jump = true;
        }
        registry.apply(&input);

        driver.advance(frame_dt, |dt| registry.tick(dt, &mut cue));
        for s in &registry.spinners {
            max_height = max_height.max(s.height());
        }
    }

    let snapshot = FrameSnapshot::capture(&registry, &settings);
    let spinners: Vec<_> = registry
        .spinners
        .iter()
        .map(|s| {
            let p = s.position();
            serde_json::json!({
                "id": s.id,
                "player": s.is_player,
                "position": [p.x, p.y, p.z],
                "out_of_bounds": s.out_of_bounds,
                "collision_offset": s.collision.offset_translation().to_array(),
            })
        })
        .collect();
    let summary = serde_json::json!({
        "simulated_seconds": driver.clock.elapsed,
        "ticks": registry.time_ticks(),
        "collisions": registry.collision_count(),
        "cues_played": cue.played(),
        "max_height": max_height,
        "arena_offset": snapshot.arena_offset,
        "instance_bytes": snapshot.instance_bytes().len(),
        "spinners": spinners,
    });

    match serde_json::to_string_pretty(&summary) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to encode summary: {}", e);
            ExitCode::FAILURE
        }
    }
}
