//=========================================================================
// Reaching Arm Demo Binary
//
// Usage: reaching_arm [SCENE] [CONFIG]
//
//   SCENE   scene description (default assets/arm.scene.json)
//   CONFIG  play mode config  (default assets/play_mode.json, optional)
//
// Log output is controlled through RUST_LOG (default filter `info`).
//
//=========================================================================

use std::path::Path;

use log::{error, info};

use reaching_arm::prelude::*;

const DEFAULT_SCENE: &str = "assets/arm.scene.json";
const DEFAULT_CONFIG: &str = "assets/play_mode.json";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let scene_path = args.next().unwrap_or_else(|| DEFAULT_SCENE.to_string());
    let config_path = args.next();

    let config = match config_path {
        Some(path) => PlayModeConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => PlayModeConfig::load(DEFAULT_CONFIG)?,
        None => {
            info!("No config at {}, using defaults", DEFAULT_CONFIG);
            PlayModeConfig::default()
        }
    };

    let scene = Scene::load(&scene_path)?;
    let mut mode = PlayMode::new(scene, config)?;

    // Positions are logged at debug; the distance summary goes out at info.
    let snapshots = mode.subscribe_diagnostics();
    std::thread::spawn(move || {
        for snapshot in snapshots {
            info!(target: "reaching_arm::diagnostics", "head-goal distance {:.3}", snapshot.distance());
        }
    });

    EngineBuilder::new()
        .with_title("Reaching Arm")
        .build(Box::new(mode), Box::new(TraceRenderer::new()))
        .run()?;

    Ok(())
}
