//! Orrery - interactive planetary system explorer
//!
//! Loads the system and navigation configuration, then hands the scene
//! plugin a window to fly around in.

mod config;

use anyhow::Result;
use bevy::prelude::*;
use clap::Parser;
use orrery_scene::{NavSettings, OrreryScenePlugin, RadarSettings, SystemSpec};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(about = "Fly through a configurable planetary system")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "orrery.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write the default configuration to the config path and exit
    #[arg(long)]
    write_default_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Orrery v{}", env!("CARGO_PKG_VERSION"));

    if args.write_default_config {
        config::save_default_config(&args.config)?;
        return Ok(());
    }

    let config = config::load_config(&args.config)?;
    info!(
        bodies = config.bodies.len(),
        fly_speed = config.navigation.fly_speed,
        "Configuration loaded"
    );

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Orrery".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                // The viewer owns the subscriber; bevy must not install
                // its own
                .disable::<bevy::log::LogPlugin>(),
        )
        .insert_resource(ClearColor(Color::srgb(0.004, 0.004, 0.012)))
        .insert_resource(NavSettings(config.navigation))
        .insert_resource(RadarSettings(config.radar))
        .insert_resource(SystemSpec(config.bodies))
        .add_plugins(OrreryScenePlugin)
        .run();

    Ok(())
}
