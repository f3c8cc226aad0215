use std::path::PathBuf;

use anyhow::Context;
use bevy::core_pipeline::bloom::BloomSettings;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::Parser;
use masquerade_arena::config::GameConfig;
use masquerade_arena::domain::simulation::Difficulty;
use masquerade_arena::{InputPlugin, MainCamera, SimPlugin, SoundPlugin, UiPlugin};

/// World units per screen pixel at default zoom.
const WORLD_SCALE: f32 = 1.0 / 40.0;

/// Top-down arena shooter where everyone may be wearing a mask.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON tuning file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// AI difficulty preset, overrides the tuning file
    #[arg(short, long, value_enum)]
    difficulty: Option<Difficulty>,
    /// Seed for a reproducible run
    #[arg(short, long)]
    seed: Option<u64>,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path).context("loading tuning file")?,
        None => GameConfig::default(),
    };
    if args.difficulty.is_some() {
        config.difficulty = args.difficulty;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.1)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Masquerade Arena".into(),
                        resolution: (1400., 800.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: if args.verbose { Level::DEBUG } else { Level::INFO },
                    ..default()
                }),
        );
    config.install(&mut app);
    let exit = app
        .add_plugins((SimPlugin, UiPlugin, InputPlugin, SoundPlugin))
        .add_systems(Startup, setup_camera)
        .run();
    match exit {
        AppExit::Success => Ok(()),
        AppExit::Error(code) => anyhow::bail!("exited with code {code}"),
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera2dBundle {
            camera: Camera {
                hdr: true,
                ..default()
            },
            tonemapping: Tonemapping::TonyMcMapface,
            transform: Transform::from_xyz(0.0, 0.0, 999.0).with_scale(Vec3::splat(WORLD_SCALE)),
            ..default()
        },
        BloomSettings::NATURAL,
        MainCamera,
    ));
}
