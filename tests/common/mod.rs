#![allow(dead_code)]

use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use masquerade_arena::domain::simulation::ai::AI_RADIUS;
use masquerade_arena::domain::simulation::{
    AiController, AiTuning, AppState, Combatant, GameRng, Player, Shape, ShapeWithMask,
    SimPlugin, SpawnerSettings, StartGame, Vision,
};
use masquerade_arena::MainCamera;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const FRAME: Duration = Duration::from_millis(50);

/// Headless app running the simulation at a fixed 50 ms per frame.
pub fn sim_app(seed: u64) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(GameRng::seeded(seed))
        .add_plugins(SimPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.world_mut()
        .spawn((MainCamera, Transform::default(), GlobalTransform::default()));
    app
}

/// Session with the spawner off so each test places its own AIs.
pub fn arena(seed: u64) -> App {
    let mut app = sim_app(seed);
    app.insert_resource(SpawnerSettings {
        enabled: false,
        ..default()
    });
    start_session(&mut app);
    app
}

/// Starts a session and runs until the player exists and time is flowing.
pub fn start_session(app: &mut App) {
    app.world_mut().send_event(StartGame);
    app.world_mut()
        .resource_mut::<NextState<AppState>>()
        .set(AppState::Playing);
    run_frames(app, 3);
}

pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

pub fn state(app: &App) -> AppState {
    *app.world().resource::<State<AppState>>().get()
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
}

pub fn masked(true_shape: Shape, mask: Option<Shape>) -> ShapeWithMask {
    let mut shape = ShapeWithMask::new(true_shape);
    if let Some(mask) = mask {
        shape.set_mask(mask);
    }
    shape
}

pub fn set_player_shape(app: &mut App, shape: ShapeWithMask) -> Entity {
    let player = player(app);
    *app.world_mut().get_mut::<ShapeWithMask>(player).unwrap() = shape;
    player
}

pub fn ai_count(app: &mut App) -> usize {
    app.world_mut()
        .query::<&AiController>()
        .iter(app.world())
        .count()
}

/// AI that neither moves nor acquires targets for the length of a test.
pub fn inert_tuning(detection_range: f32) -> AiTuning {
    AiTuning {
        detection_range,
        move_speed: 0.0,
        spot_time_min: 30.0,
        spot_time_max: 30.0,
        ..default()
    }
}

pub fn spawn_inert_ai(app: &mut App, pos: Vec2, shape: ShapeWithMask, detection_range: f32) -> Entity {
    spawn_ai_with(app, pos, shape, inert_tuning(detection_range))
}

pub fn spawn_ai_with(app: &mut App, pos: Vec2, shape: ShapeWithMask, tuning: AiTuning) -> Entity {
    let mut rng = StdRng::seed_from_u64(0);
    let controller = AiController::new(pos, tuning, &mut rng);
    app.world_mut()
        .spawn((
            controller,
            shape,
            Vision::default(),
            Combatant { radius: AI_RADIUS },
            SpatialBundle::from_transform(Transform::from_translation(pos.extend(1.0))),
        ))
        .id()
}
