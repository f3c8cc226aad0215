//! Authoritative game state: combatants, bullets, AI, and session flow.

pub mod ai;
pub mod bullet;
pub mod combat;
pub mod player;
pub mod session;
pub mod shape;
pub mod spawner;
pub mod tuning;
pub mod vision;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use ai::{AiController, AiState};
pub use bullet::{Bullet, BulletPool, FireBullet, PoolError};
pub use combat::BulletHit;
pub use player::{LastRun, Player, PlayerCommand};
pub use session::{RestartGame, Session, StartGame};
pub use shape::{Shape, ShapeWithMask};
pub use spawner::{AiRoster, AiSpawner};
pub use tuning::{AiTuning, Difficulty, PlayerSettings, PoolSettings, SpawnerSettings};
pub use vision::Vision;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    MainMenu,
    Rules,
    Config,
    Playing,
    GameOver,
    Won,
}

/// Single source of randomness so a seed reproduces a whole run.
#[derive(Resource)]
pub struct GameRng(pub StdRng);

impl GameRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

/// Anything that can see, be seen, and be shot.
#[derive(Component, Debug, Clone, Copy)]
pub struct Combatant {
    pub radius: f32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SoundEffect {
    Fire,
    Killed,
    MaskBreak,
}

#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub struct SoundCue {
    pub effect: SoundEffect,
    pub volume: f32,
}

impl SoundCue {
    pub fn new(effect: SoundEffect, volume: f32) -> Self {
        Self { effect, volume }
    }
}

/// Moves `from` towards `to` by at most `max_step`, never overshooting.
pub fn move_towards(from: Vec2, to: Vec2, max_step: f32) -> Vec2 {
    let delta = to - from;
    let dist = delta.length();
    if dist <= max_step || dist == 0.0 {
        to
    } else {
        from + delta / dist * max_step
    }
}

pub struct SimPlugin;
impl Plugin for SimPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .init_resource::<PoolSettings>()
            .init_resource::<SpawnerSettings>()
            .init_resource::<PlayerSettings>()
            .init_resource::<AiTuning>()
            .init_resource::<GameRng>()
            .init_resource::<Session>()
            .init_resource::<AiRoster>()
            .init_resource::<BulletPool>()
            .init_resource::<LastRun>()
            .insert_resource(AiSpawner::new(SpawnerSettings::default().interval))
            .add_event::<StartGame>()
            .add_event::<RestartGame>()
            .add_event::<PlayerCommand>()
            .add_event::<FireBullet>()
            .add_event::<BulletHit>()
            .add_event::<SoundCue>()
            .add_systems(Startup, bullet::stock_bullet_pool)
            .add_systems(
                Update,
                (session::start_game, session::restart_game).chain(),
            )
            .add_systems(
                Update,
                (
                    player::apply_player_commands,
                    player::move_player,
                    spawner::tick_spawner,
                    vision::update_vision,
                    ai::drive_ai,
                    bullet::launch_bullets,
                    bullet::move_bullets,
                    combat::detect_bullet_hits,
                    combat::resolve_hits,
                    player::check_outcome,
                )
                    .chain()
                    .after(session::restart_game)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}
