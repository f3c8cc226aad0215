use bevy::prelude::*;
use rand::Rng;

use super::ai::{AiController, AI_RADIUS};
use super::player::Player;
use super::shape::{Shape, ShapeWithMask};
use super::tuning::{AiTuning, SpawnerSettings, ARENA_HALF_EXTENTS};
use super::vision::Vision;
use super::{Combatant, GameRng};
use crate::MainCamera;

/// Repeating spawn tick. Stopped until a session starts.
#[derive(Resource, Debug)]
pub struct AiSpawner {
    pub timer: Timer,
    pub running: bool,
}

impl AiSpawner {
    pub fn new(interval: f32) -> Self {
        Self {
            timer: Timer::from_seconds(interval, TimerMode::Repeating),
            running: false,
        }
    }

    pub fn restart(&mut self, interval: f32, enabled: bool) {
        self.timer = Timer::from_seconds(interval, TimerMode::Repeating);
        self.running = enabled;
    }
}

/// Every AI spawned this session. Dead entries are pruned on each tick.
#[derive(Resource, Debug, Default)]
pub struct AiRoster(pub Vec<Entity>);

/// Draws up to `attempts` points in the arena, rejecting any closer than
/// `safe_distance` to `camera_center`.
pub fn sample_spawn_point(
    rng: &mut impl Rng,
    camera_center: Vec2,
    safe_distance: f32,
    attempts: usize,
) -> Option<Vec2> {
    (0..attempts).find_map(|_| {
        let p = Vec2::new(
            rng.gen_range(-ARENA_HALF_EXTENTS.x..ARENA_HALF_EXTENTS.x),
            rng.gen_range(-ARENA_HALF_EXTENTS.y..ARENA_HALF_EXTENTS.y),
        );
        (p.distance(camera_center) >= safe_distance).then_some(p)
    })
}

/// Rolls a shape for a new AI. A disguise is kept only when the rolled mask
/// differs from the true shape.
pub fn roll_ai_shape(rng: &mut impl Rng) -> ShapeWithMask {
    let mut shape = ShapeWithMask::random(rng);
    let maybe_mask = Shape::random(rng);
    if maybe_mask != shape.true_shape() {
        shape.set_mask(maybe_mask);
    }
    shape
}

pub fn spawn_ai(
    commands: &mut Commands,
    pos: Vec2,
    tuning: &AiTuning,
    rng: &mut impl Rng,
) -> Entity {
    commands
        .spawn((
            AiController::new(pos, tuning.clone(), rng),
            roll_ai_shape(rng),
            Vision::default(),
            Combatant { radius: AI_RADIUS },
            SpatialBundle::from_transform(Transform::from_translation(pos.extend(1.0))),
        ))
        .id()
}

#[allow(clippy::too_many_arguments)]
pub fn tick_spawner(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<AiSpawner>,
    mut roster: ResMut<AiRoster>,
    settings: Res<SpawnerSettings>,
    tuning: Res<AiTuning>,
    mut rng: ResMut<GameRng>,
    camera_q: Query<&Transform, With<MainCamera>>,
    player_q: Query<(), With<Player>>,
    alive_q: Query<(), With<AiController>>,
) {
    if !spawner.running {
        return;
    }
    spawner.timer.tick(time.delta());
    if !spawner.timer.just_finished() {
        return;
    }

    roster.0.retain(|e| alive_q.contains(*e));
    if roster.0.len() >= settings.max_ai || player_q.is_empty() {
        return;
    }

    let Ok(camera) = camera_q.get_single() else {
        warn!("no main camera, skipping AI spawn");
        return;
    };

    let center = camera.translation.truncate();
    match sample_spawn_point(&mut rng.0, center, settings.safe_distance, settings.max_attempts) {
        Some(pos) => {
            let ai = spawn_ai(&mut commands, pos, &tuning, &mut rng.0);
            roster.0.push(ai);
            debug!("spawned AI {ai:?} at {pos}, roster {}", roster.0.len());
        }
        None => debug!("no spawn point found after {} attempts", settings.max_attempts),
    }
}
