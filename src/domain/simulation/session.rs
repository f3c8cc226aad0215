use bevy::prelude::*;

use super::bullet::{recall_all, Bullet, BulletPool};
use super::player::{Player, PLAYER_RADIUS};
use super::shape::ShapeWithMask;
use super::spawner::{AiRoster, AiSpawner};
use super::tuning::{PlayerSettings, SpawnerSettings};
use super::{Combatant, GameRng};

#[derive(Event, Default)]
pub struct StartGame;

#[derive(Event, Default)]
pub struct RestartGame;

/// Whether the one session of this run has begun.
#[derive(Resource, Debug, Default)]
pub struct Session {
    pub started: bool,
}

pub fn start_game(
    mut commands: Commands,
    mut ev_start: EventReader<StartGame>,
    mut session: ResMut<Session>,
    mut spawner: ResMut<AiSpawner>,
    player_settings: Res<PlayerSettings>,
    spawner_settings: Res<SpawnerSettings>,
    mut rng: ResMut<GameRng>,
) {
    if ev_start.is_empty() {
        return;
    }
    ev_start.clear();
    if session.started {
        return;
    }
    session.started = true;

    commands.spawn((
        Player::new(&player_settings),
        ShapeWithMask::random(&mut rng.0),
        Combatant {
            radius: PLAYER_RADIUS,
        },
        SpatialBundle::from_transform(Transform::from_xyz(0.0, 0.0, 2.0)),
    ));
    spawner.restart(spawner_settings.interval, spawner_settings.enabled);
    info!("session started");
}

#[allow(clippy::too_many_arguments)]
pub fn restart_game(
    mut commands: Commands,
    mut ev_restart: EventReader<RestartGame>,
    mut spawner: ResMut<AiSpawner>,
    mut roster: ResMut<AiRoster>,
    mut pool: ResMut<BulletPool>,
    mut bullets: Query<(Entity, &mut Bullet, &mut Visibility)>,
    mut player_q: Query<
        (&mut Player, &mut ShapeWithMask, &mut Transform, &mut Visibility),
        Without<Bullet>,
    >,
    player_settings: Res<PlayerSettings>,
    spawner_settings: Res<SpawnerSettings>,
    mut rng: ResMut<GameRng>,
) {
    if ev_restart.is_empty() {
        return;
    }
    ev_restart.clear();

    spawner.restart(spawner_settings.interval, spawner_settings.enabled);
    for ai in roster.0.drain(..) {
        if let Some(entity) = commands.get_entity(ai) {
            entity.despawn_recursive();
        }
    }
    recall_all(&mut pool, &mut bullets);

    let Ok((mut player, mut shape, mut transform, mut visibility)) = player_q.get_single_mut()
    else {
        warn!("restart requested before a player exists");
        return;
    };
    *player = Player::new(&player_settings);
    *shape = ShapeWithMask::random(&mut rng.0);
    transform.translation.x = 0.0;
    transform.translation.y = 0.0;
    *visibility = Visibility::Inherited;
    info!("session restarted");
}
