use bevy::prelude::*;

use super::bullet::FireBullet;
use super::shape::ShapeWithMask;
use super::tuning::{clamp_to_arena, PlayerSettings};
use super::{AppState, GameRng, SoundCue, SoundEffect};

pub const PLAYER_RADIUS: f32 = 0.5;

/// Intent produced by the input layer.
#[derive(Event, Clone, Copy, Debug, PartialEq)]
pub enum PlayerCommand {
    /// Raw movement axis; normalised before use.
    Move(Vec2),
    /// Shoot towards a world position.
    Fire { aim: Vec2 },
    ApplyMask,
    RemoveMask,
    Heal,
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Player {
    pub hp: i32,
    pub score: i32,
    /// Seconds played this session.
    pub elapsed: f32,
    pub move_dir: Vec2,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Defeat,
    Victory,
}

/// Time taken by the last winning run, shown on the victory panel.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct LastRun {
    pub time_taken: f32,
}

impl Player {
    pub fn new(settings: &PlayerSettings) -> Self {
        Self {
            hp: settings.initial_hp,
            score: 0,
            elapsed: 0.0,
            move_dir: Vec2::ZERO,
        }
    }

    pub fn add_score(&mut self, delta: i32) {
        self.score += delta;
    }

    /// Trades score for a disguise. Returns `false` when the player can't
    /// afford it.
    pub fn try_apply_mask(
        &mut self,
        shape: &mut ShapeWithMask,
        settings: &PlayerSettings,
        rng: &mut impl rand::Rng,
    ) -> bool {
        if self.score < settings.mask_cost {
            return false;
        }
        shape.set_mask(shape.true_shape().random_other(rng));
        self.score -= settings.mask_cost;
        true
    }

    /// Converts one point of score into one HP, up to the heal cap.
    pub fn try_heal(&mut self, settings: &PlayerSettings) -> bool {
        if self.score <= 0 || self.hp >= settings.heal_hp_cap {
            return false;
        }
        self.score -= 1;
        self.hp += 1;
        true
    }

    pub fn outcome(&self, settings: &PlayerSettings) -> Option<Outcome> {
        if self.hp <= 0 || self.score <= settings.loss_score {
            Some(Outcome::Defeat)
        } else if self.score >= settings.win_score {
            Some(Outcome::Victory)
        } else {
            None
        }
    }
}

pub fn apply_player_commands(
    mut commands_in: EventReader<PlayerCommand>,
    mut player_q: Query<(Entity, &mut Player, &mut ShapeWithMask, &Transform)>,
    settings: Res<PlayerSettings>,
    mut rng: ResMut<GameRng>,
    mut ev_fire: EventWriter<FireBullet>,
    mut ev_sound: EventWriter<SoundCue>,
) {
    let Ok((entity, mut player, mut shape, transform)) = player_q.get_single_mut() else {
        commands_in.clear();
        return;
    };

    for command in commands_in.read() {
        match *command {
            PlayerCommand::Move(axis) => {
                player.move_dir = axis.normalize_or_zero();
            }
            PlayerCommand::Fire { aim } => {
                let origin = transform.translation.truncate();
                let to_target = (aim - origin).normalize_or_zero();
                if to_target == Vec2::ZERO {
                    continue;
                }
                ev_sound.send(SoundCue::new(SoundEffect::Fire, 0.4));
                ev_fire.send(FireBullet {
                    position: origin + to_target * settings.muzzle_offset,
                    velocity: to_target * settings.bullet_speed + player.move_dir,
                    owner: Some(entity),
                });
            }
            PlayerCommand::ApplyMask => {
                if player.try_apply_mask(&mut *shape, &settings, &mut rng.0) {
                    info!("player masked as {:?}", shape.masked_shape());
                } else {
                    debug!(
                        "mask needs {} score, player has {}",
                        settings.mask_cost, player.score
                    );
                }
            }
            PlayerCommand::RemoveMask => {
                shape.remove_mask();
            }
            PlayerCommand::Heal => {
                if player.try_heal(&settings) {
                    debug!("player healed to {} hp", player.hp);
                }
            }
        }
    }
}

pub fn move_player(
    time: Res<Time>,
    settings: Res<PlayerSettings>,
    mut player_q: Query<(&mut Player, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    for (mut player, mut transform) in &mut player_q {
        let step = player.move_dir * settings.move_speed * dt;
        let pos = clamp_to_arena(transform.translation.truncate() + step);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
        player.elapsed += dt;
    }
}

pub fn check_outcome(
    mut player_q: Query<(&Player, &mut Visibility)>,
    settings: Res<PlayerSettings>,
    mut last_run: ResMut<LastRun>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok((player, mut visibility)) = player_q.get_single_mut() else {
        return;
    };
    match player.outcome(&settings) {
        Some(Outcome::Defeat) => {
            info!("player defeated with score {} and {} hp", player.score, player.hp);
            *visibility = Visibility::Hidden;
            next_state.set(AppState::GameOver);
        }
        Some(Outcome::Victory) => {
            info!("player won in {:.2}s", player.elapsed);
            last_run.time_taken = player.elapsed;
            *visibility = Visibility::Hidden;
            next_state.set(AppState::Won);
        }
        None => {}
    }
}
