//! Enemy finite state machine.
//!
//! Idle AIs wander around their spawn point and periodically scan their
//! vision for someone whose *displayed* shape differs from their own true
//! shape. Attacking AIs close in to a stop distance and fire on a fixed
//! interval until the target dies or escapes.

use std::collections::HashMap;

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::bullet::FireBullet;
use super::player::Player;
use super::shape::{Shape, ShapeWithMask};
use super::tuning::{clamp_to_arena, AiTuning};
use super::vision::Vision;
use super::{move_towards, Combatant, GameRng, SoundCue, SoundEffect};

/// Beyond this multiple of the detection range an attacker gives up.
pub const PURSUIT_FACTOR: f32 = 1.2;

pub const AI_RADIUS: f32 = 0.5;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AiState {
    #[default]
    Idle,
    Attack,
}

#[derive(Component, Debug, Clone)]
pub struct AiController {
    pub state: AiState,
    pub target: Option<Entity>,
    pub origin: Vec2,
    pub wander_target: Vec2,
    wander_counter: f32,
    spot_time: f32,
    spot_counter: f32,
    fire_counter: f32,
    pub tuning: AiTuning,
}

impl AiController {
    pub fn new(origin: Vec2, tuning: AiTuning, rng: &mut impl Rng) -> Self {
        let spot_time = if tuning.spot_time_max > tuning.spot_time_min {
            rng.gen_range(tuning.spot_time_min..tuning.spot_time_max)
        } else {
            tuning.spot_time_min
        };
        let mut controller = Self {
            state: AiState::Idle,
            target: None,
            origin,
            wander_target: origin,
            wander_counter: 0.0,
            spot_time,
            spot_counter: spot_time,
            fire_counter: 0.0,
            tuning,
        };
        controller.enter(AiState::Idle, rng);
        controller
    }

    pub fn spot_time(&self) -> f32 {
        self.spot_time
    }

    pub fn enter(&mut self, state: AiState, rng: &mut impl Rng) {
        self.state = state;
        match state {
            AiState::Idle => self.pick_wander_target(rng),
            AiState::Attack => self.fire_counter = 0.0,
        }
    }

    pub fn lose_target(&mut self, rng: &mut impl Rng) {
        self.target = None;
        self.enter(AiState::Idle, rng);
    }

    fn pick_wander_target(&mut self, rng: &mut impl Rng) {
        self.wander_target = self.origin + random_in_disc(rng, self.tuning.wander_radius);
        self.wander_counter = self.tuning.wander_interval;
    }
}

/// Uniform point inside a disc of `radius` around the origin.
pub fn random_in_disc(rng: &mut impl Rng, radius: f32) -> Vec2 {
    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let r = rng.gen::<f32>().sqrt() * radius;
    Vec2::from_angle(angle) * r
}

/// What one combatant looks like to an observer.
#[derive(Clone, Copy, Debug)]
pub struct Sighting {
    pub entity: Entity,
    pub masked: Shape,
    pub is_player: bool,
}

/// Chooses an attack target: a visible player wearing a different shape wins
/// outright, otherwise any visible combatant showing a different shape.
pub fn pick_target(own_true: Shape, seen: &[Sighting], rng: &mut impl Rng) -> Option<Entity> {
    if let Some(player) = seen
        .iter()
        .find(|s| s.is_player && s.masked != own_true)
    {
        return Some(player.entity);
    }
    let candidates: Vec<Entity> = seen
        .iter()
        .filter(|s| s.masked != own_true)
        .map(|s| s.entity)
        .collect();
    candidates.choose(rng).copied()
}

#[derive(Clone, Copy)]
struct Snapshot {
    pos: Vec2,
    masked: Shape,
    is_player: bool,
}

#[allow(clippy::type_complexity)]
pub fn drive_ai(
    time: Res<Time>,
    mut rng: ResMut<GameRng>,
    mut q: ParamSet<(
        Query<(Entity, &Transform, &ShapeWithMask, Option<&Player>), With<Combatant>>,
        Query<(
            Entity,
            &mut AiController,
            &mut Transform,
            &mut Vision,
            &ShapeWithMask,
        )>,
    )>,
    mut ev_fire: EventWriter<FireBullet>,
    mut ev_sound: EventWriter<SoundCue>,
) {
    let dt = time.delta_seconds();
    let rng = &mut rng.0;

    let snapshot: HashMap<Entity, Snapshot> = q
        .p0()
        .iter()
        .map(|(e, t, shape, player)| {
            (
                e,
                Snapshot {
                    pos: t.translation.truncate(),
                    masked: shape.masked_shape(),
                    is_player: player.is_some(),
                },
            )
        })
        .collect();

    let mut actors = q.p1();
    for (me, mut ai, mut transform, mut vision, shape) in &mut actors {
        let mut pos = transform.translation.truncate();

        match ai.state {
            AiState::Idle => {
                ai.wander_counter -= dt;
                if ai.wander_counter <= 0.0 {
                    ai.pick_wander_target(rng);
                }

                ai.spot_counter -= dt;
                if ai.spot_counter <= 0.0 {
                    vision.visible.retain(|e| snapshot.contains_key(e));
                    let seen: Vec<Sighting> = vision
                        .visible
                        .iter()
                        .filter(|e| **e != me)
                        .filter_map(|e| {
                            snapshot.get(e).map(|s| Sighting {
                                entity: *e,
                                masked: s.masked,
                                is_player: s.is_player,
                            })
                        })
                        .collect();
                    if let Some(target) = pick_target(shape.true_shape(), &seen, rng) {
                        debug!("{me:?} acquired target {target:?}");
                        ai.target = Some(target);
                        ai.enter(AiState::Attack, rng);
                        continue;
                    }
                    ai.spot_counter = ai.spot_time;
                }

                pos = move_towards(pos, ai.wander_target, ai.tuning.move_speed * dt);

                let near_target = ai
                    .target
                    .and_then(|t| snapshot.get(&t))
                    .is_some_and(|s| pos.distance(s.pos) <= ai.tuning.detection_range);
                if near_target {
                    ai.enter(AiState::Attack, rng);
                }
            }
            AiState::Attack => {
                let Some(target) = ai.target.and_then(|t| snapshot.get(&t)).copied() else {
                    ai.lose_target(rng);
                    continue;
                };

                let dist = pos.distance(target.pos);
                if dist > ai.tuning.detection_range * PURSUIT_FACTOR {
                    ai.lose_target(rng);
                    continue;
                }
                if dist > ai.tuning.stop_distance {
                    pos = move_towards(pos, target.pos, ai.tuning.move_speed * dt);
                }

                ai.fire_counter -= dt;
                if ai.fire_counter <= 0.0 {
                    ai.fire_counter = ai.tuning.fire_interval;
                    let dir = (target.pos - pos).normalize_or_zero();
                    if dir != Vec2::ZERO {
                        ev_sound.send(SoundCue::new(SoundEffect::Fire, 0.5));
                        ev_fire.send(FireBullet {
                            position: pos + dir * ai.tuning.muzzle_offset,
                            velocity: dir * ai.tuning.bullet_speed,
                            owner: Some(me),
                        });
                    }
                }
            }
        }

        let pos = clamp_to_arena(pos);
        transform.translation.x = pos.x;
        transform.translation.y = pos.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sighting(i: u32, masked: Shape, is_player: bool) -> Sighting {
        Sighting {
            entity: Entity::from_raw(i),
            masked,
            is_player,
        }
    }

    #[test]
    fn player_with_other_shape_is_preferred() {
        let mut rng = StdRng::seed_from_u64(3);
        let seen = [
            sighting(1, Shape::Square, false),
            sighting(2, Shape::Triangle, true),
        ];
        for _ in 0..20 {
            assert_eq!(
                pick_target(Shape::Circle, &seen, &mut rng),
                Some(Entity::from_raw(2))
            );
        }
    }

    #[test]
    fn disguised_player_is_ignored() {
        let mut rng = StdRng::seed_from_u64(3);
        let seen = [
            sighting(1, Shape::Square, false),
            sighting(2, Shape::Circle, true),
        ];
        assert_eq!(
            pick_target(Shape::Circle, &seen, &mut rng),
            Some(Entity::from_raw(1))
        );
    }

    #[test]
    fn no_candidate_with_matching_shapes() {
        let mut rng = StdRng::seed_from_u64(3);
        let seen = [
            sighting(1, Shape::Circle, false),
            sighting(2, Shape::Circle, true),
        ];
        assert_eq!(pick_target(Shape::Circle, &seen, &mut rng), None);
        assert_eq!(pick_target(Shape::Circle, &[], &mut rng), None);
    }

    #[test]
    fn wander_targets_stay_inside_radius() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            assert!(random_in_disc(&mut rng, 9.0).length() <= 9.0 + 1e-4);
        }
    }

    #[test]
    fn spot_time_is_drawn_from_tuning_range() {
        let mut rng = StdRng::seed_from_u64(5);
        let tuning = AiTuning::default();
        for _ in 0..50 {
            let ai = AiController::new(Vec2::ZERO, tuning.clone(), &mut rng);
            assert!(ai.spot_time() >= tuning.spot_time_min);
            assert!(ai.spot_time() < tuning.spot_time_max);
            assert_eq!(ai.state, AiState::Idle);
        }
    }

    #[test]
    fn degenerate_spot_range_uses_minimum() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut tuning = AiTuning::default();
        tuning.spot_time_min = 1.0;
        tuning.spot_time_max = 1.0;
        let ai = AiController::new(Vec2::ZERO, tuning, &mut rng);
        assert_eq!(ai.spot_time(), 1.0);
    }
}
