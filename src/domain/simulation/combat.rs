//! Bullet hits, kills, and the witness rule.
//!
//! A kill is seen by everyone in the victim's vision. If any of those
//! witnesses displays the same shape the killer is currently displaying,
//! the killer's disguise is blown.

use std::collections::HashSet;

use bevy::prelude::*;

use super::ai::AiController;
use super::bullet::{recall, Bullet, BulletPool, BULLET_RADIUS};
use super::player::Player;
use super::shape::{Shape, ShapeWithMask};
use super::vision::Vision;
use super::{Combatant, SoundCue, SoundEffect};

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BulletHit {
    pub bullet: Entity,
    pub target: Entity,
    pub owner: Option<Entity>,
}

/// Score the player earns for a kill.
pub fn kill_reward(victim_true: Shape, killer_true: Shape, killer_masked: bool) -> i32 {
    if victim_true == killer_true {
        -1
    } else if killer_masked {
        2
    } else {
        1
    }
}

/// `true` when some witness shows the shape the killer is showing.
pub fn witness_exposes(killer_shows: Shape, witnesses: impl IntoIterator<Item = Shape>) -> bool {
    witnesses.into_iter().any(|w| w == killer_shows)
}

/// Where along the segment `from..to` a circle at `center` is first
/// touched, as a fraction in `0..=1`, or `None` if the segment misses it.
pub fn swept_hit(from: Vec2, to: Vec2, center: Vec2, radius: f32) -> Option<f32> {
    let d = to - from;
    let f = from - center;
    let c = f.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let a = d.length_squared();
    if a <= f32::EPSILON {
        return None;
    }
    let b = f.dot(d);
    let disc = b * b - a * c;
    if b >= 0.0 || disc < 0.0 {
        return None;
    }
    let t = (-b - disc.sqrt()) / a;
    (t <= 1.0).then_some(t)
}

// Detect → queue → apply: hits are collected against a read-only view of
// combatants and applied in `resolve_hits`.
pub fn detect_bullet_hits(
    mut pool: ResMut<BulletPool>,
    mut bullets: Query<(Entity, &mut Bullet, &Transform, &mut Visibility)>,
    combatants: Query<(Entity, &Transform, &Combatant), Without<Bullet>>,
    mut ev_hit: EventWriter<BulletHit>,
) {
    for (entity, mut bullet, transform, mut visibility) in &mut bullets {
        if !bullet.in_flight {
            continue;
        }
        let pos = transform.translation.truncate();
        let hit = combatants
            .iter()
            .filter(|(e, _, _)| Some(*e) != bullet.owner)
            .filter_map(|(e, t, c)| {
                swept_hit(
                    bullet.prev,
                    pos,
                    t.translation.truncate(),
                    c.radius + BULLET_RADIUS,
                )
                .map(|along| (e, along))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((target, _)) = hit {
            ev_hit.send(BulletHit {
                bullet: entity,
                target,
                owner: bullet.owner,
            });
            recall(entity, &mut bullet, &mut visibility, &mut pool);
        }
    }
}

pub fn resolve_hits(
    mut commands: Commands,
    mut ev_hit: EventReader<BulletHit>,
    mut shapes: Query<&mut ShapeWithMask>,
    mut players: Query<&mut Player>,
    ais: Query<&Vision, With<AiController>>,
    mut ev_sound: EventWriter<SoundCue>,
) {
    let mut killed: HashSet<Entity> = HashSet::new();

    for hit in ev_hit.read() {
        if let Ok(mut player) = players.get_mut(hit.target) {
            player.hp -= 1;
            debug!("player hit by {:?}, {} hp left", hit.owner, player.hp);
            continue;
        }

        let Ok(vision) = ais.get(hit.target) else {
            continue;
        };
        if !killed.insert(hit.target) {
            continue;
        }

        if let Some(owner) = hit.owner.filter(|o| shapes.contains(*o)) {
            ev_sound.send(SoundCue::new(SoundEffect::Killed, 0.5));
            handle_killed_by(
                owner,
                hit.target,
                vision,
                &mut shapes,
                &mut players,
                &mut ev_sound,
            );
        }
        commands.entity(hit.target).despawn_recursive();
    }
}

fn handle_killed_by(
    owner: Entity,
    victim: Entity,
    victim_vision: &Vision,
    shapes: &mut Query<&mut ShapeWithMask>,
    players: &mut Query<&mut Player>,
    ev_sound: &mut EventWriter<SoundCue>,
) {
    let Ok(owner_shape) = shapes.get(owner).copied() else {
        return;
    };
    let owner_is_player = players.contains(owner);

    if let (Ok(mut player), Ok(victim_shape)) = (players.get_mut(owner), shapes.get(victim)) {
        let reward = kill_reward(
            victim_shape.true_shape(),
            owner_shape.true_shape(),
            owner_shape.has_mask(),
        );
        player.add_score(reward);
        ev_sound.send(SoundCue::new(SoundEffect::Killed, 0.5));
        debug!("player scored {reward}, now {}", player.score);
    }

    let witnesses = victim_vision
        .visible
        .iter()
        .filter(|e| **e != owner && **e != victim)
        .filter_map(|e| shapes.get(*e).ok().map(|s| s.masked_shape()));
    if !witness_exposes(owner_shape.masked_shape(), witnesses) {
        return;
    }

    if let Ok(mut shape) = shapes.get_mut(owner) {
        if shape.remove_mask() {
            info!("{owner:?} was seen killing {victim:?}, mask broken");
            let volume = if owner_is_player { 0.5 } else { 0.2 };
            ev_sound.send(SoundCue::new(SoundEffect::MaskBreak, volume));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn killing_own_kind_costs_a_point() {
        assert_eq!(kill_reward(Shape::Circle, Shape::Circle, false), -1);
        assert_eq!(kill_reward(Shape::Circle, Shape::Circle, true), -1);
    }

    #[test]
    fn masked_kills_pay_double() {
        assert_eq!(kill_reward(Shape::Square, Shape::Circle, true), 2);
        assert_eq!(kill_reward(Shape::Square, Shape::Circle, false), 1);
    }

    #[test]
    fn only_a_matching_witness_exposes() {
        assert!(witness_exposes(
            Shape::Triangle,
            [Shape::Circle, Shape::Triangle]
        ));
        assert!(!witness_exposes(Shape::Triangle, [Shape::Circle, Shape::Square]));
        assert!(!witness_exposes(Shape::Triangle, []));
    }

    #[test]
    fn sweep_catches_a_circle_passed_over_in_one_step() {
        let along = swept_hit(Vec2::new(2.8, 0.0), Vec2::new(5.8, 0.0), Vec2::new(5.0, 0.0), 0.65);
        let along = along.expect("segment crosses the circle");
        assert!((along - 1.55 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn sweep_misses_circles_off_the_path() {
        assert_eq!(
            swept_hit(Vec2::ZERO, Vec2::new(4.0, 0.0), Vec2::new(2.0, 1.0), 0.5),
            None
        );
        // circle beyond the end of the step
        assert_eq!(
            swept_hit(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(3.0, 0.0), 0.5),
            None
        );
        // circle behind the start
        assert_eq!(
            swept_hit(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(-2.0, 0.0), 0.5),
            None
        );
    }

    #[test]
    fn starting_inside_hits_immediately() {
        assert_eq!(
            swept_hit(Vec2::new(0.1, 0.0), Vec2::new(0.1, 0.0), Vec2::ZERO, 0.5),
            Some(0.0)
        );
    }
}
