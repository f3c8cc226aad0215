use std::collections::VecDeque;

use bevy::prelude::*;
use thiserror::Error;

use super::tuning::PoolSettings;

pub const BULLET_RADIUS: f32 = 0.15;

/// A pooled projectile. Idle bullets stay spawned but hidden.
#[derive(Component, Debug)]
pub struct Bullet {
    pub owner: Option<Entity>,
    pub velocity: Vec2,
    /// Position at the start of the last move; hits are swept from here.
    pub prev: Vec2,
    pub life: Timer,
    pub in_flight: bool,
}

impl Bullet {
    pub fn idle() -> Self {
        Self {
            owner: None,
            velocity: Vec2::ZERO,
            prev: Vec2::ZERO,
            life: Timer::from_seconds(0.0, TimerMode::Once),
            in_flight: false,
        }
    }

    fn launch(&mut self, from: Vec2, velocity: Vec2, lifetime: f32, owner: Option<Entity>) {
        self.owner = owner;
        self.velocity = velocity;
        self.prev = from;
        self.life = Timer::from_seconds(lifetime, TimerMode::Once);
        self.in_flight = true;
    }
}

/// Request to put a bullet in flight.
#[derive(Event, Clone, Copy, Debug)]
pub struct FireBullet {
    pub position: Vec2,
    pub velocity: Vec2,
    pub owner: Option<Entity>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolError {
    #[error("active bullet cap of {0} reached")]
    ActiveCapReached(usize),
    #[error("bullet pool is empty and expansion is disabled")]
    Exhausted,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Checkout {
    Reuse(Entity),
    /// Pool was empty; the caller spawns a new bullet.
    Allocate,
}

/// Book-keeping for pooled bullets: idle entities plus the active count.
#[derive(Resource, Debug, Default)]
pub struct BulletPool {
    idle: VecDeque<Entity>,
    active: usize,
    max_active: usize,
    expand: bool,
}

impl BulletPool {
    pub fn new(max_active: usize, expand: bool) -> Self {
        Self {
            idle: VecDeque::new(),
            active: 0,
            max_active,
            expand,
        }
    }

    pub fn stock(&mut self, bullet: Entity) {
        self.idle.push_back(bullet);
    }

    pub fn checkout(&mut self) -> Result<Checkout, PoolError> {
        if self.active >= self.max_active {
            return Err(PoolError::ActiveCapReached(self.max_active));
        }
        let checkout = match self.idle.pop_front() {
            Some(bullet) => Checkout::Reuse(bullet),
            None if self.expand => Checkout::Allocate,
            None => return Err(PoolError::Exhausted),
        };
        self.active += 1;
        Ok(checkout)
    }

    pub fn give_back(&mut self, bullet: Entity) {
        self.idle.push_back(bullet);
        self.active = self.active.saturating_sub(1);
    }

    /// Releases an active slot whose entity no longer exists.
    pub fn forget(&mut self) {
        self.active = self.active.saturating_sub(1);
    }

    pub fn active(&self) -> usize {
        self.active
    }

    pub fn idle(&self) -> usize {
        self.idle.len()
    }
}

pub fn stock_bullet_pool(mut commands: Commands, settings: Res<PoolSettings>) {
    let mut pool = BulletPool::new(settings.max_active, settings.expand_pool);
    for _ in 0..settings.pool_size {
        let bullet = commands
            .spawn((
                Bullet::idle(),
                SpatialBundle {
                    visibility: Visibility::Hidden,
                    ..default()
                },
            ))
            .id();
        pool.stock(bullet);
    }
    debug!("bullet pool stocked with {} bullets", settings.pool_size);
    commands.insert_resource(pool);
}

pub fn launch_bullets(
    mut commands: Commands,
    mut ev_fire: EventReader<FireBullet>,
    mut pool: ResMut<BulletPool>,
    settings: Res<PoolSettings>,
    mut bullets: Query<(&mut Bullet, &mut Transform, &mut Visibility)>,
) {
    for ev in ev_fire.read() {
        match pool.checkout() {
            Ok(Checkout::Reuse(entity)) => {
                let Ok((mut bullet, mut transform, mut visibility)) = bullets.get_mut(entity) else {
                    warn!("pooled bullet {entity:?} is gone, dropping shot");
                    pool.forget();
                    continue;
                };
                bullet.launch(ev.position, ev.velocity, settings.bullet_lifetime, ev.owner);
                transform.translation = ev.position.extend(transform.translation.z);
                transform.rotation = Quat::IDENTITY;
                *visibility = Visibility::Inherited;
            }
            Ok(Checkout::Allocate) => {
                let mut bullet = Bullet::idle();
                bullet.launch(ev.position, ev.velocity, settings.bullet_lifetime, ev.owner);
                commands.spawn((
                    bullet,
                    SpatialBundle::from_transform(Transform::from_translation(
                        ev.position.extend(0.0),
                    )),
                ));
            }
            Err(err) => debug!("shot refused: {err}"),
        }
    }
}

/// Returns a bullet to the pool and hides it.
pub fn recall(
    entity: Entity,
    bullet: &mut Bullet,
    visibility: &mut Visibility,
    pool: &mut BulletPool,
) {
    if !bullet.in_flight {
        return;
    }
    bullet.in_flight = false;
    bullet.velocity = Vec2::ZERO;
    bullet.owner = None;
    *visibility = Visibility::Hidden;
    pool.give_back(entity);
}

pub fn move_bullets(
    time: Res<Time>,
    mut pool: ResMut<BulletPool>,
    mut bullets: Query<(Entity, &mut Bullet, &mut Transform, &mut Visibility)>,
) {
    let dt = time.delta_seconds();
    for (entity, mut bullet, mut transform, mut visibility) in &mut bullets {
        if !bullet.in_flight {
            continue;
        }
        bullet.prev = transform.translation.truncate();
        let step = bullet.velocity * dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;

        bullet.life.tick(time.delta());
        if bullet.life.finished() {
            recall(entity, &mut bullet, &mut visibility, &mut pool);
        }
    }
}

/// Sends every in-flight bullet back to the pool.
pub fn recall_all(
    pool: &mut BulletPool,
    bullets: &mut Query<(Entity, &mut Bullet, &mut Visibility)>,
) {
    for (entity, mut bullet, mut visibility) in bullets.iter_mut() {
        recall(entity, &mut bullet, &mut visibility, pool);
    }
}
