#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-capacity bullet pool with aiming, integration and hit resolution.

use tilerun_core::{BulletSnapshot, EntityId, ProjectileConfig, Vec2};
use tracing::debug;

/// Angular spacing between neighbouring bullets of a fan, in degrees.
pub const FAN_STEP_DEGREES: f32 = 7.5;
/// Number of bullets in a fan.
pub const FAN_SIZE: usize = 5;

/// One slot of the bullet pool.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bullet {
    /// Current position.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Whether the slot is in flight; inactive slots are free.
    pub active: bool,
    /// Whether the player fired the bullet.
    pub from_player: bool,
}

/// Pool of bullet slots allocated once at construction.
#[derive(Clone, Debug)]
pub struct BulletPool {
    slots: Vec<Bullet>,
}

impl BulletPool {
    /// Creates a pool with `capacity` free slots.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: vec![Bullet::default(); capacity],
        }
    }

    /// Total number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of bullets currently in flight.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|bullet| bullet.active).count()
    }

    /// Occupies the first free slot, returning its index.
    ///
    /// Returns `None` and drops the bullet when every slot is in flight.
    pub fn spawn(&mut self, position: Vec2, velocity: Vec2, from_player: bool) -> Option<usize> {
        let Some(slot) = self.slots.iter().position(|bullet| !bullet.active) else {
            debug!("bullet pool exhausted, dropping shot");
            return None;
        };
        self.slots[slot] = Bullet {
            position,
            velocity,
            active: true,
            from_player,
        };
        Some(slot)
    }

    /// Slot contents, active or not.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Bullet> {
        self.slots.get(slot)
    }

    /// Frees every slot.
    pub fn clear(&mut self) {
        self.slots.fill(Bullet::default());
    }

    /// Snapshots of the bullets in flight, in slot order.
    #[must_use]
    pub fn snapshots(&self) -> Vec<BulletSnapshot> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, bullet)| bullet.active)
            .map(|(slot, bullet)| BulletSnapshot {
                slot,
                position: bullet.position,
                velocity: bullet.velocity,
                from_player: bullet.from_player,
            })
            .collect()
    }
}

/// Which side of the fight a combat target belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetSide {
    /// Struck only by hostile bullets.
    Player,
    /// Struck by player bullets, before the boss.
    Enemy,
    /// Struck by player bullets once no enemy was hit.
    Boss,
}

/// Working copy of an entity that bullets can hit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Entity represented by the target.
    pub id: EntityId,
    /// Side of the fight.
    pub side: TargetSide,
    /// Centre of the target.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Remaining health; lowered in place when struck.
    pub health: i32,
}

/// A bullet striking a target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Slot of the bullet, now free.
    pub slot: usize,
    /// Entity that was struck.
    pub target: EntityId,
    /// Health left after the strike.
    pub remaining_health: i32,
}

/// Stateless projectile rules parameterised by bullet speed and radius.
#[derive(Clone, Debug, Default)]
pub struct Projectiles {
    config: ProjectileConfig,
}

impl Projectiles {
    /// Creates the system with the provided bullet constants.
    #[must_use]
    pub fn new(config: ProjectileConfig) -> Self {
        Self { config }
    }

    /// Spawns one bullet from `origin` aimed at `target`.
    pub fn fire(
        &self,
        pool: &mut BulletPool,
        origin: Vec2,
        target: Vec2,
        from_player: bool,
    ) -> Option<usize> {
        let velocity = aim(origin, target) * self.config.speed;
        pool.spawn(origin, velocity, from_player)
    }

    /// Spawns a fan of [`FAN_SIZE`] bullets centred on the line to `target`.
    ///
    /// Bullets that find no free slot are dropped individually.
    pub fn fire_fan(
        &self,
        pool: &mut BulletPool,
        origin: Vec2,
        target: Vec2,
        from_player: bool,
        out_slots: &mut Vec<usize>,
    ) {
        for direction in fan(origin, target) {
            if let Some(slot) = pool.spawn(origin, direction * self.config.speed, from_player) {
                out_slots.push(slot);
            }
        }
    }

    /// Integrates every bullet in flight and frees those leaving
    /// `[0, width] x [0, height]`.
    pub fn advance(
        &self,
        pool: &mut BulletPool,
        dt: f32,
        width: f32,
        height: f32,
        out_expired: &mut Vec<usize>,
    ) {
        for (slot, bullet) in pool.slots.iter_mut().enumerate() {
            if !bullet.active {
                continue;
            }
            bullet.position += bullet.velocity * dt;
            let inside = (0.0..=width).contains(&bullet.position.x)
                && (0.0..=height).contains(&bullet.position.y);
            if !inside {
                bullet.active = false;
                out_expired.push(slot);
            }
        }
    }

    /// Tests every bullet in flight against the living targets.
    ///
    /// Player bullets try enemies in the given order and then the boss;
    /// other bullets only try the player. The first target struck loses one
    /// health and the bullet is freed.
    pub fn resolve_hits(&self, pool: &mut BulletPool, targets: &mut [Target], out: &mut Vec<Hit>) {
        for (slot, bullet) in pool.slots.iter_mut().enumerate() {
            if !bullet.active {
                continue;
            }

            let sides: &[TargetSide] = if bullet.from_player {
                &[TargetSide::Enemy, TargetSide::Boss]
            } else {
                &[TargetSide::Player]
            };

            let position = bullet.position;
            let struck = sides.iter().find_map(|side| {
                targets.iter().position(|target| {
                    target.side == *side && target.health > 0 && self.touches(position, target)
                })
            });

            if let Some(index) = struck {
                let target = &mut targets[index];
                target.health -= 1;
                bullet.active = false;
                out.push(Hit {
                    slot,
                    target: target.id,
                    remaining_health: target.health,
                });
            }
        }
    }

    fn touches(&self, position: Vec2, target: &Target) -> bool {
        let reach = self.config.radius + target.radius;
        position.distance_squared(target.position) <= reach * reach
    }
}

/// Unit vector from `origin` toward `target`, or zero when they coincide.
#[must_use]
pub fn aim(origin: Vec2, target: Vec2) -> Vec2 {
    (target - origin).normalize_or_zero()
}

/// Unit directions of a fan centred on the line from `origin` to `target`.
///
/// Offsets are `k * FAN_STEP_DEGREES` for `k` in `-2..=2`. Coincident points
/// yield five zero vectors, matching [`aim`].
#[must_use]
pub fn fan(origin: Vec2, target: Vec2) -> [Vec2; FAN_SIZE] {
    let delta = target - origin;
    if delta == Vec2::ZERO {
        return [Vec2::ZERO; FAN_SIZE];
    }
    let centre = delta.y.atan2(delta.x);
    let step = FAN_STEP_DEGREES.to_radians();
    let mut directions = [Vec2::ZERO; FAN_SIZE];
    for (index, direction) in directions.iter_mut().enumerate() {
        let offset = index as f32 - (FAN_SIZE / 2) as f32;
        *direction = Vec2::from_angle(centre + offset * step);
    }
    directions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_normalizes_and_handles_coincident_points() {
        let direction = aim(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert!((direction - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(aim(Vec2::new(3.0, 3.0), Vec2::new(3.0, 3.0)), Vec2::ZERO);
    }

    #[test]
    fn fan_is_symmetric_around_aim_line() {
        let directions = fan(Vec2::ZERO, Vec2::new(0.0, 10.0));
        let centre = std::f32::consts::FRAC_PI_2;
        for (index, direction) in directions.iter().enumerate() {
            let k = index as f32 - 2.0;
            let expected = centre + k * 7.5_f32.to_radians();
            let angle = direction.y.atan2(direction.x);
            assert!((angle - expected).abs() < 1e-5, "bullet {index}: {angle}");
            assert!((direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn spawn_reuses_first_free_slot() {
        let mut pool = BulletPool::with_capacity(3);
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X, true), Some(0));
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::X, true), Some(1));
        pool.slots[0].active = false;
        assert_eq!(pool.spawn(Vec2::ZERO, Vec2::Y, false), Some(0));
        assert_eq!(pool.active_count(), 2);
    }
}
