//! Entity arena with stable slot identifiers and singleton tracking.

use tilerun_core::{
    AssetId, EntityId, EntityKind, EntitySnapshot, EntitySpawn, Facing, LocomotionState,
    PhysicsBody, PresentationOverlay, Vec2,
};

/// Authoritative state of one entity stored inside the world.
#[derive(Clone, Debug)]
pub(crate) struct Entity {
    pub(crate) id: EntityId,
    pub(crate) kind: EntityKind,
    pub(crate) asset: AssetId,
    pub(crate) body: PhysicsBody,
    pub(crate) facing: Facing,
    pub(crate) max_health: i32,
    pub(crate) speed: f32,
    pub(crate) shoot_cooldown: f32,
    pub(crate) shoot_timer: f32,
    pub(crate) left_bound: f32,
    pub(crate) right_bound: f32,
    pub(crate) state: LocomotionState,
    /// Seconds the shoot pose remains visible.
    pub(crate) shoot_pose: f32,
}

impl Entity {
    fn from_spawn(id: EntityId, spawn: EntitySpawn) -> Self {
        Self {
            id,
            kind: spawn.kind,
            asset: spawn.asset,
            body: PhysicsBody {
                physics_type: spawn.physics_type,
                base_position: spawn.position,
                position: spawn.position,
                velocity: Vec2::ZERO,
                radius: spawn.radius,
                health: spawn.health,
            },
            facing: spawn.facing,
            max_health: spawn.health,
            speed: spawn.speed,
            shoot_cooldown: spawn.shoot_cooldown,
            // Attacks are available immediately after spawning.
            shoot_timer: spawn.shoot_cooldown,
            left_bound: spawn.left_bound,
            right_bound: spawn.right_bound,
            state: LocomotionState::Idle,
            shoot_pose: 0.0,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Whether the attack cooldown allows another shot or strike.
    pub(crate) fn cooldown_elapsed(&self) -> bool {
        self.shoot_cooldown <= 0.0 || self.shoot_timer >= self.shoot_cooldown
    }

    pub(crate) fn overlay(&self) -> Option<PresentationOverlay> {
        if !self.is_alive() {
            Some(PresentationOverlay::Die)
        } else if self.shoot_pose > 0.0 {
            Some(PresentationOverlay::Shoot)
        } else {
            None
        }
    }

    pub(crate) fn snapshot(&self) -> EntitySnapshot {
        EntitySnapshot {
            id: self.id,
            kind: self.kind,
            asset: self.asset,
            body: self.body,
            facing: self.facing,
            max_health: self.max_health,
            speed: self.speed,
            shoot_cooldown: self.shoot_cooldown,
            shoot_timer: self.shoot_timer,
            left_bound: self.left_bound,
            right_bound: self.right_bound,
            state: self.state,
            overlay: self.overlay(),
        }
    }
}

/// Arena that stores entities and allocates slot identifiers.
///
/// Slots are never reused while a level is loaded, so identifiers stay
/// stable across ticks even after their entity dies.
#[derive(Debug, Default)]
pub(crate) struct EntityArena {
    slots: Vec<Entity>,
    player: Option<EntityId>,
    boss: Option<EntityId>,
    enemy_count: usize,
}

impl EntityArena {
    /// Places an entity, returning its slot.
    ///
    /// A second player or boss reinitializes the existing singleton slot.
    /// Enemies beyond `enemy_capacity` are rejected.
    pub(crate) fn spawn(&mut self, spawn: EntitySpawn, enemy_capacity: usize) -> Option<EntityId> {
        let existing = match spawn.kind {
            EntityKind::Player => self.player,
            EntityKind::Boss => self.boss,
            EntityKind::Enemy => {
                if self.enemy_count >= enemy_capacity {
                    return None;
                }
                None
            }
        };

        if let Some(id) = existing {
            let entity = self.get_mut(id)?;
            *entity = Entity::from_spawn(id, spawn);
            return Some(id);
        }

        let id = EntityId::new(u32::try_from(self.slots.len()).ok()?);
        match spawn.kind {
            EntityKind::Player => self.player = Some(id),
            EntityKind::Boss => self.boss = Some(id),
            EntityKind::Enemy => self.enemy_count += 1,
        }
        self.slots.push(Entity::from_spawn(id, spawn));
        Some(id)
    }

    pub(crate) fn get(&self, id: EntityId) -> Option<&Entity> {
        self.slots.get(usize::try_from(id.get()).ok()?)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.slots.get_mut(usize::try_from(id.get()).ok()?)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.slots.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.slots.iter_mut()
    }

    pub(crate) fn player(&self) -> Option<&Entity> {
        self.get(self.player?)
    }

    pub(crate) fn boss_mut(&mut self) -> Option<&mut Entity> {
        let id = self.boss?;
        self.get_mut(id)
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}
