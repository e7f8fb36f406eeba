#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative level state for Tilerun.
//!
//! The world owns the tile field, the entity arena, the bullet pool and the
//! checkpoint list. All mutation flows through [`apply`]; read access goes
//! through the [`query`] module.

mod entities;
mod tile_field;

use std::time::Duration;

use tilerun_core::{
    BossPhase, CheckpointSnapshot, Command, ConfigError, DeathCause, EntityId, EntityKind, Event,
    LocomotionState, PhysicsType, SimulationConfig, Vec2,
};
use tilerun_system_physics::EntityPhysics;
use tilerun_system_projectiles::{BulletPool, Projectiles, Target, TargetSide};
use tracing::{debug, info};

use entities::{Entity, EntityArena};
pub use tile_field::TileField;

/// Represents the authoritative state of one loaded level.
#[derive(Debug)]
pub struct World {
    config: SimulationConfig,
    tiles: TileField,
    entities: EntityArena,
    bullets: BulletPool,
    checkpoints: Vec<Vec2>,
    last_checkpoint: Option<u32>,
    boss_phase: Option<BossPhase>,
    physics: EntityPhysics,
    projectiles: Projectiles,
    elapsed: f32,
    tick_index: u64,
}

impl World {
    /// Creates an empty world using the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::build(SimulationConfig::default())
    }

    /// Creates an empty world after validating the provided tuning.
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimulationConfig) -> Self {
        Self {
            tiles: TileField::empty(config.world.tile_length),
            entities: EntityArena::default(),
            bullets: BulletPool::with_capacity(config.world.bullet_capacity),
            checkpoints: Vec::new(),
            last_checkpoint: None,
            boss_phase: None,
            physics: EntityPhysics::new(config.physics.clone()),
            projectiles: Projectiles::new(config.projectiles.clone()),
            elapsed: 0.0,
            tick_index: 0,
            config,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureLevel {
            columns,
            rows,
            cells,
        } => {
            world.tiles = TileField::new(columns, rows, world.config.world.tile_length, cells);
            world.entities.clear();
            world.bullets.clear();
            world.checkpoints.clear();
            world.last_checkpoint = None;
            world.boss_phase = None;
            world.elapsed = 0.0;
            world.tick_index = 0;
            info!(columns, rows, "level configured");
            out_events.push(Event::LevelConfigured { columns, rows });
        }
        Command::SetTile { column, row, cell } => {
            if !world.tiles.set(column, row, cell) {
                debug!(column, row, "ignoring tile edit outside the field");
            }
        }
        Command::SpawnEntity { mut spawn } => {
            let kind = spawn.kind;
            if kind == EntityKind::Boss {
                spawn.physics_type = BossPhase::Melee.physics_type();
            }
            match world
                .entities
                .spawn(spawn, world.config.world.enemy_capacity)
            {
                Some(entity) => {
                    if kind == EntityKind::Boss {
                        world.boss_phase = Some(BossPhase::Melee);
                    }
                    debug!(entity = entity.get(), ?kind, "entity spawned");
                    out_events.push(Event::EntitySpawned { entity, kind });
                }
                None => debug!(?kind, "entity capacity exhausted, dropping spawn"),
            }
        }
        Command::PlaceCheckpoint { position } => world.checkpoints.push(position),
        Command::Steer {
            entity,
            velocity_x,
            facing,
        } => {
            if let Some(entity) = world.entities.get_mut(entity) {
                if entity.is_alive() {
                    entity.body.velocity.x = velocity_x;
                    entity.facing = facing;
                }
            }
        }
        Command::Jump { entity } => {
            let tiles = world.tiles.view();
            if let Some(entity) = world.entities.get_mut(entity) {
                if entity.is_alive() && world.physics.can_jump(&entity.body, tiles) {
                    entity.body.velocity.y = -world.physics.config().jump_speed;
                }
            }
        }
        Command::FireBullet { shooter, target } => fire(world, shooter, target, false, out_events),
        Command::FireFan { shooter, target } => fire(world, shooter, target, true, out_events),
        Command::MeleeStrike { attacker, target } => strike(world, attacker, target, out_events),
        Command::EnterBossPhase { phase } => enter_boss_phase(world, phase, out_events),
        Command::Tick { dt } => tick(world, dt, out_events),
        Command::RestoreCheckpoint { snapshot } => restore(world, &snapshot, out_events),
    }
}

fn fire(world: &mut World, shooter: EntityId, target: Vec2, fan: bool, out_events: &mut Vec<Event>) {
    let Some(entity) = world.entities.get_mut(shooter) else {
        return;
    };
    if !entity.is_alive() || !entity.cooldown_elapsed() {
        return;
    }

    let origin = entity.body.position;
    let from_player = entity.kind == EntityKind::Player;
    let mut slots = Vec::new();
    if fan {
        world
            .projectiles
            .fire_fan(&mut world.bullets, origin, target, from_player, &mut slots);
    } else if let Some(slot) =
        world
            .projectiles
            .fire(&mut world.bullets, origin, target, from_player)
    {
        slots.push(slot);
    }

    entity.shoot_timer = 0.0;
    entity.shoot_pose = world.config.presentation.shoot_pose;
    out_events.extend(
        slots
            .into_iter()
            .map(|slot| Event::BulletFired { slot, shooter }),
    );
}

fn strike(world: &mut World, attacker: EntityId, target: EntityId, out_events: &mut Vec<Event>) {
    let target_alive = world.entities.get(target).is_some_and(Entity::is_alive);
    let Some(striker) = world.entities.get_mut(attacker) else {
        return;
    };
    if !target_alive || !striker.is_alive() || !striker.cooldown_elapsed() {
        return;
    }
    striker.shoot_timer = 0.0;

    if let Some(victim) = world.entities.get_mut(target) {
        let damage = world.config.ai.melee_damage;
        victim.body.health = victim.body.health.saturating_sub(damage);
        report_damage(victim, DeathCause::Melee, out_events);
    }
}

fn enter_boss_phase(world: &mut World, phase: BossPhase, out_events: &mut Vec<Event>) {
    if world.boss_phase == Some(phase) {
        return;
    }
    let Some(boss) = world.entities.boss_mut() else {
        return;
    };
    if !boss.is_alive() {
        return;
    }

    let physics_type = phase.physics_type();
    if physics_type == PhysicsType::Flying {
        if boss.body.physics_type != PhysicsType::Flying {
            boss.body.base_position = boss.body.position;
        }
        boss.body.velocity.y = 0.0;
    }
    boss.body.physics_type = physics_type;
    world.boss_phase = Some(phase);
    info!(?phase, health = boss.body.health, "boss phase changed");
    out_events.push(Event::BossPhaseChanged { phase });
}

fn tick(world: &mut World, dt: Duration, out_events: &mut Vec<Event>) {
    let seconds = dt.as_secs_f32();
    world.tick_index = world.tick_index.saturating_add(1);
    world.elapsed += seconds;
    out_events.push(Event::TimeAdvanced { dt });

    step_entities(world, seconds, out_events);
    activate_checkpoints(world, out_events);
    resolve_projectiles(world, seconds, out_events);
}

fn step_entities(world: &mut World, seconds: f32, out_events: &mut Vec<Event>) {
    let tiles = world.tiles.view();
    for entity in world.entities.iter_mut() {
        if !entity.is_alive() {
            continue;
        }
        entity.shoot_timer += seconds;
        entity.shoot_pose = (entity.shoot_pose - seconds).max(0.0);

        let outcome = world
            .physics
            .step(&mut entity.body, tiles, world.elapsed, seconds);
        if outcome.state != entity.state {
            out_events.push(Event::EntityStateChanged {
                entity: entity.id,
                from: entity.state,
                to: outcome.state,
            });
            entity.state = outcome.state;
        }

        if !entity.is_alive() {
            let cause = if outcome.contacts.death {
                DeathCause::DeathTile
            } else {
                DeathCause::OutOfWorld
            };
            debug!(entity = entity.id.get(), ?cause, "entity died");
            out_events.push(Event::EntityDied {
                entity: entity.id,
                cause,
            });
        }
    }
}

fn activate_checkpoints(world: &mut World, out_events: &mut Vec<Event>) {
    let Some(player) = world.entities.player().filter(|player| player.is_alive()) else {
        return;
    };
    let reach = player.body.radius + world.tiles.tile_length() * 0.5;

    for (index, position) in world.checkpoints.iter().enumerate() {
        let Ok(index) = u32::try_from(index) else {
            break;
        };
        if world.last_checkpoint.is_some_and(|last| index <= last) {
            continue;
        }
        if player.body.position.distance_squared(*position) <= reach * reach {
            world.last_checkpoint = Some(index);
            info!(index, "checkpoint activated");
            out_events.push(Event::CheckpointActivated { index });
        }
    }
}

fn resolve_projectiles(world: &mut World, seconds: f32, out_events: &mut Vec<Event>) {
    let mut expired = Vec::new();
    world.projectiles.advance(
        &mut world.bullets,
        seconds,
        world.tiles.width(),
        world.tiles.height(),
        &mut expired,
    );
    out_events.extend(expired.into_iter().map(|slot| Event::BulletExpired { slot }));

    let mut targets: Vec<Target> = world
        .entities
        .iter()
        .filter(|entity| entity.is_alive())
        .map(|entity| Target {
            id: entity.id,
            side: match entity.kind {
                EntityKind::Player => TargetSide::Player,
                EntityKind::Enemy => TargetSide::Enemy,
                EntityKind::Boss => TargetSide::Boss,
            },
            position: entity.body.position,
            radius: entity.body.radius,
            health: entity.body.health,
        })
        .collect();
    let mut hits = Vec::new();
    world
        .projectiles
        .resolve_hits(&mut world.bullets, &mut targets, &mut hits);

    for hit in hits {
        out_events.push(Event::BulletHit {
            slot: hit.slot,
            target: hit.target,
        });
        let Some(entity) = world.entities.get_mut(hit.target) else {
            continue;
        };
        entity.body.health = hit.remaining_health;
        report_damage(entity, DeathCause::Projectile, out_events);
        if entity.kind == EntityKind::Boss && !entity.is_alive() {
            info!(entity = entity.id.get(), "boss defeated");
            out_events.push(Event::BossDefeated { entity: entity.id });
        }
    }
}

fn report_damage(entity: &Entity, cause: DeathCause, out_events: &mut Vec<Event>) {
    if entity.is_alive() {
        out_events.push(Event::EntityDamaged {
            entity: entity.id,
            health: entity.body.health,
        });
    } else {
        debug!(entity = entity.id.get(), ?cause, "entity died");
        out_events.push(Event::EntityDied {
            entity: entity.id,
            cause,
        });
    }
}

fn restore(world: &mut World, snapshot: &CheckpointSnapshot, out_events: &mut Vec<Event>) {
    for record in &snapshot.entities {
        let Some(entity) = world.entities.get_mut(record.id) else {
            debug!(entity = record.id.get(), "ignoring record for unknown entity");
            continue;
        };
        entity.body.position = record.position;
        // Flying bodies keep the anchor they bob around.
        if entity.body.physics_type != PhysicsType::Flying {
            entity.body.base_position = record.position;
        }
        entity.body.velocity = Vec2::ZERO;
        entity.body.health = record.health;
        entity.state = LocomotionState::Idle;
        entity.shoot_pose = 0.0;
    }
    world.bullets.clear();
    world.last_checkpoint = snapshot.last_checkpoint;
    info!(last_checkpoint = ?snapshot.last_checkpoint, "checkpoint restored");
    out_events.push(Event::CheckpointRestored {
        last_checkpoint: snapshot.last_checkpoint,
    });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{TileField, World};
    use tilerun_core::{
        BossPhase, BulletSnapshot, CheckpointSnapshot, EntityId, EntityRecord, EntitySnapshot,
        EntityView, SimulationConfig, TileFieldView, Vec2,
    };

    /// Tuning the world was created with.
    #[must_use]
    pub fn config(world: &World) -> &SimulationConfig {
        &world.config
    }

    /// Provides read-only access to the level's tile storage.
    #[must_use]
    pub fn tile_field(world: &World) -> &TileField {
        &world.tiles
    }

    /// Borrowed tile view consumed by systems.
    #[must_use]
    pub fn tile_view(world: &World) -> TileFieldView<'_> {
        world.tiles.view()
    }

    /// Captures a read-only view of every entity slot.
    #[must_use]
    pub fn entity_view(world: &World) -> EntityView {
        EntityView::from_snapshots(world.entities.iter().map(|entity| entity.snapshot()).collect())
    }

    /// Snapshot of a single entity slot.
    #[must_use]
    pub fn entity(world: &World, id: EntityId) -> Option<EntitySnapshot> {
        world.entities.get(id).map(|entity| entity.snapshot())
    }

    /// Bullets currently in flight, in slot order.
    #[must_use]
    pub fn bullets(world: &World) -> Vec<BulletSnapshot> {
        world.bullets.snapshots()
    }

    /// Phase the boss currently fights in, or `None` without a boss.
    #[must_use]
    pub fn boss_phase(world: &World) -> Option<BossPhase> {
        world.boss_phase
    }

    /// Checkpoint centres in placement order.
    #[must_use]
    pub fn checkpoints(world: &World) -> &[Vec2] {
        &world.checkpoints
    }

    /// Index of the last checkpoint the player touched.
    #[must_use]
    pub fn last_checkpoint(world: &World) -> Option<u32> {
        world.last_checkpoint
    }

    /// Captures positions, health and checkpoint progress for a later restore.
    #[must_use]
    pub fn checkpoint_snapshot(world: &World) -> CheckpointSnapshot {
        CheckpointSnapshot {
            last_checkpoint: world.last_checkpoint,
            entities: world
                .entities
                .iter()
                .map(|entity| EntityRecord {
                    id: entity.id,
                    position: entity.body.position,
                    health: entity.body.health,
                })
                .collect(),
        }
    }

    /// Total simulated seconds since the level was configured.
    #[must_use]
    pub fn elapsed(world: &World) -> f32 {
        world.elapsed
    }

    /// Number of ticks processed since the level was configured.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilerun_core::{EntitySpawn, Facing, PresentationOverlay, TileCell};

    const TILE: f32 = 32.0;

    fn configured(columns: u32, rows: u32, cells: Vec<TileCell>) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::ConfigureLevel {
                columns,
                rows,
                cells,
            },
            &mut events,
        );
        assert_eq!(events, vec![Event::LevelConfigured { columns, rows }]);
        world
    }

    fn spawn(world: &mut World, spawn: EntitySpawn) -> EntityId {
        let mut events = Vec::new();
        apply(world, Command::SpawnEntity { spawn }, &mut events);
        match events.as_slice() {
            [Event::EntitySpawned { entity, .. }] => *entity,
            other => panic!("unexpected events {other:?}"),
        }
    }

    fn tick(world: &mut World, seconds: f32) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_secs_f32(seconds),
            },
            &mut events,
        );
        events
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.world.bullet_capacity = 0;
        assert_eq!(
            World::with_config(config).err(),
            Some(ConfigError::EmptyBulletPool)
        );
    }

    #[test]
    fn configure_level_resets_entities_and_checkpoints() {
        let mut world = configured(4, 4, Vec::new());
        let _ = spawn(&mut world, EntitySpawn::player(Vec2::new(16.0, 16.0)));
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::PlaceCheckpoint {
                position: Vec2::new(48.0, 16.0),
            },
            &mut events,
        );

        apply(
            &mut world,
            Command::ConfigureLevel {
                columns: 2,
                rows: 2,
                cells: Vec::new(),
            },
            &mut events,
        );

        assert_eq!(query::entity_view(&world).iter().count(), 0);
        assert!(query::checkpoints(&world).is_empty());
        assert_eq!(query::tile_field(&world).cells().len(), 4);
        assert_eq!(query::tick_index(&world), 0);
    }

    #[test]
    fn steer_updates_velocity_and_facing() {
        let mut world = configured(4, 4, Vec::new());
        let enemy = spawn(
            &mut world,
            EntitySpawn::enemy(Vec2::new(64.0, 64.0), PhysicsType::None),
        );
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::Steer {
                entity: enemy,
                velocity_x: -30.0,
                facing: Facing::Left,
            },
            &mut events,
        );

        let snapshot = query::entity(&world, enemy).expect("enemy present");
        assert_eq!(snapshot.body.velocity.x, -30.0);
        assert_eq!(snapshot.facing, Facing::Left);
        assert!(events.is_empty());
    }

    #[test]
    fn firing_respects_cooldown_and_shows_shoot_pose() {
        let mut world = configured(10, 4, Vec::new());
        let player = spawn(
            &mut world,
            EntitySpawn::player(Vec2::new(32.0, 32.0)).with_shoot_cooldown(0.5),
        );
        let mut events = Vec::new();
        let fire = Command::FireBullet {
            shooter: player,
            target: Vec2::new(200.0, 32.0),
        };

        apply(&mut world, fire.clone(), &mut events);
        assert_eq!(
            events,
            vec![Event::BulletFired {
                slot: 0,
                shooter: player,
            }]
        );
        let snapshot = query::entity(&world, player).expect("player present");
        assert_eq!(snapshot.overlay, Some(PresentationOverlay::Shoot));

        events.clear();
        apply(&mut world, fire, &mut events);
        assert!(events.is_empty());
        assert_eq!(query::bullets(&world).len(), 1);
    }

    #[test]
    fn fan_fires_five_bullets() {
        let mut world = configured(10, 10, Vec::new());
        let boss = spawn(&mut world, EntitySpawn::boss(Vec2::new(160.0, 160.0)));
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::FireFan {
                shooter: boss,
                target: Vec2::new(32.0, 160.0),
            },
            &mut events,
        );

        assert_eq!(events.len(), 5);
        assert!(query::bullets(&world).iter().all(|bullet| !bullet.from_player));
    }

    #[test]
    fn melee_strike_damages_then_kills() {
        let mut world = configured(10, 4, Vec::new());
        let player = spawn(
            &mut world,
            EntitySpawn::player(Vec2::new(32.0, 32.0)).with_health(1),
        );
        let boss = spawn(
            &mut world,
            EntitySpawn::boss(Vec2::new(60.0, 32.0)).with_shoot_cooldown(0.0),
        );
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::MeleeStrike {
                attacker: boss,
                target: player,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::EntityDied {
                entity: player,
                cause: DeathCause::Melee,
            }]
        );
        let snapshot = query::entity(&world, player).expect("player present");
        assert_eq!(snapshot.overlay, Some(PresentationOverlay::Die));
    }

    #[test]
    fn flying_phase_reanchors_boss() {
        let mut world = configured(10, 10, vec![TileCell::EMPTY; 100]);
        let boss = spawn(&mut world, EntitySpawn::boss(Vec2::new(100.0, 80.0)));
        assert_eq!(query::boss_phase(&world), Some(BossPhase::Melee));
        let _ = tick(&mut world, 0.1);
        let moved = query::entity(&world, boss).expect("boss present").body.position;
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::EnterBossPhase {
                phase: BossPhase::RangedSingle,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::EnterBossPhase {
                phase: BossPhase::RangedSingle,
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::BossPhaseChanged {
                phase: BossPhase::RangedSingle,
            }]
        );
        let body = query::entity(&world, boss).expect("boss present").body;
        assert_eq!(body.physics_type, PhysicsType::Flying);
        assert_eq!(body.base_position, moved);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn landing_on_death_tile_kills_with_cause() {
        let mut cells = vec![TileCell::EMPTY; 9];
        cells[6..].fill(TileCell::LEGACY_DEATH);
        let mut world = configured(3, 3, cells);
        let enemy = spawn(
            &mut world,
            EntitySpawn::enemy(Vec2::new(48.0, 2.0 * TILE - 7.0), PhysicsType::Ground)
                .with_radius(8.0),
        );

        let events = tick(&mut world, 1.0 / 30.0);

        assert!(events.contains(&Event::EntityDied {
            entity: enemy,
            cause: DeathCause::DeathTile,
        }));
        assert!(!query::entity(&world, enemy).expect("slot kept").is_alive());
        assert!(!tick(&mut world, 1.0 / 30.0)
            .iter()
            .any(|event| matches!(event, Event::EntityDied { .. })));
    }

    #[test]
    fn player_bullet_defeats_boss() {
        let mut world = configured(20, 10, Vec::new());
        let player = spawn(
            &mut world,
            EntitySpawn::player(Vec2::new(40.0, 40.0)).with_shoot_cooldown(0.0),
        );
        let boss = spawn(
            &mut world,
            EntitySpawn::boss(Vec2::new(140.0, 40.0)).with_health(1),
        );
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::EnterBossPhase {
                phase: BossPhase::RangedFan,
            },
            &mut events,
        );
        apply(
            &mut world,
            Command::FireBullet {
                shooter: player,
                target: Vec2::new(140.0, 40.0),
            },
            &mut events,
        );

        let events = tick(&mut world, 0.2);

        assert!(events.contains(&Event::BulletHit { slot: 0, target: boss }));
        assert!(events.contains(&Event::EntityDied {
            entity: boss,
            cause: DeathCause::Projectile,
        }));
        assert!(events.contains(&Event::BossDefeated { entity: boss }));
        assert!(query::bullets(&world).is_empty());
    }

    #[test]
    fn checkpoints_activate_in_increasing_order_and_restore() {
        let mut world = configured(20, 10, Vec::new());
        let player = spawn(
            &mut world,
            EntitySpawn::player(Vec2::new(100.0, 100.0)).with_health(3),
        );
        let mut events = Vec::new();
        for x in [300.0, 100.0] {
            apply(
                &mut world,
                Command::PlaceCheckpoint {
                    position: Vec2::new(x, 100.0),
                },
                &mut events,
            );
        }
        apply(
            &mut world,
            Command::EnterBossPhase {
                phase: BossPhase::Melee,
            },
            &mut events,
        );
        assert!(events.is_empty());

        // Zero gravity keeps the player floating in place for the test.
        world.physics = EntityPhysics::new(tilerun_core::PhysicsConfig {
            gravity: 0.0,
            ..tilerun_core::PhysicsConfig::default()
        });
        let events = tick(&mut world, 0.1);
        assert!(events.contains(&Event::CheckpointActivated { index: 1 }));
        assert_eq!(query::last_checkpoint(&world), Some(1));
        let saved = query::checkpoint_snapshot(&world);

        if let Some(entity) = world.entities.get_mut(player) {
            entity.body.position = Vec2::new(300.0, 100.0);
            entity.body.health = 1;
        }
        let events = tick(&mut world, 0.1);
        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::CheckpointActivated { .. })));

        let mut events = Vec::new();
        apply(
            &mut world,
            Command::RestoreCheckpoint { snapshot: saved },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::CheckpointRestored {
                last_checkpoint: Some(1),
            }]
        );
        let restored = query::entity(&world, player).expect("player present");
        assert_eq!(restored.body.position, Vec2::new(100.0, 100.0));
        assert_eq!(restored.body.health, 3);
    }

    #[test]
    fn falling_out_of_the_level_is_reported() {
        let mut world = configured(2, 2, Vec::new());
        let player = spawn(&mut world, EntitySpawn::player(Vec2::new(16.0, 60.0)));

        let mut died = false;
        for _ in 0..120 {
            died |= tick(&mut world, 1.0 / 60.0).contains(&Event::EntityDied {
                entity: player,
                cause: DeathCause::OutOfWorld,
            });
        }

        assert!(died);
    }
}
