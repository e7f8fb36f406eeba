#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tilerun simulation.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative level world, and pure systems. Adapters and systems submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values.
//! Systems read immutable views such as [`EntityView`] and [`TileFieldView`]
//! and respond exclusively with new command batches.

pub mod config;
pub mod tile;

use std::time::Duration;

pub use glam::Vec2;
use serde::{Deserialize, Serialize};

pub use config::{
    AiConfig, ConfigError, PhysicsConfig, PresentationConfig, ProjectileConfig, SimulationConfig,
    WorldConfig,
};
pub use tile::{PhysicsClass, TileCell, TileContents, TileFieldView};

/// Health fraction at or above which the boss fights in melee.
pub const BOSS_MELEE_THRESHOLD: f32 = 0.5;
/// Health fraction at or above which the boss fires single aimed shots.
pub const BOSS_SINGLE_SHOT_THRESHOLD: f32 = 0.2;

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Replaces the tile field and resets every entity, bullet and checkpoint.
    ConfigureLevel {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
        /// Row-major packed cells; padded or truncated to `columns * rows`.
        cells: Vec<TileCell>,
    },
    /// Overwrites a single cell of the tile field.
    SetTile {
        /// Column of the edited cell.
        column: u32,
        /// Row of the edited cell.
        row: u32,
        /// New packed value.
        cell: TileCell,
    },
    /// Places an entity into the level.
    SpawnEntity {
        /// Initial parameters of the entity.
        spawn: EntitySpawn,
    },
    /// Places a checkpoint marker into the level.
    PlaceCheckpoint {
        /// Centre of the checkpoint in world units.
        position: Vec2,
    },
    /// Sets the horizontal velocity and facing of an entity.
    Steer {
        /// Entity being steered.
        entity: EntityId,
        /// Desired horizontal velocity in world units per second.
        velocity_x: f32,
        /// Facing to adopt.
        facing: Facing,
    },
    /// Requests a jump for a grounded ground-type entity.
    Jump {
        /// Entity attempting to jump.
        entity: EntityId,
    },
    /// Fires a bullet from the shooter's position toward a world point.
    FireBullet {
        /// Entity firing the bullet.
        shooter: EntityId,
        /// Point the bullet is aimed at.
        target: Vec2,
    },
    /// Fires a five-bullet fan from the shooter centred on the line to `target`.
    FireFan {
        /// Entity firing the fan.
        shooter: EntityId,
        /// Point the centre bullet is aimed at.
        target: Vec2,
    },
    /// Applies contact damage from one entity to another.
    MeleeStrike {
        /// Entity delivering the strike.
        attacker: EntityId,
        /// Entity receiving the strike.
        target: EntityId,
    },
    /// Switches the boss into the provided phase.
    EnterBossPhase {
        /// Phase the boss should adopt.
        phase: BossPhase,
    },
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Restores positions, health and checkpoint progress from a snapshot.
    RestoreCheckpoint {
        /// Snapshot captured by an earlier query.
        snapshot: CheckpointSnapshot,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Confirms that a new tile field was installed.
    LevelConfigured {
        /// Number of tile columns.
        columns: u32,
        /// Number of tile rows.
        rows: u32,
    },
    /// Confirms that an entity occupies a slot in the arena.
    EntitySpawned {
        /// Slot assigned to the entity.
        entity: EntityId,
        /// Role of the entity.
        kind: EntityKind,
    },
    /// Reports a change of the physics-derived locomotion state.
    EntityStateChanged {
        /// Entity whose state changed.
        entity: EntityId,
        /// State before the tick.
        from: LocomotionState,
        /// State after the tick.
        to: LocomotionState,
    },
    /// Reports that an entity lost health without dying.
    EntityDamaged {
        /// Entity that was damaged.
        entity: EntityId,
        /// Remaining health.
        health: i32,
    },
    /// Reports that an entity's health dropped to zero.
    EntityDied {
        /// Entity that died.
        entity: EntityId,
        /// What killed the entity.
        cause: DeathCause,
    },
    /// Confirms that a bullet was spawned.
    BulletFired {
        /// Pool slot occupied by the bullet.
        slot: usize,
        /// Entity that fired.
        shooter: EntityId,
    },
    /// Reports that a bullet left the level bounds.
    BulletExpired {
        /// Pool slot that was released.
        slot: usize,
    },
    /// Reports that a bullet struck an entity.
    BulletHit {
        /// Pool slot that was released.
        slot: usize,
        /// Entity that was struck.
        target: EntityId,
    },
    /// Announces that the boss entered a new phase.
    BossPhaseChanged {
        /// Phase that became active.
        phase: BossPhase,
    },
    /// Announces that the boss was killed by a bullet.
    BossDefeated {
        /// Slot of the boss.
        entity: EntityId,
    },
    /// Announces that the player touched a new checkpoint.
    CheckpointActivated {
        /// Index of the checkpoint in placement order.
        index: u32,
    },
    /// Confirms that a checkpoint snapshot was applied.
    CheckpointRestored {
        /// Checkpoint index carried by the snapshot.
        last_checkpoint: Option<u32>,
    },
}

/// Reasons an entity's health reached zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeathCause {
    /// Overlapped a death-class tile.
    DeathTile,
    /// Fell below the bottom of the level.
    OutOfWorld,
    /// Struck by a bullet.
    Projectile,
    /// Struck by a melee attack.
    Melee,
}

/// Stable slot index of an entity within the level arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    /// Creates a new entity identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of an entity asset in the external asset library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(u32);

impl AssetId {
    /// Creates a new asset identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Role an entity plays in the level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// The controllable character.
    Player,
    /// An ordinary enemy.
    Enemy,
    /// The multi-phase boss.
    Boss,
}

/// Locomotion model applied by the physics system.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicsType {
    /// Entity is not integrated.
    #[default]
    None,
    /// Entity obeys gravity and tile collision.
    Ground,
    /// Entity follows a scripted vertical sinusoid and ignores tiles.
    Flying,
}

/// Horizontal facing of an entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    /// Facing toward decreasing x.
    Left,
    /// Facing toward increasing x.
    #[default]
    Right,
}

impl Facing {
    /// Facing that points along the sign of `dx`; zero faces right.
    #[must_use]
    pub fn toward(dx: f32) -> Self {
        if dx < 0.0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// `-1.0` for left, `+1.0` for right.
    #[must_use]
    pub const fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Opposite facing.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Locomotion state derived by physics from motion and ground contact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionState {
    /// Standing still.
    #[default]
    Idle,
    /// Moving horizontally.
    Walk,
    /// Airborne and rising.
    Ascend,
    /// Airborne and falling.
    Fall,
}

/// Presentation-only state layered over locomotion by animation code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PresentationOverlay {
    /// Entity fired recently.
    Shoot,
    /// Entity is dead.
    Die,
}

/// Boss behaviour selected by remaining health.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossPhase {
    /// Ground-bound chase with contact strikes.
    Melee,
    /// Flying with one aimed shot per cooldown.
    RangedSingle,
    /// Flying with a five-bullet fan per cooldown.
    RangedFan,
}

impl BossPhase {
    /// Selects the phase for the provided health.
    ///
    /// The selection has no hysteresis: health oscillating across a
    /// threshold flips the phase every evaluation. A non-positive maximum is
    /// treated as full health.
    #[must_use]
    pub fn for_health(health: i32, max_health: i32) -> Self {
        if max_health <= 0 {
            return Self::Melee;
        }
        let fraction = health as f32 / max_health as f32;
        if fraction >= BOSS_MELEE_THRESHOLD {
            Self::Melee
        } else if fraction >= BOSS_SINGLE_SHOT_THRESHOLD {
            Self::RangedSingle
        } else {
            Self::RangedFan
        }
    }

    /// Physics type the boss adopts in this phase.
    #[must_use]
    pub const fn physics_type(self) -> PhysicsType {
        match self {
            Self::Melee => PhysicsType::Ground,
            Self::RangedSingle | Self::RangedFan => PhysicsType::Flying,
        }
    }
}

/// Parameters for placing an entity into the level.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySpawn {
    /// Role of the entity.
    pub kind: EntityKind,
    /// Asset providing the entity's animations.
    pub asset: AssetId,
    /// Locomotion model.
    pub physics_type: PhysicsType,
    /// Spawn and patrol anchor; also the initial position.
    pub position: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Initial facing.
    pub facing: Facing,
    /// Initial and maximum health.
    pub health: i32,
    /// Horizontal movement speed.
    pub speed: f32,
    /// Seconds between attacks; zero disables ranged attacks for enemies.
    pub shoot_cooldown: f32,
    /// Left patrol bound in world units.
    pub left_bound: f32,
    /// Right patrol bound in world units; bounds are inactive unless it exceeds `left_bound`.
    pub right_bound: f32,
}

impl EntitySpawn {
    /// Ground-type player with default stats.
    #[must_use]
    pub fn player(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Player,
            asset: AssetId::default(),
            physics_type: PhysicsType::Ground,
            position,
            radius: 12.0,
            facing: Facing::Right,
            health: 5,
            speed: 160.0,
            shoot_cooldown: 0.25,
            left_bound: 0.0,
            right_bound: 0.0,
        }
    }

    /// Ordinary enemy with default stats.
    #[must_use]
    pub fn enemy(position: Vec2, physics_type: PhysicsType) -> Self {
        Self {
            kind: EntityKind::Enemy,
            asset: AssetId::default(),
            physics_type,
            position,
            radius: 12.0,
            facing: Facing::Left,
            health: 2,
            speed: 60.0,
            shoot_cooldown: 0.0,
            left_bound: 0.0,
            right_bound: 0.0,
        }
    }

    /// Boss starting in its melee phase.
    #[must_use]
    pub fn boss(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Boss,
            asset: AssetId::default(),
            physics_type: BossPhase::Melee.physics_type(),
            position,
            radius: 24.0,
            facing: Facing::Left,
            health: 20,
            speed: 80.0,
            shoot_cooldown: 1.0,
            left_bound: 0.0,
            right_bound: 0.0,
        }
    }

    /// Overrides the asset identifier.
    #[must_use]
    pub fn with_asset(mut self, asset: AssetId) -> Self {
        self.asset = asset;
        self
    }

    /// Overrides the collision radius.
    #[must_use]
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Overrides health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self
    }

    /// Overrides movement speed.
    #[must_use]
    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    /// Overrides the attack cooldown.
    #[must_use]
    pub fn with_shoot_cooldown(mut self, shoot_cooldown: f32) -> Self {
        self.shoot_cooldown = shoot_cooldown;
        self
    }

    /// Overrides the initial facing.
    #[must_use]
    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }

    /// Sets patrol bounds.
    #[must_use]
    pub fn with_patrol(mut self, left_bound: f32, right_bound: f32) -> Self {
        self.left_bound = left_bound;
        self.right_bound = right_bound;
        self
    }
}

/// Mutable kinematic state integrated by the physics system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsBody {
    /// Locomotion model.
    pub physics_type: PhysicsType,
    /// Anchor for flight oscillation.
    pub base_position: Vec2,
    /// Centre of the collision circle.
    pub position: Vec2,
    /// Velocity in world units per second.
    pub velocity: Vec2,
    /// Collision radius.
    pub radius: f32,
    /// Remaining health; zero or below means dead.
    pub health: i32,
}

impl PhysicsBody {
    /// Reports whether the body still has health.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// Immutable representation of a single entity used for queries.
#[derive(Clone, Debug, PartialEq)]
pub struct EntitySnapshot {
    /// Slot of the entity.
    pub id: EntityId,
    /// Role of the entity.
    pub kind: EntityKind,
    /// Asset providing animations.
    pub asset: AssetId,
    /// Kinematic state.
    pub body: PhysicsBody,
    /// Facing.
    pub facing: Facing,
    /// Health at spawn.
    pub max_health: i32,
    /// Horizontal movement speed.
    pub speed: f32,
    /// Seconds between attacks.
    pub shoot_cooldown: f32,
    /// Seconds accumulated since the last attack.
    pub shoot_timer: f32,
    /// Left patrol bound.
    pub left_bound: f32,
    /// Right patrol bound.
    pub right_bound: f32,
    /// Physics-derived locomotion state.
    pub state: LocomotionState,
    /// Presentation overlay, if any.
    pub overlay: Option<PresentationOverlay>,
}

impl EntitySnapshot {
    /// Reports whether the entity still has health.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.body.is_alive()
    }

    /// Reports whether the attack cooldown has elapsed.
    #[must_use]
    pub fn attack_ready(&self) -> bool {
        self.shoot_cooldown > 0.0 && self.shoot_timer >= self.shoot_cooldown
    }
}

/// Read-only snapshot describing every entity slot in the level.
#[derive(Clone, Debug, Default)]
pub struct EntityView {
    snapshots: Vec<EntitySnapshot>,
}

impl EntityView {
    /// Creates a new entity view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EntitySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over all slots, dead ones included, in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots.iter()
    }

    /// Snapshot for the provided slot.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&EntitySnapshot> {
        self.snapshots
            .binary_search_by_key(&id, |snapshot| snapshot.id)
            .ok()
            .map(|index| &self.snapshots[index])
    }

    /// The player slot, if one was spawned.
    #[must_use]
    pub fn player(&self) -> Option<&EntitySnapshot> {
        self.first_of(EntityKind::Player)
    }

    /// The boss slot, if one was spawned.
    #[must_use]
    pub fn boss(&self) -> Option<&EntitySnapshot> {
        self.first_of(EntityKind::Boss)
    }

    /// Ordinary enemies in slot order, dead ones included.
    pub fn enemies(&self) -> impl Iterator<Item = &EntitySnapshot> {
        self.snapshots
            .iter()
            .filter(|snapshot| snapshot.kind == EntityKind::Enemy)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EntitySnapshot> {
        self.snapshots
    }

    fn first_of(&self, kind: EntityKind) -> Option<&EntitySnapshot> {
        self.snapshots.iter().find(|snapshot| snapshot.kind == kind)
    }
}

/// Immutable representation of an active bullet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Pool slot occupied by the bullet.
    pub slot: usize,
    /// Current position.
    pub position: Vec2,
    /// Current velocity.
    pub velocity: Vec2,
    /// Whether the player fired the bullet.
    pub from_player: bool,
}

/// Position and health of one entity captured at a checkpoint.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Slot of the entity.
    pub id: EntityId,
    /// Position at capture time.
    pub position: Vec2,
    /// Health at capture time.
    pub health: i32,
}

/// Reduced-fidelity save state: positions, health and checkpoint progress.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSnapshot {
    /// Index of the last activated checkpoint, if any.
    pub last_checkpoint: Option<u32>,
    /// Records for every entity slot.
    pub entities: Vec<EntityRecord>,
}

/// Identifier of an animation frame set in the external asset library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameSetId(u32);

impl FrameSetId {
    /// Creates a new frame set identifier.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Animation references of an entity asset, one frame set per locomotion state.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityAsset {
    /// Human-readable asset name.
    pub name: String,
    /// Frames shown while idle.
    pub idle: FrameSetId,
    /// Frames shown while walking.
    pub walk: FrameSetId,
    /// Frames shown while rising.
    pub ascend: FrameSetId,
    /// Frames shown while falling.
    pub fall: FrameSetId,
}

impl EntityAsset {
    /// Frame set matching the provided locomotion state.
    #[must_use]
    pub const fn frames_for(&self, state: LocomotionState) -> FrameSetId {
        match state {
            LocomotionState::Idle => self.idle,
            LocomotionState::Walk => self.walk,
            LocomotionState::Ascend => self.ascend,
            LocomotionState::Fall => self.fall,
        }
    }
}

/// Asset library consulted for animation references.
pub trait AssetLookup {
    /// Returns the asset with the provided identifier, or `None` when unknown.
    fn entity_asset(&self, id: AssetId) -> Option<&EntityAsset>;
}

/// Resolves the frame set an entity should currently display.
///
/// Unknown assets resolve to `None` rather than failing.
#[must_use]
pub fn frames_for_entity<L: AssetLookup + ?Sized>(
    lookup: &L,
    snapshot: &EntitySnapshot,
) -> Option<FrameSetId> {
    lookup
        .entity_asset(snapshot.asset)
        .map(|asset| asset.frames_for(snapshot.state))
}
