#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Enemy and boss decision making.
//!
//! The system reads the previous tick's entity view and emits steering and
//! attack commands. It never touches vertical motion; flying entities keep
//! their scripted sinusoid and ground entities keep gravity.

use tilerun_core::{
    AiConfig, BossPhase, Command, EntityKind, EntitySnapshot, EntityView, Facing, PhysicsClass,
    PhysicsType, TileFieldView, Vec2,
};
use tracing::{debug, trace};

/// Horizontal intent produced by a strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Steering {
    /// Desired horizontal velocity in world units per second.
    pub velocity_x: f32,
    /// Facing to adopt.
    pub facing: Facing,
}

/// Locomotion-specific steering behaviour.
pub trait AiStrategy {
    /// Computes the horizontal intent of `agent` given the player's position.
    ///
    /// `player` is `None` when no living player exists; agents then patrol.
    fn compute_velocity(
        &self,
        agent: &EntitySnapshot,
        player: Option<Vec2>,
        tiles: TileFieldView<'_>,
    ) -> Steering;
}

/// Shared stop/seek decision.
///
/// Returns `None` when the player is beyond seek distance and the agent
/// should patrol instead.
fn pursue(config: &AiConfig, agent: &EntitySnapshot, player: Option<Vec2>) -> Option<Steering> {
    let dx = player?.x - agent.body.position.x;
    if dx.abs() < config.stop_distance {
        return Some(Steering {
            velocity_x: 0.0,
            facing: Facing::toward(dx),
        });
    }
    if dx.abs() < config.seek_distance {
        let facing = Facing::toward(dx);
        return Some(Steering {
            velocity_x: agent.speed * facing.sign(),
            facing,
        });
    }
    None
}

/// Strategy for ground-type agents: seek, stop, or patrol along ledges.
#[derive(Clone, Debug, Default)]
pub struct GroundAi {
    config: AiConfig,
}

impl GroundAi {
    /// Creates the strategy with the provided thresholds.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }

    /// Whether a patrolling agent should reverse this tick.
    ///
    /// Ledge ahead, stalled motion and reaching the patrol bound it faces are
    /// combined, so several triggers still yield a single reversal.
    fn should_turn(&self, agent: &EntitySnapshot, tiles: TileFieldView<'_>) -> bool {
        let body = &agent.body;
        let probe = Vec2::new(
            body.position.x + agent.facing.sign() * body.radius,
            body.position.y + 1.5 * body.radius,
        );
        let ledge = tiles.physics_class_at(probe) != PhysicsClass::Ground;
        let stalled = body.velocity.x.abs() < self.config.stall_speed;
        let bounded = agent.right_bound > agent.left_bound
            && match agent.facing {
                Facing::Left => body.position.x <= agent.left_bound,
                Facing::Right => body.position.x >= agent.right_bound,
            };
        ledge || stalled || bounded
    }
}

impl AiStrategy for GroundAi {
    fn compute_velocity(
        &self,
        agent: &EntitySnapshot,
        player: Option<Vec2>,
        tiles: TileFieldView<'_>,
    ) -> Steering {
        if let Some(steering) = pursue(&self.config, agent, player) {
            return steering;
        }
        let facing = if self.should_turn(agent, tiles) {
            agent.facing.flipped()
        } else {
            agent.facing
        };
        Steering {
            velocity_x: agent.speed * facing.sign(),
            facing,
        }
    }
}

/// Strategy for flying agents: seek, stop, or sweep across the level.
#[derive(Clone, Debug, Default)]
pub struct FlyingAi {
    config: AiConfig,
}

impl FlyingAi {
    /// Creates the strategy with the provided thresholds.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self { config }
    }
}

impl AiStrategy for FlyingAi {
    fn compute_velocity(
        &self,
        agent: &EntitySnapshot,
        player: Option<Vec2>,
        tiles: TileFieldView<'_>,
    ) -> Steering {
        if let Some(steering) = pursue(&self.config, agent, player) {
            return steering;
        }
        let x = agent.body.position.x;
        let facing = if x < 0.0 {
            Facing::Right
        } else if x > tiles.pixel_width() {
            Facing::Left
        } else {
            agent.facing
        };
        Steering {
            velocity_x: agent.speed * facing.sign(),
            facing,
        }
    }
}

/// Pure system that steers enemies and directs the boss.
#[derive(Clone, Debug, Default)]
pub struct EnemyAi {
    config: AiConfig,
    ground: GroundAi,
    flying: FlyingAi,
}

impl EnemyAi {
    /// Creates the system with the provided thresholds.
    #[must_use]
    pub fn new(config: AiConfig) -> Self {
        Self {
            ground: GroundAi::new(config.clone()),
            flying: FlyingAi::new(config.clone()),
            config,
        }
    }

    /// Emits steering and attack commands for every living non-player entity.
    ///
    /// `boss_phase` is the phase the world currently applies; a boss whose
    /// health selects a different phase gets an `EnterBossPhase` command
    /// ahead of its steering.
    pub fn handle(
        &self,
        entities: &EntityView,
        boss_phase: Option<BossPhase>,
        tiles: TileFieldView<'_>,
        out: &mut Vec<Command>,
    ) {
        let player = entities.player().filter(|player| player.is_alive());
        let player_position = player.map(|player| player.body.position);

        for agent in entities.iter().filter(|entity| entity.is_alive()) {
            match agent.kind {
                EntityKind::Player => {}
                EntityKind::Enemy => self.enemy(agent, player, tiles, out),
                EntityKind::Boss => self.boss(agent, player, boss_phase, tiles, out),
            }
        }
        trace!(commands = out.len(), player = ?player_position, "enemy ai evaluated");
    }

    fn strategy(&self, physics_type: PhysicsType) -> Option<&dyn AiStrategy> {
        match physics_type {
            PhysicsType::Ground => Some(&self.ground),
            PhysicsType::Flying => Some(&self.flying),
            PhysicsType::None => None,
        }
    }

    fn steer(
        &self,
        agent: &EntitySnapshot,
        physics_type: PhysicsType,
        player: Option<&EntitySnapshot>,
        tiles: TileFieldView<'_>,
        out: &mut Vec<Command>,
    ) {
        let Some(strategy) = self.strategy(physics_type) else {
            return;
        };
        let steering =
            strategy.compute_velocity(agent, player.map(|player| player.body.position), tiles);
        out.push(Command::Steer {
            entity: agent.id,
            velocity_x: steering.velocity_x,
            facing: steering.facing,
        });
    }

    fn enemy(
        &self,
        agent: &EntitySnapshot,
        player: Option<&EntitySnapshot>,
        tiles: TileFieldView<'_>,
        out: &mut Vec<Command>,
    ) {
        self.steer(agent, agent.body.physics_type, player, tiles, out);

        let Some(player) = player else {
            return;
        };
        let in_range = agent.body.position.distance(player.body.position) < self.config.seek_distance;
        if agent.attack_ready() && in_range {
            out.push(Command::FireBullet {
                shooter: agent.id,
                target: player.body.position,
            });
        }
    }

    fn boss(
        &self,
        boss: &EntitySnapshot,
        player: Option<&EntitySnapshot>,
        current: Option<BossPhase>,
        tiles: TileFieldView<'_>,
        out: &mut Vec<Command>,
    ) {
        let phase = BossPhase::for_health(boss.body.health, boss.max_health);
        if current != Some(phase) {
            debug!(?phase, health = boss.body.health, "boss crossed phase threshold");
            out.push(Command::EnterBossPhase { phase });
        }
        self.steer(boss, phase.physics_type(), player, tiles, out);

        let Some(player) = player else {
            return;
        };
        if !boss.attack_ready() {
            return;
        }
        let target = player.body.position;
        match phase {
            BossPhase::Melee => {
                let reach = boss.body.radius + player.body.radius + self.config.melee_reach;
                if boss.body.position.distance_squared(target) <= reach * reach {
                    out.push(Command::MeleeStrike {
                        attacker: boss.id,
                        target: player.id,
                    });
                }
            }
            BossPhase::RangedSingle => out.push(Command::FireBullet {
                shooter: boss.id,
                target,
            }),
            BossPhase::RangedFan => out.push(Command::FireFan {
                shooter: boss.id,
                target,
            }),
        }
    }
}
