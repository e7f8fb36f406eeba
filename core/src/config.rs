//! Tunable simulation parameters.
//!
//! Every section falls back to its defaults when omitted, so an empty TOML
//! document yields [`SimulationConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Aggregated tuning knobs for one simulation instance.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Level geometry and storage capacities.
    pub world: WorldConfig,
    /// Integration and locomotion constants.
    pub physics: PhysicsConfig,
    /// Enemy and boss decision thresholds.
    pub ai: AiConfig,
    /// Bullet kinematics.
    pub projectiles: ProjectileConfig,
    /// Timings for presentation overlays.
    pub presentation: PresentationConfig,
}

impl SimulationConfig {
    /// Checks the configuration for values the simulation cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.world.tile_length > 0.0) {
            return Err(ConfigError::NonPositiveTileLength(self.world.tile_length));
        }
        if self.world.bullet_capacity == 0 {
            return Err(ConfigError::EmptyBulletPool);
        }
        if self.ai.stop_distance < 0.0 || self.ai.stop_distance > self.ai.seek_distance {
            return Err(ConfigError::InvertedAiThresholds {
                stop: self.ai.stop_distance,
                seek: self.ai.seek_distance,
            });
        }
        if !(self.projectiles.speed >= 0.0) {
            return Err(ConfigError::NegativeBulletSpeed(self.projectiles.speed));
        }
        if self.ai.melee_damage <= 0 {
            return Err(ConfigError::NonPositiveMeleeDamage(self.ai.melee_damage));
        }
        Ok(())
    }
}

/// Reasons a configuration is rejected at load time.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Tiles must have a positive edge length.
    #[error("tile length must be positive, got {0}")]
    NonPositiveTileLength(f32),
    /// At least one bullet slot is required.
    #[error("bullet pool capacity must be at least one")]
    EmptyBulletPool,
    /// The stop distance must not exceed the seek distance.
    #[error("ai stop distance {stop} must lie within [0, seek distance {seek}]")]
    InvertedAiThresholds {
        /// Configured stop distance.
        stop: f32,
        /// Configured seek distance.
        seek: f32,
    },
    /// Bullets cannot travel at a negative speed.
    #[error("bullet speed must not be negative, got {0}")]
    NegativeBulletSpeed(f32),
    /// A melee strike must remove health.
    #[error("melee damage must be positive, got {0}")]
    NonPositiveMeleeDamage(i32),
}

/// Level geometry and storage capacities.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Edge length of one square tile in world units.
    pub tile_length: f32,
    /// Maximum number of ordinary enemies a level may hold.
    pub enemy_capacity: usize,
    /// Number of bullet slots in the pool.
    pub bullet_capacity: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            tile_length: 32.0,
            enemy_capacity: 64,
            bullet_capacity: 128,
        }
    }
}

/// Integration and locomotion constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration applied to ground-type entities.
    pub gravity: f32,
    /// Horizontal speed above which an entity counts as walking.
    pub walk_threshold: f32,
    /// Vertical speed below which a ground-type entity counts as grounded.
    pub ground_epsilon: f32,
    /// Upward speed granted by a jump.
    pub jump_speed: f32,
    /// Peak vertical offset of the flight sinusoid.
    pub flight_amplitude: f32,
    /// Angular frequency of the flight sinusoid in radians per second.
    pub flight_frequency: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            walk_threshold: 0.1,
            ground_epsilon: 0.01,
            jump_speed: 420.0,
            flight_amplitude: 24.0,
            flight_frequency: 2.0,
        }
    }
}

/// Enemy and boss decision thresholds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Horizontal distance at which enemies stop approaching.
    pub stop_distance: f32,
    /// Horizontal distance within which enemies seek the player.
    pub seek_distance: f32,
    /// Horizontal speed below which a patrolling enemy counts as stalled.
    pub stall_speed: f32,
    /// Gap beyond touching at which the boss can land a melee strike.
    pub melee_reach: f32,
    /// Health removed by one melee strike.
    pub melee_damage: i32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            stop_distance: 24.0,
            seek_distance: 192.0,
            stall_speed: 1.0,
            melee_reach: 8.0,
            melee_damage: 1,
        }
    }
}

/// Bullet kinematics.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Speed of every spawned bullet.
    pub speed: f32,
    /// Collision radius of a bullet.
    pub radius: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            speed: 500.0,
            radius: 4.0,
        }
    }
}

/// Timings for presentation overlays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    /// Seconds the shoot overlay stays up after firing.
    pub shoot_pose: f32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self { shoot_pose: 0.2 }
    }
}
