#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-entity integration step and locomotion state derivation.

use tilerun_core::{LocomotionState, PhysicsBody, PhysicsConfig, PhysicsType, TileFieldView, Vec2};
use tilerun_system_collision::{self as collision, Contacts};
use tracing::trace;

/// Result of advancing one body by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    /// Locomotion state derived after integration and collision.
    pub state: LocomotionState,
    /// Whether the body counted as grounded.
    pub on_ground: bool,
    /// Tiles touched during collision resolution.
    pub contacts: Contacts,
    /// Whether the body dropped below the bottom of the level.
    pub fell_out: bool,
}

/// Integrates bodies against a tile field using fixed tuning constants.
#[derive(Clone, Debug, Default)]
pub struct EntityPhysics {
    config: PhysicsConfig,
}

impl EntityPhysics {
    /// Creates a physics stepper with the provided constants.
    #[must_use]
    pub fn new(config: PhysicsConfig) -> Self {
        Self { config }
    }

    /// Constants used by the stepper.
    #[must_use]
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Advances `body` by `dt` seconds.
    ///
    /// `elapsed` is the total simulated time and drives flight oscillation.
    /// Malformed bodies (zero radius, NaN velocity) are not rejected; their
    /// values propagate through the arithmetic unchanged.
    pub fn step(
        &self,
        body: &mut PhysicsBody,
        tiles: TileFieldView<'_>,
        elapsed: f32,
        dt: f32,
    ) -> StepOutcome {
        let mut contacts = Contacts::default();
        let on_ground = match body.physics_type {
            PhysicsType::Ground => {
                body.velocity.y += self.config.gravity * dt;
                body.position += body.velocity * dt;
                contacts = collision::resolve(tiles, body);
                self.grounded(body, tiles)
            }
            PhysicsType::Flying => {
                body.position.x += body.velocity.x * dt;
                body.position.y = flight_height(
                    body.base_position.y,
                    self.config.flight_amplitude,
                    self.config.flight_frequency,
                    elapsed,
                );
                false
            }
            PhysicsType::None => false,
        };

        let fell_out = body.position.y - body.radius > tiles.pixel_height();
        if fell_out {
            body.health = 0;
        }

        let state = derive_state(
            body.physics_type,
            body.velocity,
            on_ground,
            self.config.walk_threshold,
        );
        trace!(
            x = body.position.x,
            y = body.position.y,
            ?state,
            on_ground,
            "body stepped"
        );

        StepOutcome {
            state,
            on_ground,
            contacts,
            fell_out,
        }
    }

    /// Reports whether a ground-type body may start a jump.
    #[must_use]
    pub fn can_jump(&self, body: &PhysicsBody, tiles: TileFieldView<'_>) -> bool {
        body.physics_type == PhysicsType::Ground && self.grounded(body, tiles)
    }

    fn grounded(&self, body: &PhysicsBody, tiles: TileFieldView<'_>) -> bool {
        body.velocity.y.abs() < self.config.ground_epsilon
            || collision::check_ground_below(tiles, body.position, body.radius)
    }
}

/// Derives the locomotion state from motion and ground contact.
///
/// Only ground-type bodies ever report `Ascend` or `Fall`.
#[must_use]
pub fn derive_state(
    physics_type: PhysicsType,
    velocity: Vec2,
    on_ground: bool,
    walk_threshold: f32,
) -> LocomotionState {
    if physics_type == PhysicsType::Ground && !on_ground {
        return if velocity.y < 0.0 {
            LocomotionState::Ascend
        } else {
            LocomotionState::Fall
        };
    }

    if velocity.x.abs() > walk_threshold {
        LocomotionState::Walk
    } else {
        LocomotionState::Idle
    }
}

/// Vertical position of a flying body at `elapsed` seconds.
#[must_use]
pub fn flight_height(base_y: f32, amplitude: f32, frequency: f32, elapsed: f32) -> f32 {
    base_y + amplitude * (elapsed * frequency).sin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_still_body_is_idle() {
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::ZERO, true, 0.1),
            LocomotionState::Idle
        );
    }

    #[test]
    fn grounded_moving_body_walks() {
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::new(80.0, 0.0), true, 0.1),
            LocomotionState::Walk
        );
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::new(-0.2, 0.0), true, 0.1),
            LocomotionState::Walk
        );
    }

    #[test]
    fn airborne_body_ascends_or_falls() {
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::new(0.0, -50.0), false, 0.1),
            LocomotionState::Ascend
        );
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::new(80.0, 50.0), false, 0.1),
            LocomotionState::Fall
        );
        assert_eq!(
            derive_state(PhysicsType::Ground, Vec2::ZERO, false, 0.1),
            LocomotionState::Fall
        );
    }

    #[test]
    fn flying_body_never_reports_airborne_states() {
        assert_eq!(
            derive_state(PhysicsType::Flying, Vec2::new(0.0, -50.0), false, 0.1),
            LocomotionState::Idle
        );
        assert_eq!(
            derive_state(PhysicsType::Flying, Vec2::new(30.0, 50.0), false, 0.1),
            LocomotionState::Walk
        );
    }

    #[test]
    fn derivation_is_deterministic() {
        let velocity = Vec2::new(12.5, -3.0);
        let first = derive_state(PhysicsType::Ground, velocity, false, 0.1);
        for _ in 0..16 {
            assert_eq!(derive_state(PhysicsType::Ground, velocity, false, 0.1), first);
        }
    }

    #[test]
    fn flight_height_oscillates_around_base() {
        assert_eq!(flight_height(100.0, 10.0, 2.0, 0.0), 100.0);
        let quarter = std::f32::consts::FRAC_PI_2 / 2.0;
        assert!((flight_height(100.0, 10.0, 2.0, quarter) - 110.0).abs() < 1e-4);
    }
}
