//! Projectile flight under gravity and quadratic air drag, and the damage the
//! landing impact does to a row of obstacles and creatures.

pub mod core;
pub mod error;
pub mod export;
pub mod scenario;

pub use crate::core::ballistics::{
    FlightIntegrator, FlightResult, SimulationParameters, TrajectorySample, simulate,
};
pub use crate::core::damage::{AttackMethod, Damageable, DamageReport, impact_force};
pub use crate::core::physics::PhysicsConstants;
pub use crate::error::{Result, SimError};
