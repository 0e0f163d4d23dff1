//! Deterministic simulation module
//!
//! All flocking logic lives here. This module must be pure and deterministic:
//! - Elapsed time supplied by the caller only
//! - Seeded RNG only
//! - Stable iteration order (by agent index)
//! - No rendering or platform dependencies

pub mod boundary;
pub mod config;
pub mod error;
pub mod neighbors;
pub mod speed;
pub mod state;
pub mod steering;
pub mod tick;

pub use boundary::{InnerRect, margin_impulse};
pub use config::{SimulationConfig, UpdateMode};
pub use error::{ConfigError, ConfigResult};
pub use neighbors::{collect_neighbors, neighbors_within};
pub use speed::limit_speed;
pub use state::{Boid, BoidStore, FlockSummary, Simulation};
pub use steering::{alignment, cohesion, separation, steer};
pub use tick::{integrate, tick};
