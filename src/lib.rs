//! Boids - a deterministic 2D flocking simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (neighbors, steering, margins, speed, integration)
//!
//! Windowing, input and rendering live outside this crate. They drive the
//! simulation through [`sim::Simulation::tick`] and [`sim::Simulation::randomize`]
//! and read it back through [`sim::Simulation::snapshot`].

pub mod sim;

pub use sim::{Boid, ConfigError, Simulation, SimulationConfig, UpdateMode, tick};

/// Simulation configuration constants
pub mod consts {
    /// Updates per second the steering factors were tuned for.
    /// Integration scales `velocity * elapsed` by this so one reference frame moves one velocity unit.
    pub const REFERENCE_TICK_RATE: f32 = 60.0;
    /// Elapsed time of one reference frame
    pub const REFERENCE_DT: f32 = 1.0 / REFERENCE_TICK_RATE;

    /// Playfield defaults
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;
    pub const MARGIN_SIZE: f32 = 200.0;
    pub const MARGIN_TURN_FACTOR: f32 = 1.0;

    /// Flock defaults
    pub const BOID_COUNT: usize = 40;
    pub const VISION_RADIUS: f32 = 75.0;
    pub const AVOID_DISTANCE: f32 = 20.0;
    pub const CENTERING_FACTOR: f32 = 0.005;
    pub const AVOID_FACTOR: f32 = 0.05;
    pub const MATCH_FACTOR: f32 = 0.05;

    /// Speed limits (units per reference frame)
    pub const SPEED_LIMIT_MIN: f32 = 1.0;
    pub const SPEED_LIMIT_MAX: f32 = 10.0;
}
