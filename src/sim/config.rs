//! Simulation configuration
//!
//! Owned by a single [`Simulation`](super::Simulation) and only replaced
//! wholesale through `reconfigure`, which also resets the flock.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boundary::InnerRect;
use super::error::{ConfigError, ConfigResult};
use crate::consts::*;

/// How agents within one tick observe each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Agents update in index order against the live store, so agent `i`
    /// sees the already-updated state of every agent `j < i`.
    #[default]
    Sequential,
    /// Agents read a frozen start-of-tick copy; results are committed together.
    Simultaneous,
}

impl UpdateMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateMode::Sequential => "sequential",
            UpdateMode::Simultaneous => "simultaneous",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sequential" | "seq" => Some(UpdateMode::Sequential),
            "simultaneous" | "sim" | "double-buffered" => Some(UpdateMode::Simultaneous),
            _ => None,
        }
    }
}

/// Scalar tunables for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents
    pub count: usize,
    /// Cohesion/alignment neighbor radius
    pub vision_radius: f32,
    /// Separation radius (tighter than vision)
    pub avoid_distance: f32,
    pub centering_factor: f32,
    pub avoid_factor: f32,
    pub match_factor: f32,
    /// Inset of the inner rectangle from each playfield edge
    pub margin_size: f32,
    /// Constant velocity impulse applied per axis outside the inner rectangle
    pub margin_turn_factor: f32,
    pub speed_limit_min: f32,
    pub speed_limit_max: f32,
    pub width: f32,
    pub height: f32,
    pub update_mode: UpdateMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            count: BOID_COUNT,
            vision_radius: VISION_RADIUS,
            avoid_distance: AVOID_DISTANCE,
            centering_factor: CENTERING_FACTOR,
            avoid_factor: AVOID_FACTOR,
            match_factor: MATCH_FACTOR,
            margin_size: MARGIN_SIZE,
            margin_turn_factor: MARGIN_TURN_FACTOR,
            speed_limit_min: SPEED_LIMIT_MIN,
            speed_limit_max: SPEED_LIMIT_MAX,
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
            update_mode: UpdateMode::Sequential,
        }
    }
}

impl SimulationConfig {
    /// Check every invariant a running simulation relies on
    pub fn validate(&self) -> ConfigResult<()> {
        let scalars = [
            ("vision_radius", self.vision_radius),
            ("avoid_distance", self.avoid_distance),
            ("centering_factor", self.centering_factor),
            ("avoid_factor", self.avoid_factor),
            ("match_factor", self.match_factor),
            ("margin_size", self.margin_size),
            ("margin_turn_factor", self.margin_turn_factor),
            ("speed_limit_min", self.speed_limit_min),
            ("speed_limit_max", self.speed_limit_max),
            ("width", self.width),
            ("height", self.height),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::invalid(field, format!("{value} is not finite")));
            }
        }

        let non_negative = [
            ("vision_radius", self.vision_radius),
            ("avoid_distance", self.avoid_distance),
            ("margin_size", self.margin_size),
            ("speed_limit_min", self.speed_limit_min),
            ("speed_limit_max", self.speed_limit_max),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::invalid(field, format!("{value} is negative")));
            }
        }

        if self.speed_limit_min > self.speed_limit_max {
            return Err(ConfigError::invalid(
                "speed_limit_min",
                format!(
                    "{} exceeds speed_limit_max {}",
                    self.speed_limit_min, self.speed_limit_max
                ),
            ));
        }

        for (field, extent) in [("width", self.width), ("height", self.height)] {
            if extent <= 0.0 {
                return Err(ConfigError::invalid(field, format!("{extent} must be positive")));
            }
            if self.margin_size >= extent / 2.0 {
                return Err(ConfigError::invalid(
                    "margin_size",
                    format!(
                        "{} must be less than half the playfield {field} ({extent})",
                        self.margin_size
                    ),
                ));
            }
        }

        Ok(())
    }

    /// Parse a JSON document (missing fields take defaults) and validate it
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Playfield extent
    #[inline]
    pub fn playfield(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Playfield inset by the margin on every side
    pub fn inner_rect(&self) -> InnerRect {
        InnerRect::inset(self.playfield(), self.margin_size)
    }
}
