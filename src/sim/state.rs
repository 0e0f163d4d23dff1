//! Flock state and core simulation types
//!
//! Everything a tick reads or writes lives in [`Simulation`]. Collaborators
//! only ever see copies handed out by [`Simulation::snapshot`].

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::SimulationConfig;
use super::error::{ConfigError, ConfigResult};

/// A single agent. Identity is its index in the store.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Boid {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Boid {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    /// Current speed
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Fixed-length, index-ordered agent storage.
///
/// The length is set on construction and only changes through a full rebuild.
#[derive(Debug, Clone, Default)]
pub struct BoidStore {
    boids: Vec<Boid>,
}

impl BoidStore {
    /// `count` agents at rest at the origin, waiting for [`BoidStore::randomize`]
    pub fn with_len(count: usize) -> Self {
        Self {
            boids: vec![Boid::default(); count],
        }
    }

    pub fn from_boids(boids: Vec<Boid>) -> Self {
        Self { boids }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.boids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Boid] {
        &self.boids
    }

    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    /// Reinitialize every agent.
    ///
    /// Positions are uniform over the inner rectangle, headings uniform over
    /// the circle, speeds uniform over `[speed_limit_min, speed_limit_max]`.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, config: &SimulationConfig) {
        let inner = config.inner_rect();
        let extent = inner.size();
        let speed_span = config.speed_limit_max - config.speed_limit_min;

        for boid in &mut self.boids {
            let pos = inner.min + Vec2::new(rng.random::<f32>(), rng.random::<f32>()) * extent;

            let heading = Vec2::from_angle(rng.random::<f32>() * TAU);
            let speed = config.speed_limit_min + rng.random::<f32>() * speed_span;

            *boid = Boid::new(pos, heading * speed);
        }
    }

    /// Owned copy of the current state, index order preserved
    pub fn snapshot(&self) -> Vec<Boid> {
        self.boids.clone()
    }
}

/// Aggregate view of the flock, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FlockSummary {
    pub count: usize,
    pub centroid: Vec2,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl FlockSummary {
    pub fn from_boids(boids: &[Boid]) -> Self {
        if boids.is_empty() {
            return Self::default();
        }

        let n = boids.len() as f32;
        let centroid = boids.iter().map(|b| b.pos).sum::<Vec2>() / n;
        let (total, min, max) = boids.iter().map(Boid::speed).fold(
            (0.0f32, f32::INFINITY, f32::NEG_INFINITY),
            |(total, min, max), s| (total + s, min.min(s), max.max(s)),
        );

        Self {
            count: boids.len(),
            centroid,
            mean_speed: total / n,
            min_speed: min,
            max_speed: max,
        }
    }
}

/// A running flock: config, agents, and the seeded RNG that populates them
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Run seed for reproducibility
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) config: SimulationConfig,
    pub(crate) store: BoidStore,
    /// Start-of-tick copy for simultaneous updates
    pub(crate) frozen: Vec<Boid>,
    /// Reused neighbor index buffer
    pub(crate) neighbors: Vec<usize>,
    pub(crate) time_ticks: u64,
    pub(crate) elapsed_seconds: f64,
}

impl Simulation {
    /// Validate `config`, build a store of `config.count` agents and randomize it
    pub fn new(config: SimulationConfig, seed: u64) -> ConfigResult<Self> {
        config.validate()?;

        let store = BoidStore::with_len(config.count);
        let mut sim = Self::assemble(config, seed, store);
        sim.randomize();

        log::info!(
            "Simulation created: {} boids, seed {}, {} update",
            sim.len(),
            seed,
            sim.config.update_mode.as_str()
        );
        Ok(sim)
    }

    /// Build from explicit initial agents instead of randomizing.
    ///
    /// The RNG is still seeded, so later [`Simulation::randomize`] calls are reproducible.
    pub fn with_boids(config: SimulationConfig, seed: u64, boids: Vec<Boid>) -> ConfigResult<Self> {
        config.validate()?;
        if boids.len() != config.count {
            return Err(ConfigError::CountMismatch {
                expected: config.count,
                got: boids.len(),
            });
        }
        if let Some(i) = boids.iter().position(|b| !b.pos.is_finite() || !b.vel.is_finite()) {
            return Err(ConfigError::invalid(
                "boids",
                format!("agent {i} has a non-finite position or velocity"),
            ));
        }

        Ok(Self::assemble(config, seed, BoidStore::from_boids(boids)))
    }

    fn assemble(config: SimulationConfig, seed: u64, store: BoidStore) -> Self {
        let count = store.len();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            store,
            frozen: Vec::with_capacity(count),
            neighbors: Vec::with_capacity(count),
            time_ticks: 0,
            elapsed_seconds: 0.0,
        }
    }

    /// Reinitialize every agent from the RNG. Count is unchanged.
    pub fn randomize(&mut self) {
        if self.store.is_empty() {
            return;
        }
        self.store.randomize(&mut self.rng, &self.config);
        log::debug!("Randomized {} boids", self.store.len());
    }

    /// Replace the config wholesale, rebuild the store at the new count and randomize.
    ///
    /// On error the simulation is left untouched.
    pub fn reconfigure(&mut self, config: SimulationConfig) -> ConfigResult<()> {
        config.validate()?;

        log::info!(
            "Reconfigured: {} -> {} boids, {} update",
            self.store.len(),
            config.count,
            config.update_mode.as_str()
        );
        self.store = BoidStore::with_len(config.count);
        self.config = config;
        self.frozen.clear();
        self.neighbors.clear();
        self.randomize();
        Ok(())
    }

    /// Advance one step by `elapsed_seconds` of real time
    pub fn tick(&mut self, elapsed_seconds: f32) {
        super::tick::tick(self, elapsed_seconds);
    }

    /// Owned copy of all agents in index order
    pub fn snapshot(&self) -> Vec<Boid> {
        self.store.snapshot()
    }

    /// Borrowed view of all agents in index order
    pub fn boids(&self) -> &[Boid] {
        self.store.as_slice()
    }

    pub fn summary(&self) -> FlockSummary {
        FlockSummary::from_boids(self.store.as_slice())
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Ticks processed since construction
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    /// Sum of all elapsed times accepted by `tick`
    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_randomizes_inside_inner_rect() {
        let config = SimulationConfig::default();
        let sim = Simulation::new(config.clone(), 12345).unwrap();
        let inner = config.inner_rect();

        assert_eq!(sim.len(), config.count);
        for boid in sim.boids() {
            assert!(inner.contains(boid.pos), "{:?} outside {:?}", boid.pos, inner);
            let speed = boid.speed();
            assert!(speed >= config.speed_limit_min - 1e-4);
            assert!(speed <= config.speed_limit_max + 1e-4);
        }
    }

    #[test]
    fn test_same_seed_same_population() {
        let a = Simulation::new(SimulationConfig::default(), 7).unwrap();
        let b = Simulation::new(SimulationConfig::default(), 7).unwrap();
        let c = Simulation::new(SimulationConfig::default(), 8).unwrap();

        assert_eq!(a.snapshot(), b.snapshot());
        assert_ne!(a.snapshot(), c.snapshot());
        assert_eq!(a.seed(), 7);
    }

    #[test]
    fn test_randomize_keeps_count_and_advances_rng() {
        let mut sim = Simulation::new(SimulationConfig::default(), 99).unwrap();
        let before = sim.snapshot();

        sim.randomize();
        let after = sim.snapshot();

        assert_eq!(before.len(), after.len());
        assert_ne!(before, after);
    }

    #[test]
    fn test_zero_population() {
        let config = SimulationConfig {
            count: 0,
            ..Default::default()
        };
        let mut sim = Simulation::new(config, 1).unwrap();
        sim.randomize();

        assert!(sim.is_empty());
        assert!(sim.snapshot().is_empty());
        assert_eq!(sim.summary(), FlockSummary::default());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = SimulationConfig {
            speed_limit_min: 11.0,
            ..Default::default()
        };
        assert!(Simulation::new(config, 1).is_err());
    }

    #[test]
    fn test_with_boids_checks_count() {
        let config = SimulationConfig {
            count: 2,
            ..Default::default()
        };
        let result = Simulation::with_boids(config, 1, vec![Boid::default()]);
        assert!(matches!(
            result,
            Err(ConfigError::CountMismatch {
                expected: 2,
                got: 1
            })
        ));
    }

    #[test]
    fn test_with_boids_rejects_non_finite() {
        let config = SimulationConfig {
            count: 1,
            ..Default::default()
        };
        let boid = Boid::new(Vec2::new(f32::NAN, 0.0), Vec2::X);
        assert!(Simulation::with_boids(config, 1, vec![boid]).is_err());
    }

    #[test]
    fn test_reconfigure_rebuilds_store() {
        let mut sim = Simulation::new(SimulationConfig::default(), 3).unwrap();

        let config = SimulationConfig {
            count: 5,
            width: 400.0,
            height: 300.0,
            margin_size: 50.0,
            ..Default::default()
        };
        sim.reconfigure(config.clone()).unwrap();

        assert_eq!(sim.len(), 5);
        assert_eq!(sim.config(), &config);
        for boid in sim.boids() {
            assert!(config.inner_rect().contains(boid.pos));
        }
    }

    #[test]
    fn test_failed_reconfigure_leaves_state() {
        let mut sim = Simulation::new(SimulationConfig::default(), 3).unwrap();
        let before = sim.snapshot();

        let bad = SimulationConfig {
            avoid_distance: -1.0,
            ..Default::default()
        };
        assert!(sim.reconfigure(bad).is_err());
        assert_eq!(sim.snapshot(), before);
        assert_eq!(sim.config(), &SimulationConfig::default());
    }

    #[test]
    fn test_summary() {
        let boids = [
            Boid::new(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)),
            Boid::new(Vec2::new(10.0, 20.0), Vec2::new(1.0, 0.0)),
        ];
        let summary = FlockSummary::from_boids(&boids);

        assert_eq!(summary.count, 2);
        assert_eq!(summary.centroid, Vec2::new(5.0, 10.0));
        assert_eq!(summary.mean_speed, 3.0);
        assert_eq!(summary.min_speed, 1.0);
        assert_eq!(summary.max_speed, 5.0);
    }
}
