//! Variable timestep simulation tick
//!
//! Per agent, in index order: neighbors, steering, margin impulse, speed
//! limit, integration. Output depends on the elapsed-time sequence, not just
//! on the tick count.

use glam::Vec2;

use super::boundary::{InnerRect, margin_impulse};
use super::config::{SimulationConfig, UpdateMode};
use super::neighbors::collect_neighbors;
use super::speed::limit_speed;
use super::state::{Boid, Simulation};
use super::steering::steer;
use crate::consts::REFERENCE_TICK_RATE;

/// Advance `pos` by `vel` over `elapsed_seconds`, in reference-frame units.
///
/// The result saturates at the largest finite `f32` instead of overflowing.
#[inline]
pub fn integrate(pos: Vec2, vel: Vec2, elapsed_seconds: f32) -> Vec2 {
    let next = pos + vel * elapsed_seconds * REFERENCE_TICK_RATE;
    next.clamp(Vec2::splat(f32::MIN), Vec2::splat(f32::MAX))
}

/// Advance the flock by one step of `elapsed_seconds`
pub fn tick(sim: &mut Simulation, elapsed_seconds: f32) {
    let dt = if elapsed_seconds.is_finite() && elapsed_seconds >= 0.0 {
        elapsed_seconds
    } else {
        log::warn!("Ignoring invalid elapsed time {elapsed_seconds}, ticking with 0");
        0.0
    };

    sim.time_ticks += 1;
    sim.elapsed_seconds += f64::from(dt);

    if sim.store.is_empty() {
        return;
    }

    let inner = sim.config.inner_rect();

    match sim.config.update_mode {
        UpdateMode::Sequential => {
            // Agent i reads the live store, including agents j < i already moved this tick
            for i in 0..sim.store.len() {
                let next = advance(
                    i,
                    sim.store.as_slice(),
                    &mut sim.neighbors,
                    &sim.config,
                    &inner,
                    dt,
                );
                sim.store.as_mut_slice()[i] = next;
            }
        }
        UpdateMode::Simultaneous => {
            sim.frozen.clear();
            sim.frozen.extend_from_slice(sim.store.as_slice());

            for i in 0..sim.frozen.len() {
                let next = advance(i, &sim.frozen, &mut sim.neighbors, &sim.config, &inner, dt);
                sim.store.as_mut_slice()[i] = next;
            }
        }
    }

    log::trace!(
        "Tick {}: dt={:.5}s, {} boids",
        sim.time_ticks,
        dt,
        sim.store.len()
    );
}

/// Next state of agent `index` as seen from `view`
fn advance(
    index: usize,
    view: &[Boid],
    neighbors: &mut Vec<usize>,
    config: &SimulationConfig,
    inner: &InnerRect,
    dt: f32,
) -> Boid {
    let current = view[index];

    collect_neighbors(view, index, config.vision_radius, neighbors);
    let mut vel = steer(index, view, neighbors, config);
    vel += margin_impulse(current.pos, inner, config.margin_turn_factor);
    // Previous heading stands in if the deltas cancel out exactly
    let vel = limit_speed(
        vel,
        config.speed_limit_min,
        config.speed_limit_max,
        current.vel,
    );

    Boid::new(integrate(current.pos, vel, dt), vel)
}
