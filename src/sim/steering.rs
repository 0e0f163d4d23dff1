//! The three flocking rules
//!
//! Each rule returns a velocity delta. [`steer`] applies them in a fixed order
//! (cohesion, separation, alignment) and each delta lands on the agent's
//! velocity before the next rule reads it.
//!
//! Cohesion and alignment look at the vision-radius neighbor set. Separation
//! rescans the whole flock with its own, tighter radius: "who do I flock with"
//! and "who am I about to hit" are separate questions.

use glam::Vec2;

use super::config::SimulationConfig;
use super::state::Boid;

/// Pull toward the mean position of the visible neighbors
pub fn cohesion(me: &Boid, flock: &[Boid], neighbors: &[usize], centering_factor: f32) -> Vec2 {
    if neighbors.is_empty() {
        return Vec2::ZERO;
    }

    let sum: Vec2 = neighbors.iter().map(|&j| flock[j].pos).sum();
    let center = sum / neighbors.len() as f32;

    (center - me.pos) * centering_factor
}

/// Push away from every other agent closer than `avoid_distance`.
///
/// Offsets are summed unweighted: inside the radius a closer agent pushes
/// less than a farther one. `index` identifies `me` within `flock`.
pub fn separation(
    index: usize,
    me: &Boid,
    flock: &[Boid],
    avoid_distance: f32,
    avoid_factor: f32,
) -> Vec2 {
    let mut away = Vec2::ZERO;

    for (j, other) in flock.iter().enumerate() {
        if j != index && me.pos.distance(other.pos) < avoid_distance {
            away += me.pos - other.pos;
        }
    }

    away * avoid_factor
}

/// Nudge toward the mean velocity of the visible neighbors
pub fn alignment(me: &Boid, flock: &[Boid], neighbors: &[usize], match_factor: f32) -> Vec2 {
    if neighbors.is_empty() {
        return Vec2::ZERO;
    }

    let sum: Vec2 = neighbors.iter().map(|&j| flock[j].vel).sum();
    let average = sum / neighbors.len() as f32;

    (average - me.vel) * match_factor
}

/// Velocity of agent `index` after all three rules.
///
/// `flock` is whatever view the caller's update mode reads from; `neighbors`
/// must be the vision-radius set for `index` within that same view.
pub fn steer(index: usize, flock: &[Boid], neighbors: &[usize], config: &SimulationConfig) -> Vec2 {
    let mut me = flock[index];

    me.vel += cohesion(&me, flock, neighbors, config.centering_factor);
    me.vel += separation(
        index,
        &me,
        flock,
        config.avoid_distance,
        config.avoid_factor,
    );
    me.vel += alignment(&me, flock, neighbors, config.match_factor);

    me.vel
}
