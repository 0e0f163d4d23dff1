//! Brute-force neighbor discovery
//!
//! O(N) per query, O(N²) per tick. Populations are tens to low hundreds.

use super::state::Boid;

/// Indices `j != index` strictly closer than `radius` to agent `index`
pub fn neighbors_within(flock: &[Boid], index: usize, radius: f32) -> Vec<usize> {
    let mut out = Vec::new();
    collect_neighbors(flock, index, radius, &mut out);
    out
}

/// Same as [`neighbors_within`] but refills a caller-owned buffer.
///
/// Output is in ascending index order.
pub fn collect_neighbors(flock: &[Boid], index: usize, radius: f32, out: &mut Vec<usize>) {
    out.clear();
    let Some(me) = flock.get(index) else {
        return;
    };

    out.extend(
        flock
            .iter()
            .enumerate()
            .filter(|&(j, other)| j != index && other.pos.distance(me.pos) < radius)
            .map(|(j, _)| j),
    );
}
