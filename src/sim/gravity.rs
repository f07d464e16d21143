//! Gravity as direct velocity impulses
//!
//! Two independent modes, both additive on velocity:
//! - pairwise Newtonian attraction limited to a radius, using the grid
//! - constant-strength pull toward zero or more target points

use glam::DVec2;

use super::grid::SpatialGrid;
use super::particle::Particle;
use crate::consts::{DISTANCE_EPSILON, GRAVITY_SOFTENING};

/// Number of cells to scan in each direction to cover `gravity_radius`
#[inline]
pub fn cell_reach(gravity_radius: f64, cell_size: f64) -> i32 {
    (gravity_radius / cell_size).ceil() as i32
}

/// Accumulate inverse-square attraction from neighbors within `gravity_radius`.
///
/// Only particles in cells within [`cell_reach`] of a particle's own cell are
/// considered. All contributions are summed into a separate buffer before any
/// velocity changes, so the result does not depend on particle order.
pub fn pairwise_accelerations(
    particles: &[Particle],
    grid: &SpatialGrid,
    g: f64,
    gravity_radius: f64,
) -> Vec<DVec2> {
    let reach = cell_reach(gravity_radius, grid.cell_size());
    let radius_sq = gravity_radius * gravity_radius;

    particles
        .iter()
        .enumerate()
        .map(|(a, pa)| {
            let mut acc = DVec2::ZERO;
            for b in grid.indices_within(grid.cell_of(pa.pos), reach) {
                if a == b {
                    continue;
                }
                let pb = &particles[b];
                let delta = pb.pos - pa.pos;
                let dist_sq = delta.length_squared() + GRAVITY_SOFTENING;
                if dist_sq > radius_sq {
                    continue;
                }
                let dir = delta / dist_sq.sqrt();
                acc += g * pb.mass * dir / dist_sq;
            }
            acc
        })
        .collect()
}

/// Grid-accelerated pairwise gravity: accumulate, then apply to velocities
pub fn apply_pairwise(particles: &mut [Particle], grid: &SpatialGrid, g: f64, gravity_radius: f64) {
    let accel = pairwise_accelerations(particles, grid, g, gravity_radius);
    for (p, a) in particles.iter_mut().zip(accel) {
        p.vel += a;
    }
}

/// Pull every particle toward each target with constant `strength`.
///
/// Targets are additive and have no cutoff radius.
pub fn apply_attractors(particles: &mut [Particle], targets: &[DVec2], strength: f64) {
    for &target in targets {
        for p in particles.iter_mut() {
            let delta = target - p.pos;
            let dist = delta.length() + DISTANCE_EPSILON;
            p.vel += strength * delta / dist;
        }
    }
}
