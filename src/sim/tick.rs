//! Substep orchestration and the per-frame driver
//!
//! One substep runs, in strict order:
//! 1. build the spatial grid from current positions
//! 2. pairwise gravity (reads the grid)
//! 3. point-attractor gravity
//! 4. integrate positions and bounce off walls
//! 5. resolve collisions (reuses the same, pre-movement grid)
//!
//! Reusing the grid for step 5 means a body that crosses more than one cell
//! in a single substep can tunnel past a neighbor. That is a known limit.

use super::collision::resolve_collisions;
use super::gravity::{apply_attractors, apply_pairwise};
use super::grid::SpatialGrid;
use super::particle::integrate;
use super::state::Simulation;

/// Values the presentation layer reads after each frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Frames completed, including this one
    pub frame_index: u64,
    pub collisions_this_frame: u32,
    /// Collisions since the simulation started
    pub total_collisions: u64,
    /// Sum of 0.5 * m * |v|^2 after the frame
    pub kinetic_energy: f64,
}

/// Advance the simulation by one substep, returning collisions resolved
pub fn substep(sim: &mut Simulation) -> u32 {
    let params = &sim.params;
    let particles = &mut sim.particles;

    let grid = SpatialGrid::build(particles, params.cell_size);

    if params.pairwise_gravity && particles.len() > 1 {
        apply_pairwise(particles, &grid, params.gravity_constant, params.gravity_radius);
    }

    if !params.gravity_targets.is_empty() {
        apply_attractors(particles, &params.gravity_targets, params.attractor_strength);
    }

    integrate(particles, params.effective_substeps(), params.width, params.height);

    resolve_collisions(particles, &grid, params.restitution, params.contact_policy)
}

/// Advance the simulation by one rendered frame (`params.substeps` substeps)
pub fn frame(sim: &mut Simulation) -> FrameReport {
    let substeps = sim.params.effective_substeps();
    let collisions: u32 = (0..substeps).map(|_| substep(sim)).sum();

    sim.collision_count += u64::from(collisions);
    sim.frame_index += 1;

    let report = FrameReport {
        frame_index: sim.frame_index,
        collisions_this_frame: collisions,
        total_collisions: sim.collision_count,
        kinetic_energy: sim.kinetic_energy(),
    };
    log::trace!(
        "frame {}: {} collisions, KE {:.3}",
        report.frame_index,
        collisions,
        report.kinetic_energy
    );
    report
}
