//! Deterministic simulation module
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by particle index, grid cells in key order)
//! - No rendering, clock, or platform dependencies

pub mod collision;
pub mod gravity;
pub mod grid;
pub mod particle;
pub mod state;
pub mod tick;

pub use collision::{Contact, ContactPolicy, circles_overlap, resolve_collisions, resolve_pair};
pub use gravity::{apply_attractors, apply_pairwise, pairwise_accelerations};
pub use grid::{CellKey, SpatialGrid};
pub use particle::{Particle, integrate, kinetic_energy};
pub use state::{SimParams, Simulation};
pub use tick::{FrameReport, frame, substep};
