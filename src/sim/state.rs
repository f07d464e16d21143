//! Simulation state and runtime parameters
//!
//! The `Simulation` aggregate owns the particle population and the
//! parameters every component reads. There is no global state.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::ContactPolicy;
use super::particle::{self, Particle};
use crate::consts::*;

/// Physics parameters, mutable between frames
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Plane size
    pub width: f64,
    pub height: f64,
    /// Grid cell edge, shared by gravity and collision passes (> 0)
    pub cell_size: f64,
    /// Substeps per frame (>= 1)
    pub substeps: u32,
    /// Enable grid-accelerated pairwise gravity
    pub pairwise_gravity: bool,
    /// Gravitational constant G
    pub gravity_constant: f64,
    /// Pairwise gravity cutoff (> 0)
    pub gravity_radius: f64,
    /// Collision restitution in [0, 1] (clamped by the caller)
    pub restitution: f64,
    pub contact_policy: ContactPolicy,
    /// Point attractors
    pub gravity_targets: Vec<DVec2>,
    /// Pull of each point attractor
    pub attractor_strength: f64,
    /// Spawn velocity components are drawn from [-initial_speed, initial_speed]
    pub initial_speed: f64,
    pub particle_radius: f64,
    pub particle_mass: f64,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            width: PLANE_WIDTH,
            height: PLANE_HEIGHT,
            cell_size: CELL_SIZE,
            substeps: SUBSTEPS,
            pairwise_gravity: true,
            gravity_constant: GRAVITY_CONSTANT,
            gravity_radius: GRAVITY_RADIUS,
            restitution: RESTITUTION,
            contact_policy: ContactPolicy::Always,
            gravity_targets: Vec::new(),
            attractor_strength: ATTRACTOR_STRENGTH,
            initial_speed: 0.0,
            particle_radius: PARTICLE_RADIUS,
            particle_mass: PARTICLE_MASS,
        }
    }
}

impl SimParams {
    /// Substeps actually run per frame (never 0)
    #[inline]
    pub fn effective_substeps(&self) -> u32 {
        self.substeps.max(1)
    }
}

/// Complete simulation state (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct Simulation {
    /// Seed the population was spawned from
    pub seed: u64,
    pub params: SimParams,
    /// Fixed-size population, never resized during a run
    pub particles: Vec<Particle>,
    /// Collisions resolved since the simulation started
    pub collision_count: u64,
    /// Frames advanced so far
    pub frame_index: u64,
}

impl Simulation {
    /// Spawn `particle_count` particles inside the plane.
    ///
    /// Positions are uniform within a margin of every wall, colors are
    /// random with each channel in 100..=255.
    pub fn new(particle_count: usize, params: SimParams, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let particles = (0..particle_count)
            .map(|_| spawn_particle(&mut rng, &params))
            .collect();

        log::info!(
            "Simulation created: {} particles on {}x{} plane, seed {}",
            particle_count,
            params.width,
            params.height,
            seed
        );

        Self {
            seed,
            params,
            particles,
            collision_count: 0,
            frame_index: 0,
        }
    }

    /// Build from an explicit population (scenarios and tests)
    pub fn from_particles(particles: Vec<Particle>, params: SimParams) -> Self {
        Self {
            seed: 0,
            params,
            particles,
            collision_count: 0,
            frame_index: 0,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        particle::kinetic_energy(&self.particles)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

fn spawn_particle(rng: &mut Pcg32, params: &SimParams) -> Particle {
    let margin_x = SPAWN_MARGIN.min(params.width / 2.0);
    let margin_y = SPAWN_MARGIN.min(params.height / 2.0);
    let pos = DVec2::new(
        rng.random_range(margin_x..=params.width - margin_x),
        rng.random_range(margin_y..=params.height - margin_y),
    );

    let vel = if params.initial_speed > 0.0 {
        let s = params.initial_speed;
        DVec2::new(rng.random_range(-s..=s), rng.random_range(-s..=s))
    } else {
        DVec2::ZERO
    };

    let color = [
        rng.random_range(100..=255),
        rng.random_range(100..=255),
        rng.random_range(100..=255),
    ];

    Particle::new(pos, vel, params.particle_radius, params.particle_mass).with_color(color)
}
