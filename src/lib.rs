//! Gridsim - A real-time 2D particle simulation
//!
//! Core modules:
//! - `sim`: Deterministic physics (grid, gravity, integration, collisions)
//! - `settings`: Persisted configuration and validation
//! - `controls`: Caller-side parameter edits (clamping happens here)
//! - `hud`: Frame pacing and HUD text
//! - `view`: Read-only draw snapshot of the simulation

pub mod controls;
pub mod error;
pub mod hud;
pub mod settings;
pub mod sim;
pub mod view;

pub use error::{Error, Result};
pub use settings::{DisplaySettings, FpsPreset, Settings};

/// Simulation configuration constants
pub mod consts {
    /// Plane dimensions (pixels)
    pub const PLANE_WIDTH: f64 = 1200.0;
    pub const PLANE_HEIGHT: f64 = 800.0;

    /// Spatial grid cell edge length
    pub const CELL_SIZE: f64 = 40.0;

    /// Population defaults
    pub const PARTICLE_COUNT: usize = 100;
    pub const PARTICLE_RADIUS: f64 = 10.0;
    pub const PARTICLE_MASS: f64 = 10.0;
    /// Particles spawn at least this far from every wall
    pub const SPAWN_MARGIN: f64 = 50.0;

    /// Substeps per rendered frame (fewer improves throughput)
    pub const SUBSTEPS: u32 = 1;

    /// Newtonian gravity (smaller G for larger N)
    pub const GRAVITY_CONSTANT: f64 = 0.02;
    /// Only neighbors within this radius attract each other
    pub const GRAVITY_RADIUS: f64 = 220.0;
    /// Added to squared distance so coincident bodies stay finite
    pub const GRAVITY_SOFTENING: f64 = 1e-2;

    /// Constant pull of each gravity target
    pub const ATTRACTOR_STRENGTH: f64 = 0.015;

    /// 1.0 = perfectly elastic, <1.0 = inelastic
    pub const RESTITUTION: f64 = 0.4;
    /// Restitution change per key press
    pub const RESTITUTION_STEP: f64 = 0.1;

    /// Added to distances before normalizing
    pub const DISTANCE_EPSILON: f64 = 1e-6;
    /// Nominal separation used when two centers coincide
    pub const DEGENERATE_SEPARATION: f64 = 1e-6;

    /// Frame rate the presentation loop aims for
    pub const TARGET_FPS: u32 = 60;
    /// Frames averaged when reporting FPS
    pub const FPS_WINDOW: usize = 10;

    /// Radius of the marker drawn at each gravity target
    pub const TARGET_MARKER_RADIUS: f64 = 8.0;
}

