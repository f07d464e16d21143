//! Headless runner
//!
//! Usage: `gridsim [settings.json]`
//!
//! Runs the simulation without a window, pacing frames to the configured
//! target rate and logging the HUD once per second of simulated frames.
//! Set `RUST_LOG=debug` (or `trace` for per-frame totals) for more detail.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use gridsim::Settings;
use gridsim::hud::{FrameClock, hud_lines};
use gridsim::sim::{FrameReport, Simulation, frame};
use gridsim::view;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn run() -> gridsim::Result<()> {
    let path = std::env::args().nth(1).map(PathBuf::from);
    let settings = Settings::load_or_default(path.as_deref())?;
    settings.validate()?;

    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut sim = Simulation::new(settings.particle_count, settings.sim.clone(), seed);
    let mut clock = FrameClock::new();
    let target_fps = settings.target_fps();

    if settings.display.show_grid_overlay {
        let overlay = view::grid_lines(sim.params.width, sim.params.height, sim.params.cell_size);
        log::debug!("Grid overlay: {} lines", overlay.len());
    }

    log::info!(
        "Gridsim running: {} frames at {} fps target, {} substeps/frame",
        settings.display.frames,
        target_fps,
        sim.params.substeps
    );

    let mut report = FrameReport::default();
    for _ in 0..settings.display.frames {
        report = frame(&mut sim);
        clock.tick(target_fps);

        if target_fps > 0 && report.frame_index % u64::from(target_fps) == 0 {
            let sprites = view::sprites(&sim, settings.display.show_speed_colors);
            log::debug!("Snapshot: {} sprites", sprites.len());
            for line in hud_lines(
                &report,
                clock.fps(),
                target_fps,
                sim.params.restitution,
                sim.params.gravity_targets.len(),
            ) {
                log::info!("{line}");
            }
        }
    }

    log::info!(
        "Finished after {} frames: {} collisions, kinetic energy {:.2}",
        report.frame_index,
        report.total_collisions,
        report.kinetic_energy
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
