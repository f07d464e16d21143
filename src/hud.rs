//! Frame pacing and HUD text
//!
//! Wall-clock time never reaches the physics core; it only decides how long
//! the presentation loop waits between frames and what FPS is reported.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::consts::FPS_WINDOW;
use crate::sim::FrameReport;

/// Measures frame durations and paces the loop to a target rate
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    /// Most recent frame durations, newest last
    history: VecDeque<Duration>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            history: VecDeque::with_capacity(FPS_WINDOW),
        }
    }

    /// Time per frame at `target_fps` (zero disables pacing)
    pub fn frame_budget(target_fps: u32) -> Duration {
        if target_fps == 0 {
            Duration::ZERO
        } else {
            Duration::from_nanos(1_000_000_000 / u64::from(target_fps))
        }
    }

    /// How long to wait after a frame that took `elapsed`
    pub fn remaining(elapsed: Duration, target_fps: u32) -> Duration {
        Self::frame_budget(target_fps).saturating_sub(elapsed)
    }

    /// Record one completed frame duration
    pub fn record(&mut self, frame: Duration) {
        if self.history.len() == FPS_WINDOW {
            self.history.pop_front();
        }
        self.history.push_back(frame);
    }

    /// Sleep out the rest of the frame budget, then record the full frame.
    ///
    /// Returns the frame's total duration including the wait.
    pub fn tick(&mut self, target_fps: u32) -> Duration {
        let wait = Self::remaining(self.last.elapsed(), target_fps);
        if !wait.is_zero() {
            std::thread::sleep(wait);
        }
        let now = Instant::now();
        let frame = now - self.last;
        self.last = now;
        self.record(frame);
        frame
    }

    /// Average frame rate over the recent window (0 before any frame)
    pub fn fps(&self) -> f64 {
        let total: Duration = self.history.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.history.len() as f64 / total.as_secs_f64()
    }
}

/// Format the HUD overlay, one entry per line
pub fn hud_lines(
    report: &FrameReport,
    fps: f64,
    target_fps: u32,
    restitution: f64,
    target_count: usize,
) -> Vec<String> {
    vec![
        format!("FPS: {fps:.1} (Target: {target_fps})"),
        format!("Kinetic Energy: {:.2}", report.kinetic_energy),
        format!("Collisions: {}", report.total_collisions),
        format!("Restitution: {restitution:.2} (R/T to change)"),
        format!("Gravity Centers: {target_count} (Shift+LClick to add)"),
    ]
}
