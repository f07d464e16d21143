//! Runtime parameter edits from the input layer
//!
//! Input handling itself lives outside this crate. It translates key and
//! mouse events into [`ControlCommand`]s which are applied here, between
//! frames. Range clamping happens here; the physics core trusts its inputs.

use glam::DVec2;

use crate::consts::RESTITUTION_STEP;
use crate::settings::{DisplaySettings, FpsPreset};
use crate::sim::SimParams;

/// A single edit to the running configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlCommand {
    /// Replace every gravity target with one (left click)
    SetTarget(DVec2),
    /// Add a gravity target (shift + left click)
    AddTarget(DVec2),
    /// Remove all gravity targets (right click)
    ClearTargets,
    /// Change restitution by a delta, result clamped to [0, 1]
    AdjustRestitution(f64),
    SetFpsPreset(FpsPreset),
    ToggleGridOverlay,
    ToggleSpeedColors,
}

impl ControlCommand {
    /// Restitution down one step (R key)
    pub const LOWER_RESTITUTION: Self = ControlCommand::AdjustRestitution(-RESTITUTION_STEP);
    /// Restitution up one step (T key)
    pub const RAISE_RESTITUTION: Self = ControlCommand::AdjustRestitution(RESTITUTION_STEP);

    /// Command for a left click, adding a target when shift is held
    pub fn click(pos: DVec2, shift: bool) -> Self {
        if shift {
            ControlCommand::AddTarget(pos)
        } else {
            ControlCommand::SetTarget(pos)
        }
    }
}

/// Apply `cmd` to the physics parameters and display preferences
pub fn apply(params: &mut SimParams, display: &mut DisplaySettings, cmd: ControlCommand) {
    match cmd {
        ControlCommand::SetTarget(pos) => {
            params.gravity_targets.clear();
            params.gravity_targets.push(pos);
        }
        ControlCommand::AddTarget(pos) => params.gravity_targets.push(pos),
        ControlCommand::ClearTargets => params.gravity_targets.clear(),
        ControlCommand::AdjustRestitution(delta) => {
            params.restitution = (params.restitution + delta).clamp(0.0, 1.0);
            log::debug!("Restitution: {:.2}", params.restitution);
        }
        ControlCommand::SetFpsPreset(preset) => {
            display.fps = preset;
            log::debug!("Target FPS: {}", preset.target_fps());
        }
        ControlCommand::ToggleGridOverlay => display.show_grid_overlay = !display.show_grid_overlay,
        ControlCommand::ToggleSpeedColors => display.show_speed_colors = !display.show_speed_colors,
    }
}
