//! Simulation settings and display preferences
//!
//! Persisted as pretty JSON. Every field has a default, so partial files
//! are accepted.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{PARTICLE_COUNT, TARGET_FPS};
use crate::error::{Error, Result};
use crate::sim::SimParams;

/// Target frame rate presets (number keys 1-5)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FpsPreset {
    Fps30,
    #[default]
    Fps60,
    Fps120,
    Fps240,
    Fps600,
}

impl FpsPreset {
    pub const ALL: [FpsPreset; 5] = [
        FpsPreset::Fps30,
        FpsPreset::Fps60,
        FpsPreset::Fps120,
        FpsPreset::Fps240,
        FpsPreset::Fps600,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FpsPreset::Fps30 => "30",
            FpsPreset::Fps60 => "60",
            FpsPreset::Fps120 => "120",
            FpsPreset::Fps240 => "240",
            FpsPreset::Fps600 => "600",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().trim_end_matches("fps") {
            "30" => Some(FpsPreset::Fps30),
            "60" => Some(FpsPreset::Fps60),
            "120" => Some(FpsPreset::Fps120),
            "240" => Some(FpsPreset::Fps240),
            "600" => Some(FpsPreset::Fps600),
            _ => None,
        }
    }

    /// Preset bound to a number key (1 = 30 fps ... 5 = 600 fps)
    pub fn from_key(digit: u8) -> Option<Self> {
        Self::ALL.get(usize::from(digit).checked_sub(1)?).copied()
    }

    pub fn target_fps(&self) -> u32 {
        match self {
            FpsPreset::Fps30 => 30,
            FpsPreset::Fps60 => TARGET_FPS,
            FpsPreset::Fps120 => 120,
            FpsPreset::Fps240 => 240,
            FpsPreset::Fps600 => 600,
        }
    }
}

/// Presentation preferences (no effect on physics)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub fps: FpsPreset,
    /// Draw cell boundaries under the particles
    pub show_grid_overlay: bool,
    /// Tint particles by speed instead of their own color
    pub show_speed_colors: bool,
    /// Frames the headless runner advances before exiting
    pub frames: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            fps: FpsPreset::Fps60,
            show_grid_overlay: true,
            show_speed_colors: false,
            frames: 600,
        }
    }
}

/// Complete run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Population size, fixed for the run
    pub particle_count: usize,
    /// RNG seed (None = derive from the clock)
    pub seed: Option<u64>,
    pub sim: SimParams,
    pub display: DisplaySettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            seed: None,
            sim: SimParams::default(),
            display: DisplaySettings::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if given and present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.exists() => Self::load(p),
            Some(p) => {
                log::warn!("Settings file {} not found, using defaults", p.display());
                Ok(Self::default())
            }
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the physics core assumes are in range
    pub fn validate(&self) -> Result<()> {
        let sim = &self.sim;
        let positive = [
            ("width", sim.width),
            ("height", sim.height),
            ("cell_size", sim.cell_size),
            ("gravity_radius", sim.gravity_radius),
            ("particle_radius", sim.particle_radius),
            ("particle_mass", sim.particle_mass),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParam(format!(
                    "{name} must be finite and > 0 (got {value})"
                )));
            }
        }

        let finite = [
            ("gravity_constant", sim.gravity_constant),
            ("attractor_strength", sim.attractor_strength),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(Error::InvalidParam(format!("{name} must be finite (got {value})")));
            }
        }
        if let Some(target) = sim.gravity_targets.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidParam(format!(
                "gravity target must be finite (got {target})"
            )));
        }

        if self.particle_count == 0 {
            return Err(Error::InvalidParam("particle_count must be > 0".into()));
        }
        if sim.substeps == 0 {
            return Err(Error::InvalidParam("substeps must be >= 1".into()));
        }
        if !(0.0..=1.0).contains(&sim.restitution) {
            return Err(Error::InvalidParam(format!(
                "restitution must be in [0, 1] (got {})",
                sim.restitution
            )));
        }
        if !sim.initial_speed.is_finite() || sim.initial_speed < 0.0 {
            return Err(Error::InvalidParam("initial_speed must be finite and >= 0".into()));
        }
        if sim.width < 2.0 * sim.particle_radius || sim.height < 2.0 * sim.particle_radius {
            return Err(Error::InvalidParam(
                "plane must be at least 2 * particle_radius in every dimension".into(),
            ));
        }
        Ok(())
    }

    pub fn target_fps(&self) -> u32 {
        self.display.fps.target_fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.particle_count, 100);
        assert_eq!(settings.target_fps(), 60);
        assert!(settings.display.show_grid_overlay);
    }

    #[test]
    fn test_fps_preset_parsing() {
        assert_eq!(FpsPreset::from_str("120"), Some(FpsPreset::Fps120));
        assert_eq!(FpsPreset::from_str("240fps"), Some(FpsPreset::Fps240));
        assert_eq!(FpsPreset::from_str("59"), None);
        assert_eq!(FpsPreset::from_key(1), Some(FpsPreset::Fps30));
        assert_eq!(FpsPreset::from_key(5), Some(FpsPreset::Fps600));
        assert_eq!(FpsPreset::from_key(0), None);
        assert_eq!(FpsPreset::from_key(6), None);
        for preset in FpsPreset::ALL {
            assert_eq!(FpsPreset::from_str(preset.as_str()), Some(preset));
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut s = Settings::default();
        s.sim.restitution = 1.5;
        assert!(matches!(s.validate(), Err(Error::InvalidParam(_))));

        let mut s = Settings::default();
        s.sim.cell_size = 0.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.sim.substeps = 0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.sim.particle_mass = -1.0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.sim.width = 15.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_forces() {
        let mut s = Settings::default();
        s.sim.gravity_constant = f64::NAN;
        assert!(matches!(s.validate(), Err(Error::InvalidParam(_))));

        let mut s = Settings::default();
        s.sim.attractor_strength = f64::INFINITY;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.sim.gravity_targets = vec![DVec2::new(100.0, 100.0), DVec2::new(f64::NAN, 5.0)];
        assert!(s.validate().is_err());

        // Negative G (repulsion) is finite and allowed
        let mut s = Settings::default();
        s.sim.gravity_constant = -0.5;
        s.sim.gravity_targets = vec![DVec2::new(100.0, 100.0)];
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{ "particle_count": 250, "sim": { "substeps": 4 }, "display": { "fps": "Fps120" } }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.particle_count, 250);
        assert_eq!(s.sim.substeps, 4);
        assert_eq!(s.sim.cell_size, crate::consts::CELL_SIZE);
        assert_eq!(s.target_fps(), 120);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("gridsim-settings-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = Some(7);
        settings.sim.gravity_targets = vec![DVec2::new(300.0, 200.0)];
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_falls_back() {
        let path = std::env::temp_dir().join("gridsim-does-not-exist.json");
        let s = Settings::load_or_default(Some(&path)).unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_malformed_file_is_json_error() {
        let path = std::env::temp_dir().join(format!("gridsim-bad-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Settings::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(Error::Json(_))));
    }
}
