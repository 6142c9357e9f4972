// config.rs - Host-supplied simulation settings
//
// The core reads these once per frame and trusts them. Range clamping
// happens at the boundary (wasm facade, JSON loader, CLI).

use std::fmt;
use std::ops::RangeInclusive;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DENSITY_RANGE: RangeInclusive<u32> = 20..=100;
pub const FALLOFF_RANGE: RangeInclusive<f32> = 50.0..=300.0;
pub const ATTRACTION_RANGE: RangeInclusive<f32> = 0.0..=0.5;
pub const SPEED_RANGE: RangeInclusive<f32> = 0.002..=0.04;

/// Force law applied to points inside the falloff radius.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicsMode {
    #[default]
    Attract,
    Repel,
    /// Tangential push, 90° from the attract direction.
    Orbit,
    /// Radial push modulated by a travelling sine.
    Wave,
}

impl PhysicsMode {
    pub fn name(self) -> &'static str {
        match self {
            PhysicsMode::Attract => "attract",
            PhysicsMode::Repel => "repel",
            PhysicsMode::Orbit => "orbit",
            PhysicsMode::Wave => "wave",
        }
    }
}

impl FromStr for PhysicsMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "attract" => Ok(PhysicsMode::Attract),
            "repel" => Ok(PhysicsMode::Repel),
            "orbit" => Ok(PhysicsMode::Orbit),
            "wave" => Ok(PhysicsMode::Wave),
            _ => Err(ConfigError::UnknownPhysicsMode(s.to_string())),
        }
    }
}

impl fmt::Display for PhysicsMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Trajectory followed by the emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    #[default]
    Circle,
    Triangle,
}

impl PathStyle {
    pub fn name(self) -> &'static str {
        match self {
            PathStyle::Circle => "circle",
            PathStyle::Triangle => "triangle",
        }
    }
}

impl FromStr for PathStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(PathStyle::Circle),
            "triangle" => Ok(PathStyle::Triangle),
            _ => Err(ConfigError::UnknownPathStyle(s.to_string())),
        }
    }
}

impl fmt::Display for PathStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Points per side; the grid holds `grid_density²` points.
    pub grid_density: u32,
    /// Influence and illumination radius in pixels.
    pub falloff: f32,
    pub attraction: f32,
    pub physics_mode: PhysicsMode,
    /// Radians added to the emitter angle each frame.
    pub emitter_speed: f32,
    pub path_style: PathStyle,
    pub depth_effect: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_density: 60,
            falloff: 150.0,
            attraction: 0.15,
            physics_mode: PhysicsMode::Attract,
            emitter_speed: 0.015,
            path_style: PathStyle::Circle,
            depth_effect: true,
        }
    }
}

/// What a config change requires from the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigDelta {
    pub rebuild_grid: bool,
    pub path_changed: bool,
    pub changed: bool,
}

impl Config {
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read a JSON config file (native hosts).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Copy with every numeric field pulled into its documented range.
    pub fn clamped(&self) -> Self {
        Self {
            grid_density: self
                .grid_density
                .clamp(*DENSITY_RANGE.start(), *DENSITY_RANGE.end()),
            falloff: clamp_f32(self.falloff, &FALLOFF_RANGE),
            attraction: clamp_f32(self.attraction, &ATTRACTION_RANGE),
            emitter_speed: clamp_f32(self.emitter_speed, &SPEED_RANGE),
            ..*self
        }
    }

    pub fn is_in_range(&self) -> bool {
        self.clamped() == *self
    }

    pub fn diff(&self, next: &Config) -> ConfigDelta {
        ConfigDelta {
            rebuild_grid: self.grid_density != next.grid_density,
            path_changed: self.path_style != next.path_style,
            changed: self != next,
        }
    }
}

// NaN maps to the lower bound.
fn clamp_f32(v: f32, range: &RangeInclusive<f32>) -> f32 {
    if v.is_nan() {
        return *range.start();
    }
    v.clamp(*range.start(), *range.end())
}
