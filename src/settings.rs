//! Course settings
//!
//! Fixed at construction time. Loaded from JSON; any missing field falls back
//! to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_BLOCKS_COUNT, TICK_RATE_HZ};
use crate::error::{CourseError, Result};
use crate::sim::BlockKind;

/// Course configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Obstacle blocks between Start and End
    pub blocks_count: u32,
    /// Kinds the assembler draws from
    pub palette: Vec<BlockKind>,
    /// Seed of the first level
    pub initial_seed: u64,
    /// Fixed simulation rate
    pub tick_rate_hz: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            blocks_count: DEFAULT_BLOCKS_COUNT,
            palette: BlockKind::OBSTACLES.to_vec(),
            initial_seed: 0,
            tick_rate_hz: TICK_RATE_HZ,
        }
    }
}

impl Settings {
    /// Fixed timestep in seconds
    pub fn sim_dt(&self) -> f32 {
        1.0 / self.tick_rate_hz.max(1) as f32
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(CourseError::EmptyPalette);
        }
        if let Some(kind) = self.palette.iter().find(|k| !k.is_obstacle()) {
            return Err(CourseError::Config(format!(
                "palette entry '{}' is not an obstacle block",
                kind.as_str()
            )));
        }
        if self.tick_rate_hz == 0 {
            return Err(CourseError::Config("tick_rate_hz must be positive".into()));
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings =
            serde_json::from_str(json).map_err(|e| CourseError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CourseError::Config(e.to_string()))
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|e| CourseError::Config(format!("read {}: {e}", path.display())))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
