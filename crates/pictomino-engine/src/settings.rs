//! Session configuration.
//!
//! Board geometry and engine tuning as serde structs with validated
//! defaults. Hosts usually run the defaults; the structs exist so a host
//! can persist difficulty presets and reload them.

use std::path::Path;
use std::time::Duration;

use pictomino_core::{Error, Result, SessionError};
use serde::{Deserialize, Serialize};

/// Board geometry for one puzzle session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoardParams {
    /// World pixels per grid cell, horizontally.
    pub block_w: f64,
    /// World pixels per grid cell, vertically.
    pub block_h: f64,
    /// Neighbor-test tolerance in world pixels.
    pub snap_threshold: f64,
}

impl Default for BoardParams {
    fn default() -> Self {
        Self {
            block_w: 100.0,
            block_h: 100.0,
            snap_threshold: 50.0,
        }
    }
}

impl BoardParams {
    /// Validate board geometry
    pub fn validate(&self) -> Result<()> {
        if self.block_w <= 0.0 || self.block_h <= 0.0 {
            return Err(SessionError::InvalidBlockSize {
                block_w: self.block_w,
                block_h: self.block_h,
            }
            .into());
        }
        if self.snap_threshold <= 0.0 {
            return Err(SessionError::InvalidSnapThreshold {
                threshold: self.snap_threshold,
            }
            .into());
        }
        Ok(())
    }
}

/// Engine tuning knobs.
///
/// Defaults match the interaction feel of the reference game; every field
/// can be overridden per session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTuning {
    /// Pieces spawned per batch.
    pub batch_size: usize,
    /// Radius around the dragged piece's center scanned for mismatch
    /// hints, world pixels.
    pub mismatch_radius: f64,
    /// Padding around a spawn candidate when testing overlap, world pixels.
    pub spawn_padding: f64,
    /// Minimum probe radius once any pieces are on the board.
    pub spawn_min_radius: f64,
    /// Extra probe radius per occupied piece.
    pub spawn_radius_per_piece: f64,
    /// Probe radius for the very first batch.
    pub first_batch_radius: f64,
    /// Maximum probe attempts before the deterministic fallback.
    pub spawn_attempts: u32,
    /// Radius growth per attempt, world pixels.
    pub spawn_radius_step: f64,
    /// Angle advance per attempt, radians.
    pub spawn_angle_step: f64,
    /// Debounce before the next batch spawns after a batch assembles, ms.
    pub batch_advance_debounce_ms: u64,
    /// Debounce before the completion signal fires, ms.
    pub completion_debounce_ms: u64,
}

impl Default for SessionTuning {
    fn default() -> Self {
        Self {
            batch_size: 5,
            mismatch_radius: 150.0,
            spawn_padding: 40.0,
            spawn_min_radius: 500.0,
            spawn_radius_per_piece: 50.0,
            first_batch_radius: 100.0,
            spawn_attempts: 50,
            spawn_radius_step: 20.0,
            spawn_angle_step: 0.5,
            batch_advance_debounce_ms: 500,
            completion_debounce_ms: 1000,
        }
    }
}

impl SessionTuning {
    /// Validate tuning values
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(invalid_tuning("batch_size must be > 0"));
        }
        if self.mismatch_radius <= 0.0 {
            return Err(invalid_tuning("mismatch_radius must be > 0"));
        }
        if self.spawn_attempts == 0 {
            return Err(invalid_tuning("spawn_attempts must be > 0"));
        }
        if self.spawn_padding < 0.0 {
            return Err(invalid_tuning("spawn_padding must be >= 0"));
        }
        if self.spawn_radius_step <= 0.0 || self.spawn_angle_step <= 0.0 {
            return Err(invalid_tuning("spawn probe steps must be > 0"));
        }
        Ok(())
    }

    /// Load tuning from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::other(format!("Failed to read tuning file: {}", e)))?;

        let tuning: Self = serde_json::from_str(&content)
            .map_err(|e| Error::other(format!("Invalid JSON tuning: {}", e)))?;

        tuning.validate()?;
        Ok(tuning)
    }

    /// Save tuning to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Error::other(format!("Failed to serialize tuning: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| Error::other(format!("Failed to write tuning file: {}", e)))?;

        Ok(())
    }

    pub fn batch_advance_debounce(&self) -> Duration {
        Duration::from_millis(self.batch_advance_debounce_ms)
    }

    pub fn completion_debounce(&self) -> Duration {
        Duration::from_millis(self.completion_debounce_ms)
    }
}

fn invalid_tuning(reason: &str) -> Error {
    SessionError::InvalidTuning {
        reason: reason.to_string(),
    }
    .into()
}
