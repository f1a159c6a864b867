//! Engine configuration.
//!
//! Every tuning constant of the pointer pipeline lives here.  Values can be
//! overridden from a TOML file; any key left out keeps its default.
//!
//! ```toml
//! smoothing_factor = 0.7
//! jitter_threshold = 3.0
//! pinch_threshold  = 0.08
//! dwell_ms         = 800
//! cooldown_ms      = 300
//!
//! [screen]
//! width  = 1280
//! height = 720
//! mirror = true
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ════════════════════════════════════════════════════════════════════════════
// ScreenConfig
// ════════════════════════════════════════════════════════════════════════════

/// Size of the pointing surface in screen units, and whether the camera image
/// is mirrored (selfie view) before mapping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width:  u32,
    pub height: u32,
    pub mirror: bool,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        ScreenConfig {
            width:  1280,
            height: 720,
            mirror: true,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// EngineConfig
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Weight given to the previous smoothed position, in `[0, 1)`.
    pub smoothing_factor:   f32,
    /// Minimum per-axis movement (screen units) before the cursor moves.
    pub jitter_threshold:   f32,
    /// Index/thumb tip distance (normalized units) below which the hand pinches.
    pub pinch_threshold:    f32,
    /// Hover time needed for a dwell activation.
    pub dwell_ms:           u64,
    /// Minimum time between two accepted activations.
    pub cooldown_ms:        u64,
    /// Whether a successful pinch activation restarts an in-progress dwell.
    pub pinch_resets_dwell: bool,
    pub screen:             ScreenConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            smoothing_factor:   0.7,
            jitter_threshold:   3.0,
            pinch_threshold:    0.08,
            dwell_ms:           800,
            cooldown_ms:        300,
            pinch_resets_dwell: true,
            screen:             ScreenConfig::default(),
        }
    }
}

impl EngineConfig {
    pub fn dwell(&self) -> Duration {
        Duration::from_millis(self.dwell_ms)
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let cfg: EngineConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.smoothing_factor) {
            return Err(Error::Config(format!(
                "smoothing_factor must be in [0, 1), got {}",
                self.smoothing_factor
            )));
        }
        if !(self.jitter_threshold >= 0.0) {
            return Err(Error::Config(format!(
                "jitter_threshold must be non-negative, got {}",
                self.jitter_threshold
            )));
        }
        if !(self.pinch_threshold > 0.0) {
            return Err(Error::Config(format!(
                "pinch_threshold must be positive, got {}",
                self.pinch_threshold
            )));
        }
        if self.dwell_ms == 0 {
            return Err(Error::Config("dwell_ms must be at least 1".into()));
        }
        if self.screen.width == 0 || self.screen.height == 0 {
            return Err(Error::Config(format!(
                "screen must have a non-zero size, got {}x{}",
                self.screen.width, self.screen.height
            )));
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = EngineConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.dwell(), Duration::from_millis(800));
        assert_eq!(cfg.cooldown(), Duration::from_millis(300));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml_str("dwell_ms = 1200\n[screen]\nmirror = false\n").unwrap();
        assert_eq!(cfg.dwell_ms, 1200);
        assert_eq!(cfg.cooldown_ms, 300);
        assert!(!cfg.screen.mirror);
        assert_eq!(cfg.screen.width, 1280);
    }

    #[test]
    fn smoothing_of_one_is_rejected() {
        let err = EngineConfig::from_toml_str("smoothing_factor = 1.0").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_dwell_is_rejected() {
        let cfg = EngineConfig { dwell_ms: 0, ..EngineConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("dwell_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = EngineConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
