//! Simulation settings
//!
//! Screen geometry and host-tunable limits. Loaded from JSON; missing fields
//! fall back to defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::DARKNESS_RISE_PER_TICK;

/// Host-facing settings for a simulation session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Visible screen width in world units
    pub screen_width: f32,
    /// Visible screen height in world units
    pub screen_height: f32,
    /// Fixed RNG seed (None = derive from the clock at run start)
    pub seed: Option<u64>,
    /// Frame deltas above this (ms) are clamped
    pub max_frame_ms: f64,
    /// Darkness rise per tick (frame-coupled, not time-scaled)
    pub darkness_rise_per_tick: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            seed: None,
            max_frame_ms: 1000.0,
            darkness_rise_per_tick: DARKNESS_RISE_PER_TICK,
        }
    }
}

impl Settings {
    /// Settings with a fixed seed, everything else default
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Half the screen height (camera offset from the player)
    #[inline]
    pub fn half_height(&self) -> f32 {
        self.screen_height / 2.0
    }

    /// Parse settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.sanitized())
    }

    /// Serialize settings to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Replace non-positive or non-finite values with defaults
    pub(crate) fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if !(self.screen_width.is_finite() && self.screen_width > 0.0) {
            log::warn!("Rejected screen_width {}", self.screen_width);
            self.screen_width = defaults.screen_width;
        }
        if !(self.screen_height.is_finite() && self.screen_height > 0.0) {
            log::warn!("Rejected screen_height {}", self.screen_height);
            self.screen_height = defaults.screen_height;
        }
        if !(self.max_frame_ms.is_finite() && self.max_frame_ms > 0.0) {
            log::warn!("Rejected max_frame_ms {}", self.max_frame_ms);
            self.max_frame_ms = defaults.max_frame_ms;
        }
        if !self.darkness_rise_per_tick.is_finite() {
            self.darkness_rise_per_tick = defaults.darkness_rise_per_tick;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "screen_width": 400 }"#).unwrap();
        assert_eq!(settings.screen_width, 400.0);
        assert_eq!(settings.screen_height, 600.0);
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_invalid_dimensions_are_replaced() {
        let settings =
            Settings::from_json(r#"{ "screen_width": -5, "max_frame_ms": 0 }"#).unwrap();
        assert_eq!(settings.screen_width, 800.0);
        assert_eq!(settings.max_frame_ms, 1000.0);
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings::with_seed(7);
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
    }

    #[test]
    fn test_zero_width_is_replaced_in_code() {
        let settings = Settings {
            screen_width: 0.0,
            screen_height: f32::NAN,
            ..Settings::with_seed(3)
        }
        .sanitized();
        assert_eq!(settings.screen_width, 800.0);
        assert_eq!(settings.screen_height, 600.0);
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_from("/nonexistent/blood-ascent.json");
        assert_eq!(settings, Settings::default());
    }
}
