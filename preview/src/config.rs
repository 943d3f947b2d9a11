//! Tunable orbit-camera parameters.
//!
//! Like the editor config, every field has a default and a host may pass a
//! partial JSON object.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// Error returned by [`OrbitConfig::from_json`] and [`OrbitConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse orbit config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid orbit config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Sensitivities, bounds and damping of the orbit camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Radians of yaw/pitch per pixel of primary drag.
    pub rotate_speed: f64,
    /// Target units per pixel of secondary drag, per unit of camera distance.
    pub pan_speed: f64,
    /// Fractional zoom change per wheel notch.
    pub wheel_step: f64,
    /// Multiplier applied by the zoom-in button.
    pub zoom_in_factor: f64,
    /// Multiplier applied by the zoom-out button.
    pub zoom_out_factor: f64,
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Fraction of the remaining gap the smoothed state closes per frame.
    pub damping: f64,
    /// Camera distance at zoom 1.
    pub base_distance: f64,
    /// Pitch stays this far (radians) from either pole.
    pub pitch_margin: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rotate_speed: 0.008,
            pan_speed: 0.002,
            wheel_step: 0.05,
            zoom_in_factor: 1.2,
            zoom_out_factor: 0.8,
            zoom_min: 0.2,
            zoom_max: 3.0,
            damping: 0.1,
            base_distance: 5.0,
            pitch_margin: 0.1,
        }
    }
}

impl OrbitConfig {
    /// Parse and validate a (possibly partial) JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Return `self` if it validates, otherwise the defaults.
    #[must_use]
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(err) => {
                log::warn!("{err}; using default orbit config");
                Self::default()
            }
        }
    }

    /// Check every field against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("rotate_speed", self.rotate_speed),
            ("pan_speed", self.pan_speed),
            ("zoom_min", self.zoom_min),
            ("zoom_max", self.zoom_max),
            ("base_distance", self.base_distance),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { field, reason: "must be positive" });
            }
        }
        if self.zoom_min > self.zoom_max {
            return Err(ConfigError::Invalid { field: "zoom_max", reason: "must not be below zoom_min" });
        }
        if !(self.wheel_step > 0.0 && self.wheel_step < 1.0) {
            return Err(ConfigError::Invalid { field: "wheel_step", reason: "must be in (0, 1)" });
        }
        if !(self.zoom_in_factor.is_finite() && self.zoom_in_factor > 1.0) {
            return Err(ConfigError::Invalid { field: "zoom_in_factor", reason: "must be above 1" });
        }
        if !(self.zoom_out_factor > 0.0 && self.zoom_out_factor < 1.0) {
            return Err(ConfigError::Invalid { field: "zoom_out_factor", reason: "must be in (0, 1)" });
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::Invalid { field: "damping", reason: "must be in (0, 1]" });
        }
        if !(self.pitch_margin > 0.0 && self.pitch_margin < FRAC_PI_2) {
            return Err(ConfigError::Invalid { field: "pitch_margin", reason: "must be in (0, pi/2)" });
        }
        Ok(())
    }

    /// Largest pitch magnitude the camera may reach.
    #[must_use]
    pub fn pitch_limit(&self) -> f64 {
        FRAC_PI_2 - self.pitch_margin
    }
}
