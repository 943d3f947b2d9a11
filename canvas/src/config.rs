//! Tunable editor parameters.
//!
//! The host may hand the engine a partial JSON object; every missing field
//! falls back to the default below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

/// Error returned by [`EditorConfig::from_json`] and [`EditorConfig::validate`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The input was not a valid JSON config object.
    #[error("failed to parse editor config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range.
    #[error("invalid editor config: {field} {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Editor-wide sizes, floors and zoom bounds in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Logical page width; also the raster export width.
    pub canvas_width: f64,
    /// Logical page height; also the raster export height.
    pub canvas_height: f64,
    /// Provisional shapes are floored to this size and committed only above it.
    pub min_shape_size: f64,
    /// Added to each axis of a finalized path's extent.
    pub path_padding: f64,
    pub text_width: f64,
    pub text_height: f64,
    pub image_size: f64,
    /// Where `insert_image` places new images.
    pub image_origin: (f64, f64),
    /// Offset applied to duplicated elements.
    pub duplicate_offset: f64,
    /// Degrees added by the toolbar rotate action.
    pub rotate_step_deg: f64,
    pub zoom_min_percent: u32,
    pub zoom_max_percent: u32,
    pub zoom_step_percent: u32,
    pub grid_spacing: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 750.0,
            canvas_height: 550.0,
            min_shape_size: 10.0,
            path_padding: 20.0,
            text_width: 120.0,
            text_height: 40.0,
            image_size: 100.0,
            image_origin: (100.0, 100.0),
            duplicate_offset: 20.0,
            rotate_step_deg: 90.0,
            zoom_min_percent: 50,
            zoom_max_percent: 200,
            zoom_step_percent: 10,
            grid_spacing: 20.0,
        }
    }
}

impl EditorConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value is out of range.
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
                log::warn!("{err}; using default editor config");
                Self::default()
            }
        }
    }

    /// Check that every size is positive and the zoom bounds are ordered.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("min_shape_size", self.min_shape_size),
            ("text_width", self.text_width),
            ("text_height", self.text_height),
            ("image_size", self.image_size),
            ("grid_spacing", self.grid_spacing),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid { field, reason: "must be a positive number" });
            }
        }
        if !(self.path_padding.is_finite() && self.path_padding >= 0.0) {
            return Err(ConfigError::Invalid { field: "path_padding", reason: "must not be negative" });
        }
        if self.zoom_min_percent == 0 {
            return Err(ConfigError::Invalid { field: "zoom_min_percent", reason: "must be above zero" });
        }
        if self.zoom_min_percent > self.zoom_max_percent {
            return Err(ConfigError::Invalid { field: "zoom_max_percent", reason: "must not be below zoom_min_percent" });
        }
        if self.zoom_step_percent == 0 {
            return Err(ConfigError::Invalid { field: "zoom_step_percent", reason: "must be above zero" });
        }
        Ok(())
    }
}
