//! Configuration for the editor front ends.

use serde::{Deserialize, Serialize};

/// Initial view settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Lower bound of the initial height window, megameters.
    pub height_min: f64,

    /// Upper bound of the initial height window, megameters.
    pub height_max: f64,

    /// Fraction of the value span added above and below the y-limits.
    pub y_padding: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            height_min: 0.0,
            height_max: 5.0,
            y_padding: 0.2,
        }
    }
}

impl EditorConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ATMOS_HEIGHT_MIN") {
            if let Ok(v) = val.parse() {
                config.height_min = v;
            }
        }

        if let Ok(val) = std::env::var("ATMOS_HEIGHT_MAX") {
            if let Ok(v) = val.parse() {
                config.height_max = v;
            }
        }

        if let Ok(val) = std::env::var("ATMOS_Y_PADDING") {
            if let Ok(v) = val.parse() {
                config.y_padding = v;
            }
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.height_min.is_finite() || !self.height_max.is_finite() {
            return Err("height window bounds must be finite".to_string());
        }

        if self.height_min >= self.height_max {
            return Err(format!(
                "height_min ({}) must be below height_max ({})",
                self.height_min, self.height_max
            ));
        }

        if !(self.y_padding >= 0.0) {
            return Err("y_padding must be >= 0".to_string());
        }

        Ok(())
    }
}
