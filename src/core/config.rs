//! Configuration for viewport zoom behavior
//!
//! Zoom bounds and step factors are deployment choices rather than fixed
//! constants, so they live here as a serde-loadable struct with a handful of
//! named presets covering the ranges seen in practice.

use crate::core::constants::{
    DEFAULT_FIT_PADDING_FRACTION, DEFAULT_INITIAL_SCALE_CAP, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
    DEFAULT_ZOOM_OUT_FACTOR, DEFAULT_ZOOM_STEP_FACTOR,
};
use crate::{MapError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub enum ZoomProfile {
    /// 10% to 5000%
    Classic,
    /// 5% to 2000%
    Compact,
    /// 1% to 2000%
    Deep,
    Custom(ViewportConfig),
}

impl ZoomProfile {
    pub fn resolve(&self) -> ViewportConfig {
        match self {
            Self::Classic => ViewportConfig {
                min_zoom: 0.1,
                max_zoom: 50.0,
                ..ViewportConfig::default()
            },
            Self::Compact => ViewportConfig {
                min_zoom: 0.05,
                max_zoom: 20.0,
                ..ViewportConfig::default()
            },
            Self::Deep => ViewportConfig {
                min_zoom: 0.01,
                max_zoom: 20.0,
                ..ViewportConfig::default()
            },
            Self::Custom(config) => config.clone(),
        }
    }
}

impl Default for ZoomProfile {
    fn default() -> Self {
        Self::Custom(ViewportConfig::default())
    }
}

/// Recognized viewport options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Share of the container the fitted image may cover
    pub fit_padding_fraction: f64,
    /// Multiplier applied per zoom-in notch
    pub zoom_step_factor: f64,
    /// Multiplier applied per zoom-out notch
    pub zoom_out_factor: f64,
    /// Upper bound on the scale chosen by the initial fit
    pub initial_scale_cap: f64,
}

impl ViewportConfig {
    /// Rejects any option combination that could push the transform outside
    /// finite, positive territory.
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("minZoom", self.min_zoom),
            ("maxZoom", self.max_zoom),
            ("fitPaddingFraction", self.fit_padding_fraction),
            ("zoomStepFactor", self.zoom_step_factor),
            ("zoomOutFactor", self.zoom_out_factor),
            ("initialScaleCap", self.initial_scale_cap),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MapError::Configuration(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.min_zoom <= 0.0 {
            return Err(MapError::Configuration(format!(
                "minZoom must be positive, got {}",
                self.min_zoom
            )));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Configuration(format!(
                "minZoom ({}) exceeds maxZoom ({})",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.fit_padding_fraction <= 0.0 || self.fit_padding_fraction > 1.0 {
            return Err(MapError::Configuration(format!(
                "fitPaddingFraction must be in (0, 1], got {}",
                self.fit_padding_fraction
            )));
        }
        if self.zoom_step_factor <= 1.0 {
            return Err(MapError::Configuration(format!(
                "zoomStepFactor must be greater than 1, got {}",
                self.zoom_step_factor
            )));
        }
        if self.zoom_out_factor <= 0.0 || self.zoom_out_factor >= 1.0 {
            return Err(MapError::Configuration(format!(
                "zoomOutFactor must be in (0, 1), got {}",
                self.zoom_out_factor
            )));
        }
        if self.initial_scale_cap <= 0.0 {
            return Err(MapError::Configuration(format!(
                "initialScaleCap must be positive, got {}",
                self.initial_scale_cap
            )));
        }

        Ok(())
    }

    pub fn clamp_scale(&self, scale: f64) -> f64 {
        scale.clamp(self.min_zoom, self.max_zoom)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            fit_padding_fraction: DEFAULT_FIT_PADDING_FRACTION,
            zoom_step_factor: DEFAULT_ZOOM_STEP_FACTOR,
            zoom_out_factor: DEFAULT_ZOOM_OUT_FACTOR,
            initial_scale_cap: DEFAULT_INITIAL_SCALE_CAP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_profile_presets() {
        let classic = ZoomProfile::Classic.resolve();
        let compact = ZoomProfile::Compact.resolve();
        let deep = ZoomProfile::Deep.resolve();

        assert_eq!((classic.min_zoom, classic.max_zoom), (0.1, 50.0));
        assert_eq!((compact.min_zoom, compact.max_zoom), (0.05, 20.0));
        assert_eq!((deep.min_zoom, deep.max_zoom), (0.01, 20.0));

        // Presets only differ in bounds
        assert_eq!(classic.zoom_step_factor, 1.05);
        assert_eq!(deep.fit_padding_fraction, 0.9);

        for profile in [ZoomProfile::Classic, ZoomProfile::Compact, ZoomProfile::Deep] {
            assert!(profile.resolve().validate().is_ok());
        }
    }

    #[test]
    fn test_default_config() {
        let config = ViewportConfig::default();
        assert_eq!(config.min_zoom, 0.01);
        assert_eq!(config.max_zoom, 50.0);
        assert_eq!(config.zoom_out_factor, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_configs_rejected() {
        let inverted = ViewportConfig {
            min_zoom: 10.0,
            max_zoom: 1.0,
            ..ViewportConfig::default()
        };
        assert!(matches!(inverted.validate(), Err(MapError::Configuration(_))));

        let nan = ViewportConfig {
            max_zoom: f64::NAN,
            ..ViewportConfig::default()
        };
        assert!(nan.validate().is_err());

        let zero_min = ViewportConfig {
            min_zoom: 0.0,
            ..ViewportConfig::default()
        };
        assert!(zero_min.validate().is_err());

        let flat_step = ViewportConfig {
            zoom_step_factor: 1.0,
            ..ViewportConfig::default()
        };
        assert!(flat_step.validate().is_err());

        let wide_padding = ViewportConfig {
            fit_padding_fraction: 1.5,
            ..ViewportConfig::default()
        };
        assert!(wide_padding.validate().is_err());
    }

    #[test]
    fn test_config_from_camel_case_json() {
        let config: ViewportConfig =
            serde_json::from_str(r#"{ "minZoom": 0.05, "maxZoom": 20 }"#).unwrap();
        assert_eq!(config.min_zoom, 0.05);
        assert_eq!(config.max_zoom, 20.0);
        // Omitted options fall back to defaults
        assert_eq!(config.zoom_step_factor, 1.05);
    }

    #[test]
    fn test_clamp_scale() {
        let config = ZoomProfile::Compact.resolve();
        assert_eq!(config.clamp_scale(0.001), 0.05);
        assert_eq!(config.clamp_scale(100.0), 20.0);
        assert_eq!(config.clamp_scale(3.0), 3.0);
    }
}
