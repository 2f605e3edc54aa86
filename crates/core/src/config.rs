use dimscale_protocol::{BREAKPOINTS, BreakpointRange};
use serde::Deserialize;

use crate::breakpoints::BreakpointTable;
use crate::error::ConfigError;

pub const DEFAULT_REFERENCE_WIDTH: f64 = 375.0;
pub const DEFAULT_REFERENCE_HEIGHT: f64 = 812.0;
pub const DEFAULT_FONT_SCALE_CAP: f64 = 1.5;
pub const DEFAULT_TABLET_MIN_SIDE: f64 = 600.0;

/// Tunable constants used by the scaling and classification functions.
///
/// The reference sizes describe the artboard that design-file pixel values
/// were authored against. None of the numeric defaults are load-bearing;
/// override them per app.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConfig {
    pub reference_width: f64,
    pub reference_height: f64,
    /// Upper bound on the width ratio applied by `scale_font`.
    pub font_scale_cap: f64,
    /// Shortest side (inclusive) at which a device counts as a tablet.
    pub tablet_min_side: f64,
    pub breakpoints: BreakpointTable,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            reference_width: DEFAULT_REFERENCE_WIDTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            font_scale_cap: DEFAULT_FONT_SCALE_CAP,
            tablet_min_side: DEFAULT_TABLET_MIN_SIDE,
            breakpoints: BreakpointTable::default(),
        }
    }
}

/// On-disk shape of [`ScaleConfig`]. Every key is optional.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
struct RawScaleConfig {
    reference_width: f64,
    reference_height: f64,
    font_scale_cap: f64,
    tablet_min_side: f64,
    breakpoints: Vec<BreakpointRange>,
}

impl Default for RawScaleConfig {
    fn default() -> Self {
        Self {
            reference_width: DEFAULT_REFERENCE_WIDTH,
            reference_height: DEFAULT_REFERENCE_HEIGHT,
            font_scale_cap: DEFAULT_FONT_SCALE_CAP,
            tablet_min_side: DEFAULT_TABLET_MIN_SIDE,
            breakpoints: BREAKPOINTS.to_vec(),
        }
    }
}

impl ScaleConfig {
    /// Parse a JSON config such as
    ///
    /// ```json
    /// { "referenceWidth": 390, "fontScaleCap": 1.3,
    ///   "breakpoints": [{ "name": "phone", "minWidth": 0, "maxWidth": 700 },
    ///                   { "name": "tablet", "minWidth": 700 }] }
    /// ```
    ///
    /// Missing keys keep their defaults.
    pub fn from_json(data: &[u8]) -> Result<Self, ConfigError> {
        let raw: RawScaleConfig = serde_json::from_slice(data)?;
        let config = Self {
            reference_width: raw.reference_width,
            reference_height: raw.reference_height,
            font_scale_cap: raw.font_scale_cap,
            tablet_min_side: raw.tablet_min_side,
            breakpoints: BreakpointTable::new(raw.breakpoints)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that every numeric constant is finite and positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("referenceWidth", self.reference_width),
            ("referenceHeight", self.reference_height),
            ("fontScaleCap", self.font_scale_cap),
            ("tabletMinSide", self.tablet_min_side),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = ScaleConfig::from_json(b"{}").expect("parse empty config");
        assert_eq!(config, ScaleConfig::default());
    }

    #[test]
    fn overrides_and_custom_breakpoints() {
        let json = br#"{
            "referenceWidth": 390,
            "fontScaleCap": 1.25,
            "breakpoints": [
                { "name": "phone", "minWidth": 0, "maxWidth": 700 },
                { "name": "tablet", "minWidth": 700 }
            ]
        }"#;
        let config = ScaleConfig::from_json(json).expect("parse config");
        assert!((config.reference_width - 390.0).abs() < f64::EPSILON);
        assert!((config.reference_height - DEFAULT_REFERENCE_HEIGHT).abs() < f64::EPSILON);
        assert!((config.font_scale_cap - 1.25).abs() < f64::EPSILON);
        assert_eq!(config.breakpoints.ranges().len(), 2);
        assert_eq!(
            config.breakpoints.classify(800.0).map(|r| &*r.name),
            Ok("tablet")
        );
    }

    #[test]
    fn rejects_non_positive_constants() {
        let err = ScaleConfig::from_json(br#"{ "referenceWidth": 0 }"#)
            .expect_err("zero reference width");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "referenceWidth",
                ..
            }
        ));
        assert!(ScaleConfig::from_json(br#"{ "tabletMinSide": -1 }"#).is_err());
    }

    #[test]
    fn rejects_bad_json_and_unknown_keys() {
        assert!(matches!(
            ScaleConfig::from_json(b"not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            ScaleConfig::from_json(br#"{ "refWidth": 375 }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn rejects_gapped_breakpoints() {
        let json = br#"{ "breakpoints": [
            { "name": "a", "minWidth": 0, "maxWidth": 100 },
            { "name": "b", "minWidth": 200 }
        ] }"#;
        assert!(matches!(
            ScaleConfig::from_json(json),
            Err(ConfigError::BreakpointGap { .. })
        ));
    }
}
