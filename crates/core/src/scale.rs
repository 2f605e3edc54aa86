use std::str::FromStr;

use dimscale_protocol::{BreakpointRange, Orientation, ScreenMetrics};
use serde::{Deserialize, Serialize};

use crate::config::ScaleConfig;
use crate::device;
use crate::error::DimensionError;
use crate::metrics::{MetricsProvider, ratio, sample};

/// How a value passed to `responsive_width`/`responsive_height` is expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    /// Percentage of the current viewport side.
    Percent,
    /// Design-file pixels, relative to the reference artboard.
    Pixel,
}

impl FromStr for Unit {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percent" | "%" => Ok(Self::Percent),
            "pixel" | "px" => Ok(Self::Pixel),
            _ => Err(DimensionError::InvalidUnit(s.to_string())),
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent => write!(f, "percent"),
            Self::Pixel => write!(f, "pixel"),
        }
    }
}

/// Scaling and classification bound to a metrics source.
///
/// Every call samples the provider afresh; nothing is cached between calls,
/// so results track rotation and split-screen resizes immediately. A zero
/// snapshot yields zero outputs rather than dividing by zero.
///
/// ```
/// use dimscale_core::Responsive;
/// use dimscale_protocol::ScreenMetrics;
///
/// let r = Responsive::new(ScreenMetrics::new(375.0, 812.0, 3.0));
/// assert_eq!(r.wp(80.0), 300.0);
/// assert_eq!(r.px_to_dp_width(120.0), 120.0);
/// ```
#[derive(Debug, Clone)]
pub struct Responsive<P> {
    provider: P,
    config: ScaleConfig,
}

impl<P: MetricsProvider> Responsive<P> {
    pub fn new(provider: P) -> Self {
        Self::with_config(provider, ScaleConfig::default())
    }

    pub fn with_config(provider: P, config: ScaleConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &ScaleConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScaleConfig) {
        self.config = config;
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Current metrics, sanitized.
    pub fn metrics(&self) -> ScreenMetrics {
        sample(&self.provider)
    }

    /// `percent` of the viewport width. Values outside `0..=100` are not
    /// clamped.
    pub fn wp(&self, percent: f64) -> f64 {
        percent / 100.0 * self.metrics().width
    }

    /// `percent` of the viewport height. Values outside `0..=100` are not
    /// clamped.
    pub fn hp(&self, percent: f64) -> f64 {
        percent / 100.0 * self.metrics().height
    }

    /// Convert a width measured on the reference artboard to this device.
    pub fn px_to_dp_width(&self, px: f64) -> f64 {
        px * ratio(self.metrics().width, self.config.reference_width)
    }

    /// Convert a height measured on the reference artboard to this device.
    pub fn px_to_dp_height(&self, px: f64) -> f64 {
        px * ratio(self.metrics().height, self.config.reference_height)
    }

    pub fn responsive_width(&self, value: f64, unit: Unit) -> f64 {
        match unit {
            Unit::Percent => self.wp(value),
            Unit::Pixel => self.px_to_dp_width(value),
        }
    }

    pub fn responsive_height(&self, value: f64, unit: Unit) -> f64 {
        match unit {
            Unit::Percent => self.hp(value),
            Unit::Pixel => self.px_to_dp_height(value),
        }
    }

    /// [`responsive_width`](Self::responsive_width) with the unit given as
    /// text (`"percent"`, `"%"`, `"pixel"`, `"px"`).
    pub fn responsive_width_str(&self, value: f64, unit: &str) -> Result<f64, DimensionError> {
        Ok(self.responsive_width(value, unit.parse()?))
    }

    /// [`responsive_height`](Self::responsive_height) with the unit given as
    /// text.
    pub fn responsive_height_str(&self, value: f64, unit: &str) -> Result<f64, DimensionError> {
        Ok(self.responsive_height(value, unit.parse()?))
    }

    /// Scale a font size by the width ratio to the reference artboard,
    /// capped at `font_scale_cap` so large tablets don't get huge text.
    pub fn scale_font(&self, size: f64) -> f64 {
        let factor = ratio(self.metrics().width, self.config.reference_width)
            .min(self.config.font_scale_cap);
        size * factor
    }

    pub fn is_tablet(&self) -> bool {
        device::is_tablet(&self.metrics(), self.config.tablet_min_side)
    }

    pub fn orientation(&self) -> Orientation {
        self.metrics().orientation()
    }

    /// Classify an arbitrary width against the configured table.
    pub fn breakpoint(&self, width: f64) -> Result<&BreakpointRange, DimensionError> {
        self.config.breakpoints.classify(width)
    }

    /// Breakpoint for the current viewport width.
    pub fn current_breakpoint(&self) -> &BreakpointRange {
        let table = &self.config.breakpoints;
        // Sanitized widths are never negative.
        let idx = table.position(self.metrics().width).unwrap_or(0);
        &table.ranges()[idx]
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::metrics::provider_fn;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn phone() -> Responsive<ScreenMetrics> {
        Responsive::new(ScreenMetrics::new(375.0, 812.0, 3.0))
    }

    #[test]
    fn percent_of_viewport() {
        let r = phone();
        assert!(approx(r.wp(80.0), 300.0));
        assert!(approx(r.hp(50.0), 406.0));
        assert!(approx(r.wp(150.0), 562.5));
        assert!(approx(r.wp(-10.0), -37.5));
        assert!(approx(r.hp(0.0), 0.0));
    }

    #[test]
    fn pixels_match_reference_device() {
        let r = phone();
        assert!(approx(r.px_to_dp_width(120.0), 120.0));
        assert!(approx(r.px_to_dp_height(812.0), 812.0));
    }

    #[test]
    fn pixel_conversion_is_linear() {
        let r = Responsive::new(ScreenMetrics::new(414.0, 896.0, 2.0));
        for x in [-40.0, 0.0, 1.0, 17.5, 120.0, 1000.0] {
            assert!(approx(r.px_to_dp_width(2.0 * x), 2.0 * r.px_to_dp_width(x)));
            assert!(approx(r.px_to_dp_height(2.0 * x), 2.0 * r.px_to_dp_height(x)));
        }
        assert!(approx(r.px_to_dp_width(375.0), 414.0));
    }

    #[test]
    fn responsive_dispatches_on_unit() {
        let r = Responsive::new(ScreenMetrics::new(768.0, 1024.0, 2.0));
        for v in [-5.0, 0.0, 33.3, 250.0] {
            assert!(approx(r.responsive_width(v, Unit::Percent), r.wp(v)));
            assert!(approx(r.responsive_width(v, Unit::Pixel), r.px_to_dp_width(v)));
            assert!(approx(r.responsive_height(v, Unit::Percent), r.hp(v)));
            assert!(approx(r.responsive_height(v, Unit::Pixel), r.px_to_dp_height(v)));
        }
        assert_eq!(r.responsive_width_str(10.0, "px"), Ok(r.px_to_dp_width(10.0)));
        assert_eq!(r.responsive_height_str(10.0, "Percent"), Ok(r.hp(10.0)));
    }

    #[test]
    fn unknown_unit_is_rejected() {
        let r = phone();
        assert_eq!(
            r.responsive_width_str(10.0, "em"),
            Err(DimensionError::InvalidUnit("em".into()))
        );
        assert!(r.responsive_height_str(10.0, "").is_err());
        assert_eq!("%".parse::<Unit>(), Ok(Unit::Percent));
    }

    #[test]
    fn font_scale_is_capped() {
        let r = phone();
        assert!(approx(r.scale_font(16.0), 16.0));

        let small = Responsive::new(ScreenMetrics::new(320.0, 568.0, 2.0));
        assert!(approx(small.scale_font(15.0), 15.0 * 320.0 / 375.0));

        let tablet = Responsive::new(ScreenMetrics::new(1024.0, 1366.0, 2.0));
        assert!(approx(tablet.scale_font(16.0), 16.0 * 1.5));

        let config = ScaleConfig {
            font_scale_cap: 1.2,
            ..ScaleConfig::default()
        };
        let tuned = Responsive::with_config(ScreenMetrics::new(1024.0, 1366.0, 2.0), config);
        assert!(approx(tuned.scale_font(10.0), 12.0));
    }

    #[test]
    fn zero_metrics_produce_zero() {
        let r = Responsive::new(ScreenMetrics::ZERO);
        assert!(approx(r.wp(50.0), 0.0));
        assert!(approx(r.px_to_dp_height(100.0), 0.0));
        assert!(approx(r.scale_font(14.0), 0.0));
        assert!(!r.is_tablet());
        assert_eq!(r.current_breakpoint().name, "small");

        let config = ScaleConfig {
            reference_width: 0.0,
            ..ScaleConfig::default()
        };
        let r = Responsive::with_config(ScreenMetrics::new(375.0, 812.0, 1.0), config);
        assert!(approx(r.px_to_dp_width(100.0), 0.0));
    }

    #[test]
    fn reads_provider_on_every_call() {
        let width = Cell::new(400.0);
        let r = Responsive::new(provider_fn(|| ScreenMetrics::new(width.get(), 800.0, 1.0)));
        assert_eq!(r.orientation(), Orientation::Portrait);
        assert_eq!(r.current_breakpoint().name, "small");
        width.set(1200.0);
        assert_eq!(r.orientation(), Orientation::Landscape);
        assert_eq!(r.current_breakpoint().name, "large");
        assert_eq!(r.breakpoint(650.0).map(|b| &*b.name), Ok("medium"));
    }
}
