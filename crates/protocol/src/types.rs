use serde::{Deserialize, Serialize};

/// A snapshot of the host viewport, in logical pixels.
///
/// Metrics are sampled on every query and never cached, so a snapshot is only
/// meaningful at the instant it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenMetrics {
    pub width: f64,
    pub height: f64,
    /// Physical pixels per logical pixel.
    pub pixel_ratio: f64,
}

impl ScreenMetrics {
    /// Fallback snapshot used when the host cannot report its dimensions.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
        pixel_ratio: 1.0,
    };

    pub fn new(width: f64, height: f64, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    pub fn shortest_side(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn longest_side(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Whether either side is zero, i.e. the host had nothing to report.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Clamp unusable host values into a well-formed snapshot.
    ///
    /// Negative or non-finite sides become `0`, a non-positive or non-finite
    /// pixel ratio becomes `1`.
    pub fn sanitized(self) -> Self {
        fn side(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 { v } else { 0.0 }
        }
        let pixel_ratio = if self.pixel_ratio.is_finite() && self.pixel_ratio > 0.0 {
            self.pixel_ratio
        } else {
            1.0
        };
        Self {
            width: side(self.width),
            height: side(self.height),
            pixel_ratio,
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::of(self)
    }
}

impl Default for ScreenMetrics {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Viewport orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape iff the viewport is strictly wider than it is tall. A square
    /// viewport is portrait.
    pub fn of(metrics: &ScreenMetrics) -> Self {
        if metrics.width > metrics.height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}
