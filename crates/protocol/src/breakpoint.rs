use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// A named width category covering `[min_width, max_width)`.
///
/// `max_width` of `None` leaves the range open towards infinity; only the
/// last entry of a table may be open.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointRange {
    pub name: Cow<'static, str>,
    pub min_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<f64>,
}

impl BreakpointRange {
    pub const fn new(name: &'static str, min_width: f64, max_width: Option<f64>) -> Self {
        Self {
            name: Cow::Borrowed(name),
            min_width,
            max_width,
        }
    }

    /// Whether `width` falls in this range (lower bound inclusive, upper
    /// bound exclusive).
    pub fn contains(&self, width: f64) -> bool {
        width >= self.min_width && self.max_width.is_none_or(|max| width < max)
    }

    pub fn is_open(&self) -> bool {
        self.max_width.is_none()
    }
}

impl std::fmt::Display for BreakpointRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Default breakpoint table, ordered by width.
pub static BREAKPOINTS: [BreakpointRange; 3] = [
    BreakpointRange::new("small", 0.0, Some(600.0)),
    BreakpointRange::new("medium", 600.0, Some(900.0)),
    BreakpointRange::new("large", 900.0, None),
];
