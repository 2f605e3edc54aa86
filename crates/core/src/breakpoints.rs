use dimscale_protocol::{BREAKPOINTS, BreakpointRange};

use crate::error::{ConfigError, DimensionError};

/// An ordered, validated set of breakpoint ranges partitioning `[0, ∞)`.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable {
    ranges: Vec<BreakpointRange>,
}

impl BreakpointTable {
    /// Build a table, checking that the ranges start at zero, are contiguous
    /// and non-empty, and that only the last one is open-ended.
    pub fn new(ranges: Vec<BreakpointRange>) -> Result<Self, ConfigError> {
        validate(&ranges)?;
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &[BreakpointRange] {
        &self.ranges
    }

    /// Index of the category containing `width`.
    ///
    /// Widths past the last upper bound fall into the last category.
    pub fn position(&self, width: f64) -> Result<usize, DimensionError> {
        locate(&self.ranges, width)
    }

    /// The category containing `width`.
    pub fn classify(&self, width: f64) -> Result<&BreakpointRange, DimensionError> {
        let idx = self.position(width)?;
        Ok(&self.ranges[idx])
    }

    /// Look a category up by name.
    pub fn get(&self, name: &str) -> Option<&BreakpointRange> {
        self.ranges.iter().find(|r| r.name == name)
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        Self {
            ranges: BREAKPOINTS.to_vec(),
        }
    }
}

/// Classify `width` against the default [`BREAKPOINTS`] table.
pub fn get_breakpoint(width: f64) -> Result<&'static BreakpointRange, DimensionError> {
    let idx = locate(&BREAKPOINTS, width)?;
    Ok(&BREAKPOINTS[idx])
}

/// Index of the first range containing `width`, saturating at the last one.
/// `ranges` must be non-empty.
fn locate(ranges: &[BreakpointRange], width: f64) -> Result<usize, DimensionError> {
    if width.is_nan() || width < 0.0 {
        return Err(DimensionError::InvalidDimension(width));
    }
    let last = ranges.len().saturating_sub(1);
    Ok(ranges
        .iter()
        .position(|r| r.contains(width))
        .unwrap_or(last))
}

fn validate(ranges: &[BreakpointRange]) -> Result<(), ConfigError> {
    if ranges.is_empty() {
        return Err(ConfigError::EmptyBreakpoints);
    }

    let mut expected = 0.0;
    for (i, range) in ranges.iter().enumerate() {
        if !range.min_width.is_finite() || (range.min_width - expected).abs() > f64::EPSILON {
            return Err(ConfigError::BreakpointGap {
                name: range.name.to_string(),
                expected,
                found: range.min_width,
            });
        }
        match range.max_width {
            Some(max) => {
                if !max.is_finite() || max <= range.min_width {
                    return Err(ConfigError::InvalidRange {
                        name: range.name.to_string(),
                    });
                }
                expected = max;
            }
            None if i + 1 < ranges.len() => {
                return Err(ConfigError::OpenRangeNotLast {
                    name: range.name.to_string(),
                });
            }
            None => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(name: &'static str, min: f64, max: Option<f64>) -> BreakpointRange {
        BreakpointRange::new(name, min, max)
    }

    #[test]
    fn classifies_default_table() {
        assert_eq!(get_breakpoint(0.0).map(|r| &*r.name), Ok("small"));
        assert_eq!(get_breakpoint(599.0).map(|r| &*r.name), Ok("small"));
        assert_eq!(get_breakpoint(600.0).map(|r| &*r.name), Ok("medium"));
        assert_eq!(get_breakpoint(1024.0).map(|r| &*r.name), Ok("large"));
        assert_eq!(get_breakpoint(f64::INFINITY).map(|r| &*r.name), Ok("large"));
    }

    #[test]
    fn negative_width_is_rejected() {
        assert_eq!(
            get_breakpoint(-1.0),
            Err(DimensionError::InvalidDimension(-1.0))
        );
        let table = BreakpointTable::default();
        assert!(matches!(
            table.classify(-0.5),
            Err(DimensionError::InvalidDimension(_))
        ));
        assert!(table.position(f64::NAN).is_err());
    }

    #[test]
    fn table_and_default_lookup_agree() {
        let table = BreakpointTable::default();
        for w in [0.0, 300.0, 599.999, 600.0, 899.0, 900.0, 1e6, -3.0, f64::NAN] {
            let via_table = table.classify(w).map(|r| r.name.to_string());
            let via_default = get_breakpoint(w).map(|r| r.name.to_string());
            match (via_table, via_default) {
                (Ok(a), Ok(b)) => assert_eq!(a, b, "width {w}"),
                (Err(_), Err(_)) => {}
                other => panic!("lookups disagree at width {w}: {other:?}"),
            }
        }
    }

    #[test]
    fn position_is_monotonic() {
        let table = BreakpointTable::default();
        let mut prev = 0;
        let mut w = 0.0;
        while w < 2000.0 {
            let idx = table.position(w).expect("non-negative width");
            assert!(idx >= prev, "index dropped at width {w}");
            prev = idx;
            w += 7.5;
        }
        assert_eq!(prev, 2);
    }

    #[test]
    fn closed_table_saturates_at_last_category() {
        let table = BreakpointTable::new(vec![
            range("narrow", 0.0, Some(320.0)),
            range("wide", 320.0, Some(1000.0)),
        ])
        .expect("valid table");
        assert_eq!(table.classify(5000.0).map(|r| &*r.name), Ok("wide"));
        assert_eq!(table.get("narrow").map(|r| r.max_width), Some(Some(320.0)));
    }

    #[test]
    fn rejects_malformed_tables() {
        assert!(matches!(
            BreakpointTable::new(vec![]),
            Err(ConfigError::EmptyBreakpoints)
        ));
        assert!(matches!(
            BreakpointTable::new(vec![range("a", 10.0, None)]),
            Err(ConfigError::BreakpointGap { .. })
        ));
        assert!(matches!(
            BreakpointTable::new(vec![range("a", 0.0, Some(100.0)), range("b", 120.0, None)]),
            Err(ConfigError::BreakpointGap { .. })
        ));
        assert!(matches!(
            BreakpointTable::new(vec![range("a", 0.0, Some(0.0))]),
            Err(ConfigError::InvalidRange { .. })
        ));
        assert!(matches!(
            BreakpointTable::new(vec![range("a", 0.0, None), range("b", 100.0, None)]),
            Err(ConfigError::OpenRangeNotLast { .. })
        ));
    }
}
