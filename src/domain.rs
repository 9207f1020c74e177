//! Vertical axis domain: explicit bounds or "auto" markers resolved against the data.

use serde::{Serialize, Serializer};

/// One end of an axis domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxisBound {
    /// A literal bound, passed through to the renderer verbatim.
    Value(f64),
    /// Computed from the dataset at draw time.
    Auto,
}

impl Serialize for AxisBound {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AxisBound::Value(v) => serializer.serialize_f64(*v),
            AxisBound::Auto => serializer.serialize_str("auto"),
        }
    }
}

/// `[min, max]` pair for the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisDomain {
    pub min: AxisBound,
    pub max: AxisBound,
}

/// Floor used when auto-scaling is off and no explicit minimum was given.
pub const DEFAULT_FLOOR: f64 = 0.0;

/// Compute the y-axis domain from the chart options.
///
/// - `auto_min` takes precedence over `min_value`: the floor becomes `Auto`, so small
///   series are scaled tightly instead of being anchored at zero.
/// - Otherwise the floor is `min_value`, or `0` when absent.
/// - The ceiling is `max_value`, or `Auto` when absent.
pub fn y_axis_domain(auto_min: bool, min_value: Option<f64>, max_value: Option<f64>) -> AxisDomain {
    let min = if auto_min {
        AxisBound::Auto
    } else {
        AxisBound::Value(min_value.unwrap_or(DEFAULT_FLOOR))
    };
    let max = max_value.map_or(AxisBound::Auto, AxisBound::Value);
    AxisDomain { min, max }
}

impl AxisDomain {
    /// Concrete `(low, high)` range given the data extent.
    ///
    /// Explicit bounds are used as-is; data outside them is not clamped here. When an explicit
    /// bound lands on the wrong side of an auto bound the two ends are swapped, so the result
    /// is always ordered. A zero-width range is widened by one unit on each side.
    pub fn resolve(&self, data_min: f64, data_max: f64) -> (f64, f64) {
        let (data_min, data_max) = if data_min.is_finite() && data_max.is_finite() {
            (data_min, data_max)
        } else {
            (0.0, 0.0)
        };
        let lo = match self.min {
            AxisBound::Value(v) => v,
            AxisBound::Auto => data_min,
        };
        let hi = match self.max {
            AxisBound::Value(v) => v,
            AxisBound::Auto => data_max,
        };
        let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
        if (hi - lo).abs() < f64::EPSILON {
            (lo - 1.0, hi + 1.0)
        } else {
            (lo, hi)
        }
    }
}
