//! Adapter helpers to turn description colours into plotters styles.
//!
//! Colours are resolved per element from the `(token, purpose)` pair stored in the
//! description, so a series' stroke and its gradient can resolve independently.
//!
//! ```ignore
//!     use plotters::prelude::*;
//!     use crate::viz_plotters_adapter::{fill_style, stroke_style};
//!
//!     // For each series of a ChartDescription:
//!     if let Some(stroke) = &series.stroke {
//!         chart.draw_series(LineSeries::new(points, stroke_style(stroke)))?;
//!     }
//!     chart.draw_series(std::iter::once(Polygon::new(poly, fill_style(&gradient.color, 0.4))))?;
//! ```

use plotters::prelude::*;

use crate::compose::{ColorRef, StrokeSpec};
use crate::palette::{ColorPurpose, ColorToken};

pub fn rgb_color(token: ColorToken) -> RGBColor {
    let rgb = token.rgb();
    RGBColor(rgb.r, rgb.g, rgb.b)
}

/// Resolve a colour for one element. Every purpose maps to the token's base shade; the
/// purpose decides only how the colour is applied.
pub fn resolve(token: ColorToken, _purpose: ColorPurpose, opacity: f64) -> RGBAColor {
    rgb_color(token).mix(opacity.clamp(0.0, 1.0))
}

/// Build a ShapeStyle for line strokes.
/// Plotters has no round joins/caps; the width and opacity are honoured.
pub fn stroke_style(stroke: &StrokeSpec) -> ShapeStyle {
    ShapeStyle {
        color: resolve(stroke.color.token, stroke.color.purpose, stroke.opacity),
        filled: false,
        stroke_width: stroke.width,
    }
}

/// Build a filled style for bars and area bands.
pub fn fill_style(color: &ColorRef, opacity: f64) -> ShapeStyle {
    resolve(color.token, color.purpose, opacity).filled()
}
