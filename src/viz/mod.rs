//! Rendering layer: draw a [`ChartDescription`] to **SVG** or **PNG** with plotters.
//!
//! - Axes are hidden; they only fix the coordinate ranges
//! - Point x scale for area/line, band x scale for bars
//! - Stacked and percent-stacked layering
//! - Vertical fill gradients approximated by banded polygons

pub mod geometry;
pub mod scene;
pub mod stack;

pub use scene::{Primitive, Scene, build_scene};

use crate::compose::ChartDescription;
use anyhow::{Result, anyhow};

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;

/// Width of the plotted area in pixels, after margins.
pub fn plot_width_px(desc: &ChartDescription) -> f64 {
    f64::from(
        desc.size
            .width
            .saturating_sub(desc.margin.left + desc.margin.right),
    )
}

/// Render to a file; `.svg` selects the SVG backend, anything else a PNG bitmap.
pub fn render_to_file<P: AsRef<Path>>(desc: &ChartDescription, out_path: P) -> Result<()> {
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let (w, h) = (desc.size.width.max(1), desc.size.height.max(1));

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        draw_description(root, desc, None)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (w, h)).into_drawing_area();
        // Bitmaps have no transparency by default; paint a white canvas first.
        draw_description(root, desc, Some(WHITE))?;
    }
    Ok(())
}

/// Render to an SVG document in memory.
pub fn render_svg_string(desc: &ChartDescription) -> Result<String> {
    let mut buf = String::new();
    {
        let (w, h) = (desc.size.width.max(1), desc.size.height.max(1));
        let root = SVGBackend::with_string(&mut buf, (w, h)).into_drawing_area();
        draw_description(root, desc, None)?;
    }
    Ok(buf)
}

/// Draw to any Plotters backend.
pub fn draw_description<DB>(
    root: DrawingArea<DB, Shift>,
    desc: &ChartDescription,
    background: Option<RGBColor>,
) -> Result<()>
where
    DB: DrawingBackend,
{
    if let Some(bg) = background {
        root.fill(&bg).map_err(|e| anyhow!("{:?}", e))?;
    }

    let scene = build_scene(desc, plot_width_px(desc));
    let (x0, x1) = scene.x_range;
    let (y0, y1) = scene.y_range;

    // No label areas and no mesh: both axes stay hidden.
    let mut chart = ChartBuilder::on(&root)
        .margin_top(desc.margin.top)
        .margin_right(desc.margin.right)
        .margin_bottom(desc.margin.bottom)
        .margin_left(desc.margin.left)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow!("{:?}", e))?;

    for primitive in scene.primitives {
        let drawn = match primitive {
            Primitive::Polygon { points, style } => chart
                .draw_series(std::iter::once(Polygon::new(points, style)))
                .map(|_| ()),
            Primitive::Path { points, style } => chart
                .draw_series(std::iter::once(PathElement::new(points, style)))
                .map(|_| ()),
            Primitive::Rect { corners, style } => chart
                .draw_series(std::iter::once(Rectangle::new(corners, style)))
                .map(|_| ()),
        };
        drawn.map_err(|e| anyhow!("{:?}", e))?;
    }

    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}
