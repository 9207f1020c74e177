//! Lowering a chart description to drawable primitives in data coordinates.

use plotters::style::ShapeStyle;

use super::geometry::{bar_span, clip_to_band, point_x, split_runs, y_extent};
use super::stack::{Layer, build_layers, layers_extent, values_extent};
use crate::compose::{ChartDescription, ChartKind, SeriesFill, SeriesSpec};
use crate::viz_plotters_adapter::{fill_style, stroke_style};

/// Horizontal bands used to approximate a vertical gradient.
pub const GRADIENT_BANDS: usize = 24;

/// Default spacing between bars of the same category, in pixels.
pub const BAR_GAP_PX: f64 = 4.0;

/// A drawable element.
#[derive(Clone)]
pub enum Primitive {
    Polygon {
        points: Vec<(f64, f64)>,
        style: ShapeStyle,
    },
    Path {
        points: Vec<(f64, f64)>,
        style: ShapeStyle,
    },
    Rect {
        corners: [(f64, f64); 2],
        style: ShapeStyle,
    },
}

/// Primitives plus the coordinate ranges they live in.
#[derive(Clone)]
pub struct Scene {
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
    pub layers: Vec<Layer>,
    pub primitives: Vec<Primitive>,
}

/// Lower `desc` to a scene. `plot_width_px` converts pixel gaps for bars into band units.
pub fn build_scene(desc: &ChartDescription, plot_width_px: f64) -> Scene {
    let domain = desc.y_domain().unwrap_or(crate::domain::y_axis_domain(false, None, None));

    let (layers, y_range) = if desc.is_stacked() {
        let layers = build_layers(desc, 0.0);
        let (lo, hi) = layers_extent(&layers).unwrap_or((0.0, 0.0));
        (layers, domain.resolve(lo, hi))
    } else {
        let (lo, hi) = values_extent(desc).unwrap_or((0.0, 0.0));
        let y_range = domain.resolve(lo, hi);
        let baseline = y_range.0.min(y_range.1).max(0.0);
        (build_layers(desc, baseline), y_range)
    };

    let n = desc.data.len();
    let x_range = match desc.kind {
        ChartKind::Bar => (0.0, n.max(1) as f64),
        ChartKind::Area | ChartKind::Line => (0.0, 1.0),
    };

    let mut primitives = Vec::new();
    match desc.kind {
        ChartKind::Area | ChartKind::Line => {
            for (series, layer) in desc.series.iter().zip(&layers) {
                lower_area_or_line(desc, series, layer, n, &mut primitives);
            }
        }
        ChartKind::Bar => lower_bars(desc, &layers, n, plot_width_px, &mut primitives),
    }

    Scene {
        x_range,
        y_range,
        layers,
        primitives,
    }
}

fn lower_area_or_line(
    desc: &ChartDescription,
    series: &SeriesSpec,
    layer: &Layer,
    n: usize,
    out: &mut Vec<Primitive>,
) {
    let spans: Vec<Option<(f64, f64, f64)>> = layer
        .spans
        .iter()
        .enumerate()
        .map(|(i, s)| s.map(|(lo, hi)| (point_x(i, n), lo, hi)))
        .collect();
    let runs = split_runs(&spans, series.connect_nulls);

    if let SeriesFill::Gradient { id } = &series.fill
        && let Some(gradient) = desc.gradient(id)
    {
        let polygons: Vec<Vec<(f64, f64)>> = runs
            .iter()
            .map(|run| {
                let mut poly: Vec<(f64, f64)> = run.iter().map(|&(x, _, hi)| (x, hi)).collect();
                poly.extend(run.iter().rev().map(|&(x, lo, _)| (x, lo)));
                poly
            })
            .collect();

        let constant = gradient
            .stops
            .windows(2)
            .all(|w| (w[0].opacity - w[1].opacity).abs() < f64::EPSILON);
        if constant {
            let opacity = gradient.opacity_at(0.0);
            if opacity > 0.0 {
                for poly in &polygons {
                    out.push(Primitive::Polygon {
                        points: poly.clone(),
                        style: fill_style(&gradient.color, opacity),
                    });
                }
            }
        } else if let Some((y_min, y_max)) = y_extent(polygons.iter().flatten()) {
            let height = y_max - y_min;
            if height > 0.0 {
                let step = height / GRADIENT_BANDS as f64;
                for band in 0..GRADIENT_BANDS {
                    // t runs from the top of the region (0) to its bottom (1).
                    let t = (band as f64 + 0.5) / GRADIENT_BANDS as f64;
                    let opacity = gradient.opacity_at(t);
                    if opacity <= 0.0 {
                        continue;
                    }
                    let hi = y_max - band as f64 * step;
                    let lo = hi - step;
                    for poly in &polygons {
                        let clipped = clip_to_band(poly, lo, hi);
                        if clipped.len() >= 3 {
                            out.push(Primitive::Polygon {
                                points: clipped,
                                style: fill_style(&gradient.color, opacity),
                            });
                        }
                    }
                }
            }
        }
    }

    if let Some(stroke) = &series.stroke {
        for run in &runs {
            out.push(Primitive::Path {
                points: run.iter().map(|&(x, _, hi)| (x, hi)).collect(),
                style: stroke_style(stroke),
            });
        }
    }
}

fn lower_bars(
    desc: &ChartDescription,
    layers: &[Layer],
    n: usize,
    plot_width_px: f64,
    out: &mut Vec<Primitive>,
) {
    if n == 0 {
        return;
    }
    let band_px = plot_width_px / n as f64;
    let gap = desc.bar_category_gap.unwrap_or_default();
    let gap_units = if band_px > 0.0 {
        gap.to_pixels(band_px) / band_px
    } else {
        0.0
    };
    let bar_gap_units = if band_px > 0.0 {
        BAR_GAP_PX / band_px
    } else {
        0.0
    };

    let stacked = desc.is_stacked();
    let slots = if stacked { 1 } else { layers.len() };

    for (slot, (series, layer)) in desc.series.iter().zip(layers).enumerate() {
        let SeriesFill::Color { color } = &series.fill else {
            continue;
        };
        let style = fill_style(color, 1.0);
        let slot = if stacked { 0 } else { slot };
        for (band, span) in layer.spans.iter().enumerate() {
            let Some((lo, hi)) = *span else {
                continue;
            };
            let (x0, x1) = bar_span(band, slot, slots, gap_units, bar_gap_units);
            if x1 <= x0 {
                continue;
            }
            out.push(Primitive::Rect {
                corners: [(x0, lo.min(hi)), (x1, lo.max(hi))],
                style,
            });
        }
    }
}
