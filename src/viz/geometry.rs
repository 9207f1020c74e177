//! Coordinate helpers: x scales, gap splitting and polygon clipping.

/// Point-scale position of row `i` of `n` in `0..=1`: first row at the left edge, last row
/// at the right edge. A single row sits in the middle.
pub fn point_x(i: usize, n: usize) -> f64 {
    if n <= 1 {
        0.5
    } else {
        i as f64 / (n - 1) as f64
    }
}

/// Horizontal extent of one bar inside band `band` (bands are one unit wide, `0..n`).
///
/// `gap_units` is the category gap as a fraction of the band and is applied in full on both
/// sides, so bars share `1 - 2 * gap_units` of the band. `bar_gap_units` separates
/// neighbouring bars of the same band when series are not stacked.
pub fn bar_span(
    band: usize,
    slot: usize,
    slots: usize,
    gap_units: f64,
    bar_gap_units: f64,
) -> (f64, f64) {
    let slots = slots.max(1);
    let inner = (1.0 - 2.0 * gap_units).max(0.0);
    let bar_gap = if slots > 1 {
        bar_gap_units.min(inner / (slots as f64 * 2.0))
    } else {
        0.0
    };
    let bar_w = ((inner - bar_gap * (slots as f64 - 1.0)) / slots as f64).max(0.0);
    let x0 = band as f64 + gap_units + slot as f64 * (bar_w + bar_gap);
    (x0, x0 + bar_w)
}

/// Split a series into runs of consecutive defined points.
///
/// With `connect` set, undefined points are skipped and everything forms a single run.
pub fn split_runs<T: Copy>(points: &[Option<T>], connect: bool) -> Vec<Vec<T>> {
    if connect {
        let run: Vec<T> = points.iter().flatten().copied().collect();
        return if run.is_empty() { Vec::new() } else { vec![run] };
    }
    let mut runs = Vec::new();
    let mut cur = Vec::new();
    for p in points {
        match p {
            Some(v) => cur.push(*v),
            None => {
                if !cur.is_empty() {
                    runs.push(std::mem::take(&mut cur));
                }
            }
        }
    }
    if !cur.is_empty() {
        runs.push(cur);
    }
    runs
}

/// Vertical extent `(min_y, max_y)` of a set of points.
pub fn y_extent<'a, I>(points: I) -> Option<(f64, f64)>
where
    I: IntoIterator<Item = &'a (f64, f64)>,
{
    points.into_iter().fold(None, |acc, &(_, y)| match acc {
        None => Some((y, y)),
        Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
    })
}

/// Clip a polygon to the horizontal slab `y_lo <= y <= y_hi` (Sutherland-Hodgman).
pub fn clip_to_band(poly: &[(f64, f64)], y_lo: f64, y_hi: f64) -> Vec<(f64, f64)> {
    let above = clip_half_plane(poly, |p| p.1 >= y_lo, y_lo);
    clip_half_plane(&above, |p| p.1 <= y_hi, y_hi)
}

fn clip_half_plane<F>(poly: &[(f64, f64)], inside: F, edge_y: f64) -> Vec<(f64, f64)>
where
    F: Fn(&(f64, f64)) -> bool,
{
    let mut out = Vec::with_capacity(poly.len() + 2);
    let Some(&last) = poly.last() else {
        return out;
    };
    let mut prev = last;
    for &cur in poly {
        match (inside(&prev), inside(&cur)) {
            (true, true) => out.push(cur),
            (true, false) => out.push(cross_y(prev, cur, edge_y)),
            (false, true) => {
                out.push(cross_y(prev, cur, edge_y));
                out.push(cur);
            }
            (false, false) => {}
        }
        prev = cur;
    }
    out
}

fn cross_y(a: (f64, f64), b: (f64, f64), y: f64) -> (f64, f64) {
    let dy = b.1 - a.1;
    if dy.abs() < f64::EPSILON {
        return (a.0, y);
    }
    let t = (y - a.1) / dy;
    (a.0 + (b.0 - a.0) * t, y)
}
