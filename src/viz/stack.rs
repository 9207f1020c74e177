//! Series extraction and stacking.

use serde_json::Value;

use crate::compose::{ChartDescription, StackOffset};
use crate::models::Row;

/// Numeric value of `key` in `row`; `None` for missing, null or non-numeric values.
pub fn numeric_value(row: &Row, key: &str) -> Option<f64> {
    row.get(key).and_then(Value::as_f64).filter(|v| v.is_finite())
}

/// Per-row `(lower, upper)` values of one series, `None` where the series has no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub key: String,
    pub spans: Vec<Option<(f64, f64)>>,
}

impl Layer {
    /// All finite bounds of the layer, for domain computation.
    pub fn bounds(&self) -> impl Iterator<Item = f64> + '_ {
        self.spans.iter().flatten().flat_map(|&(lo, hi)| [lo, hi])
    }
}

/// Build one layer per series.
///
/// Stacked series accumulate in series order per row; a missing value adds nothing to the
/// stack and leaves a gap in its own layer. With [`StackOffset::Expand`] every row is divided
/// by its total so the stack spans `[0, 1]`. Unstacked series span from `baseline` to their
/// value.
pub fn build_layers(desc: &ChartDescription, baseline: f64) -> Vec<Layer> {
    let keys: Vec<&str> = desc.categories().collect();
    let mut layers: Vec<Layer> = keys
        .iter()
        .map(|k| Layer {
            key: (*k).to_string(),
            spans: Vec::with_capacity(desc.data.len()),
        })
        .collect();

    let mut skipped = 0usize;
    for row in &desc.data {
        let values: Vec<Option<f64>> = keys.iter().map(|k| numeric_value(row, k)).collect();
        skipped += keys
            .iter()
            .zip(&values)
            .filter(|(k, v)| v.is_none() && row.get(**k).is_some_and(|raw| !raw.is_null()))
            .count();

        if !desc.is_stacked() {
            for (layer, v) in layers.iter_mut().zip(&values) {
                layer.spans.push(v.map(|v| (baseline, v)));
            }
            continue;
        }

        let total: f64 = values.iter().flatten().sum();
        let scale = match desc.stack_offset {
            StackOffset::Expand if total != 0.0 => 1.0 / total,
            StackOffset::Expand => 0.0,
            StackOffset::None => 1.0,
        };
        let mut cum = 0.0;
        for (layer, v) in layers.iter_mut().zip(&values) {
            let lower = cum;
            cum += v.unwrap_or(0.0) * scale;
            layer.spans.push(v.map(|_| (lower, cum)));
        }
    }

    if skipped > 0 {
        log::warn!(
            "{}: {} non-numeric value(s) left as gaps",
            desc.instance_id,
            skipped
        );
    }
    layers
}

/// Data extent over all layers, `None` when no series has a value.
pub fn layers_extent(layers: &[Layer]) -> Option<(f64, f64)> {
    layers
        .iter()
        .flat_map(|layer| layer.bounds())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
        })
}

/// Data extent of raw values (unstacked series), ignoring the baseline.
pub fn values_extent(desc: &ChartDescription) -> Option<(f64, f64)> {
    let keys: Vec<&str> = desc.categories().collect();
    desc.data
        .iter()
        .flat_map(|row| keys.iter().filter_map(move |k| numeric_value(row, k)))
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
