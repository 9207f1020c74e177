//! Public spark chart components.
//!
//! Each component owns its options and an instance id. The id is assigned once, when the
//! component is constructed, and namespaces the gradient definitions so several charts can
//! share one SVG document without colliding. Every call to [`SparkAreaChart::describe`] (and
//! its siblings) is a pure function of the current options.

use anyhow::Result;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::compose::{
    ChartDescription, ComposeInput, ContainerSpec, compose_area, compose_bar, compose_line,
};
use crate::config::{SparkAreaConfig, SparkBarConfig, SparkLineConfig, SparkOptions};
use crate::domain::y_axis_domain;
use crate::normalize::normalize_rows;
use crate::palette::construct_category_colors;
use crate::viz;

static NEXT_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Process-unique instance id, e.g. `spark-7`.
pub fn next_instance_id() -> String {
    format!("spark-{}", NEXT_INSTANCE.fetch_add(1, Ordering::Relaxed))
}

/// Normalize, colour and scale the options, then hand them to `compose`.
fn describe_with<F>(instance_id: &str, options: &SparkOptions, compose: F) -> ChartDescription
where
    F: FnOnce(ComposeInput<'_>) -> ChartDescription,
{
    let rows = normalize_rows(&options.data, &options.categories);
    let colors = construct_category_colors(&options.categories, &options.colors);
    let domain = y_axis_domain(options.auto_min_value, options.min_value, options.max_value);
    compose(ComposeInput {
        instance_id,
        rows,
        categories: &options.categories,
        index: &options.index,
        colors: &colors,
        domain,
        size: options.size,
        container: ContainerSpec::new(options.class_name.as_deref(), &options.attrs),
    })
}

macro_rules! spark_component {
    ($(#[$doc:meta])* $name:ident, $config:ty) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $name {
            id: String,
            pub config: $config,
        }

        impl $name {
            /// Create a component with a freshly allocated instance id.
            pub fn new(config: $config) -> Self {
                Self {
                    id: next_instance_id(),
                    config,
                }
            }

            /// Create a component with a caller-supplied instance id.
            pub fn with_id(id: impl Into<String>, config: $config) -> Self {
                Self {
                    id: id.into(),
                    config,
                }
            }

            pub fn id(&self) -> &str {
                &self.id
            }

            /// Render to `.svg` or `.png` (inferred from the extension).
            pub fn render<P: AsRef<Path>>(&self, out_path: P) -> Result<()> {
                viz::render_to_file(&self.describe(), out_path)
            }

            /// Render to an in-memory SVG document.
            pub fn render_svg_string(&self) -> Result<String> {
                viz::render_svg_string(&self.describe())
            }
        }
    };
}

spark_component!(
    /// Small area chart: filled regions with a gradient, solid or invisible fill.
    SparkAreaChart,
    SparkAreaConfig
);

spark_component!(
    /// Small line chart: one stroke per category.
    SparkLineChart,
    SparkLineConfig
);

spark_component!(
    /// Small bar chart, optionally stacked or percent-stacked.
    SparkBarChart,
    SparkBarConfig
);

impl SparkAreaChart {
    pub fn describe(&self) -> ChartDescription {
        let cfg = &self.config;
        describe_with(&self.id, &cfg.options, |input| {
            compose_area(input, cfg.stack, cfg.fill, cfg.connect_nulls)
        })
    }
}

impl SparkLineChart {
    pub fn describe(&self) -> ChartDescription {
        let cfg = &self.config;
        describe_with(&self.id, &cfg.options, |input| {
            compose_line(input, cfg.connect_nulls)
        })
    }
}

impl SparkBarChart {
    pub fn describe(&self) -> ChartDescription {
        let cfg = &self.config;
        describe_with(&self.id, &cfg.options, |input| {
            compose_bar(input, cfg.stack, cfg.bar_category_gap)
        })
    }
}
