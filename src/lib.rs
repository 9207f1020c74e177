//! spark_charts
//!
//! Small inline area, line and bar charts ("spark charts"). Options are turned into a
//! renderer-neutral [`ChartDescription`], which the `viz` module draws to SVG or PNG.
//! Pairs with the `spark` CLI.
//!
//! ### Pipeline
//! - Backfill missing category keys with zero ([`normalize`])
//! - Assign palette colours to categories by position ([`palette`])
//! - Resolve the y-axis domain from `autoMinValue` / `minValue` / `maxValue` ([`domain`])
//! - Compose the area, line or bar description ([`compose`])
//!
//! ### Example
//! ```no_run
//! use spark_charts::{SparkAreaChart, SparkAreaConfig, StackMode};
//! use serde_json::json;
//!
//! let mut config = SparkAreaConfig::default();
//! config.options.data = vec![
//!     json!({"t": 1, "a": 3}).as_object().cloned().unwrap(),
//!     json!({"t": 2, "b": 7}).as_object().cloned().unwrap(),
//! ];
//! config.options.categories = vec!["a".into(), "b".into()];
//! config.options.index = "t".into();
//! config.stack = StackMode::Stacked;
//!
//! let chart = SparkAreaChart::new(config);
//! chart.render("trend.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod compose;
pub mod config;
pub mod domain;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod storage;
pub mod viz;
pub mod viz_plotters_adapter;

pub use chart::{SparkAreaChart, SparkBarChart, SparkLineChart};
pub use compose::ChartDescription;
pub use config::{SparkAreaConfig, SparkBarConfig, SparkLineConfig, SparkOptions};
pub use domain::{AxisBound, AxisDomain, y_axis_domain};
pub use models::{BarCategoryGap, Category, FillStyle, Row, StackMode};
pub use normalize::normalize_rows;
pub use palette::{ColorPurpose, ColorToken, construct_category_colors};
