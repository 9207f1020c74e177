//! Options objects for the three spark charts.
//!
//! Every field has a static default, documented on the field. Field names deserialize from
//! camelCase (`autoMinValue`, `barCategoryGap`, ...) so an options object written for a web
//! frontend can be loaded unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::models::{BarCategoryGap, Category, FillStyle, Row, Size, StackMode};
use crate::palette::{AVAILABLE_CHART_COLORS, ColorToken};
use crate::storage::LoadError;

fn default_colors() -> Vec<ColorToken> {
    AVAILABLE_CHART_COLORS.to_vec()
}

/// Options shared by every spark chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkOptions {
    /// Rows to plot. Default: empty.
    pub data: Vec<Row>,
    /// Series keys, in colour and stacking order. Default: empty.
    pub categories: Vec<Category>,
    /// Row key used as the horizontal position. Default: `""`.
    pub index: String,
    /// Palette. Default: the built-in palette.
    pub colors: Vec<ColorToken>,
    /// Let the floor of the y axis follow the data. Default: `false`.
    pub auto_min_value: bool,
    /// Explicit y floor. Ignored when `auto_min_value` is set. Default: none (0).
    pub min_value: Option<f64>,
    /// Explicit y ceiling. Default: none ("auto").
    pub max_value: Option<f64>,
    /// Extra container class appended to `h-12 w-28`. Default: none.
    pub class_name: Option<String>,
    /// Container size in pixels. Default: 112 x 48.
    pub size: Size,
    /// Pass-through attributes for the root container. Default: empty.
    pub attrs: BTreeMap<String, String>,
}

impl Default for SparkOptions {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            categories: Vec::new(),
            index: String::new(),
            colors: default_colors(),
            auto_min_value: false,
            min_value: None,
            max_value: None,
            class_name: None,
            size: Size::default(),
            attrs: BTreeMap::new(),
        }
    }
}

/// Area spark options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkAreaConfig {
    #[serde(flatten)]
    pub options: SparkOptions,
    /// Bridge gaps left by null values. Default: `false`.
    pub connect_nulls: bool,
    /// Layering of series. Default: `default`.
    #[serde(rename = "type")]
    pub stack: StackMode,
    /// Area fill. Default: `gradient`.
    pub fill: FillStyle,
}

/// Line spark options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkLineConfig {
    #[serde(flatten)]
    pub options: SparkOptions,
    /// Bridge gaps left by null values. Default: `false`.
    pub connect_nulls: bool,
}

/// Bar spark options.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SparkBarConfig {
    #[serde(flatten)]
    pub options: SparkOptions,
    /// Layering of series. Default: `default`.
    #[serde(rename = "type")]
    pub stack: StackMode,
    /// Spacing between bar categories. Default: none (the renderer uses 10%).
    pub bar_category_gap: Option<BarCategoryGap>,
}

/// Read a JSON options object from disk.
pub fn load_json<T, P>(path: P) -> Result<T, LoadError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let text = fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}
