//! Render composers: turn normalized rows, colours and a domain into a chart description.
//!
//! A [`ChartDescription`] is what the rendering layer consumes. It is plain data, serializable
//! to JSON, and carries no drawing state.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::AxisDomain;
use crate::models::{
    BarCategoryGap, Category, FillStyle, Margin, Row, SPARK_MARGIN, Size, StackMode,
};
use crate::palette::{CategoryColors, ColorPurpose, ColorToken, color_class_name};

/// Stack identifier shared by all series when stacking is on.
pub const STACK_ID: &str = "stack";

/// Container class applied before any caller class (`h-12 w-28`).
pub const DEFAULT_CONTAINER_CLASS: &str = "h-12 w-28";

/// Chart kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Area,
    Line,
    Bar,
}

/// Whether stacked series are normalized per data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StackOffset {
    None,
    /// Each point's stack is scaled to fractions of its total (`[0, 1]`).
    Expand,
}

/// A colour token together with what it is used for and its class name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorRef {
    pub token: ColorToken,
    pub purpose: ColorPurpose,
    pub class_name: String,
}

impl ColorRef {
    pub fn new(token: ColorToken, purpose: ColorPurpose) -> Self {
        Self {
            token,
            purpose,
            class_name: color_class_name(token, purpose),
        }
    }
}

/// Outline of a series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeSpec {
    pub color: ColorRef,
    pub width: u32,
    pub opacity: f64,
    pub line_join: &'static str,
    pub line_cap: &'static str,
}

impl StrokeSpec {
    /// 2px rounded stroke used by area and line sparks.
    fn spark(token: ColorToken) -> Self {
        Self {
            color: ColorRef::new(token, ColorPurpose::Stroke),
            width: 2,
            opacity: 1.0,
            line_join: "round",
            line_cap: "round",
        }
    }
}

/// How a series is filled.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SeriesFill {
    /// Unfilled (lines).
    None,
    /// Reference to a [`GradientDef`] by id.
    Gradient { id: String },
    /// Plain colour fill (bars).
    Color { color: ColorRef },
}

/// One series in the description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub kind: ChartKind,
    pub name: Category,
    pub data_key: Category,
    pub token: ColorToken,
    pub stroke: Option<StrokeSpec>,
    pub fill: SeriesFill,
    pub stack_id: Option<&'static str>,
    pub connect_nulls: bool,
    pub dot: bool,
    pub curve: &'static str,
    pub animate: bool,
}

/// One stop of a fill gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    /// Position along the gradient, `0.0..=1.0`.
    pub offset: f64,
    pub opacity: f64,
}

/// Vertical fill definition for one area series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientDef {
    pub id: String,
    pub color: ColorRef,
    pub stops: Vec<GradientStop>,
}

impl GradientDef {
    /// Opacity at `t` (0 = top of the region, 1 = bottom).
    ///
    /// Before the first stop the first opacity holds, after the last stop the last opacity
    /// holds, and values in between are interpolated linearly.
    pub fn opacity_at(&self, t: f64) -> f64 {
        let Some(first) = self.stops.first() else {
            return 0.0;
        };
        if t <= first.offset {
            return first.opacity;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                if span <= f64::EPSILON {
                    return b.opacity;
                }
                return a.opacity + (b.opacity - a.opacity) * (t - a.offset) / span;
            }
        }
        self.stops.last().map_or(0.0, |s| s.opacity)
    }
}

/// Stops for an area fill.
///
/// - `Gradient`: 40% at 5%, fading to 0 at 95%.
/// - `Solid`: one stop at 30%.
/// - `None`: two stops, both fully transparent.
pub fn fill_stops(fill: FillStyle) -> Vec<GradientStop> {
    match fill {
        FillStyle::Gradient => vec![
            GradientStop {
                offset: 0.05,
                opacity: 0.4,
            },
            GradientStop {
                offset: 0.95,
                opacity: 0.0,
            },
        ],
        FillStyle::Solid => vec![GradientStop {
            offset: 0.0,
            opacity: 0.3,
        }],
        FillStyle::None => vec![
            GradientStop {
                offset: 0.0,
                opacity: 0.0,
            },
            GradientStop {
                offset: 1.0,
                opacity: 0.0,
            },
        ],
    }
}

/// Gradient id for a category, namespaced by the chart instance.
///
/// Characters outside `[A-Za-z0-9]` are dropped from the category.
pub fn gradient_id(instance_id: &str, category: &str) -> String {
    let cleaned: String = category.chars().filter(char::is_ascii_alphanumeric).collect();
    format!("{instance_id}-{cleaned}")
}

/// Hidden axis; it still constrains scale and layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisSpec {
    pub hide: bool,
    pub data_key: Option<String>,
    pub domain: Option<AxisDomain>,
}

/// Root container attributes: merged class and pass-through attributes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ContainerSpec {
    pub class_name: String,
    pub attrs: BTreeMap<String, String>,
}

impl ContainerSpec {
    pub fn new(class_name: Option<&str>, attrs: &BTreeMap<String, String>) -> Self {
        let class_name = match class_name.map(str::trim).filter(|c| !c.is_empty()) {
            Some(extra) => format!("{DEFAULT_CONTAINER_CLASS} {extra}"),
            None => DEFAULT_CONTAINER_CLASS.to_string(),
        };
        Self {
            class_name,
            attrs: attrs.clone(),
        }
    }
}

/// Renderer-neutral description of one spark chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDescription {
    pub kind: ChartKind,
    pub instance_id: String,
    pub data: Vec<Row>,
    pub x_axis: AxisSpec,
    pub y_axis: AxisSpec,
    pub series: Vec<SeriesSpec>,
    pub stack_offset: StackOffset,
    pub gradients: Vec<GradientDef>,
    pub margin: Margin,
    pub size: Size,
    pub bar_category_gap: Option<BarCategoryGap>,
    pub container: ContainerSpec,
}

impl ChartDescription {
    pub fn y_domain(&self) -> Option<AxisDomain> {
        self.y_axis.domain
    }

    pub fn gradient(&self, id: &str) -> Option<&GradientDef> {
        self.gradients.iter().find(|g| g.id == id)
    }

    pub fn is_stacked(&self) -> bool {
        self.series.iter().any(|s| s.stack_id.is_some())
    }

    /// Category keys in drawing order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.series.iter().map(|s| s.data_key.as_str())
    }
}

/// Inputs shared by all composers.
#[derive(Debug, Clone)]
pub struct ComposeInput<'a> {
    pub instance_id: &'a str,
    pub rows: Vec<Row>,
    pub categories: &'a [Category],
    pub index: &'a str,
    pub colors: &'a CategoryColors,
    pub domain: AxisDomain,
    pub size: Size,
    pub container: ContainerSpec,
}

impl ComposeInput<'_> {
    fn token(&self, category: &str) -> ColorToken {
        self.colors.get(category).unwrap_or(ColorToken::Gray)
    }

    fn into_description(
        self,
        kind: ChartKind,
        series: Vec<SeriesSpec>,
        stack_offset: StackOffset,
        gradients: Vec<GradientDef>,
        bar_category_gap: Option<BarCategoryGap>,
    ) -> ChartDescription {
        ChartDescription {
            kind,
            instance_id: self.instance_id.to_string(),
            data: self.rows,
            x_axis: AxisSpec {
                hide: true,
                data_key: Some(self.index.to_string()),
                domain: None,
            },
            y_axis: AxisSpec {
                hide: true,
                data_key: None,
                domain: Some(self.domain),
            },
            series,
            stack_offset,
            gradients,
            margin: SPARK_MARGIN,
            size: self.size,
            bar_category_gap,
            container: self.container,
        }
    }
}

fn stack_settings(stack: StackMode) -> (Option<&'static str>, StackOffset) {
    let stack_id = stack.is_stacked().then_some(STACK_ID);
    let offset = if stack == StackMode::Percent {
        StackOffset::Expand
    } else {
        StackOffset::None
    };
    (stack_id, offset)
}

/// Area spark: one filled region per category plus its fill definition.
pub fn compose_area(
    input: ComposeInput<'_>,
    stack: StackMode,
    fill: FillStyle,
    connect_nulls: bool,
) -> ChartDescription {
    let (stack_id, offset) = stack_settings(stack);
    let stops = fill_stops(fill);

    let mut series = Vec::with_capacity(input.categories.len());
    let mut gradients = Vec::with_capacity(input.categories.len());
    for category in input.categories {
        let token = input.token(category);
        let id = gradient_id(input.instance_id, category);
        gradients.push(GradientDef {
            id: id.clone(),
            color: ColorRef::new(token, ColorPurpose::Text),
            stops: stops.clone(),
        });
        series.push(SeriesSpec {
            kind: ChartKind::Area,
            name: category.clone(),
            data_key: category.clone(),
            token,
            stroke: Some(StrokeSpec::spark(token)),
            fill: SeriesFill::Gradient { id },
            stack_id,
            connect_nulls,
            dot: false,
            curve: "linear",
            animate: false,
        });
    }

    log::debug!(
        "area spark {}: {} rows, categories {:?}, index {:?}, fill {:?}",
        input.instance_id,
        input.rows.len(),
        input.categories,
        input.index,
        fill
    );

    input.into_description(ChartKind::Area, series, offset, gradients, None)
}

/// Line spark: one unfilled stroke per category, never stacked.
pub fn compose_line(input: ComposeInput<'_>, connect_nulls: bool) -> ChartDescription {
    let series = input
        .categories
        .iter()
        .map(|category| {
            let token = input.token(category);
            SeriesSpec {
                kind: ChartKind::Line,
                name: category.clone(),
                data_key: category.clone(),
                token,
                stroke: Some(StrokeSpec::spark(token)),
                fill: SeriesFill::None,
                stack_id: None,
                connect_nulls,
                dot: false,
                curve: "linear",
                animate: false,
            }
        })
        .collect();

    input.into_description(ChartKind::Line, series, StackOffset::None, Vec::new(), None)
}

/// Bar spark: one filled bar series per category.
pub fn compose_bar(
    input: ComposeInput<'_>,
    stack: StackMode,
    bar_category_gap: Option<BarCategoryGap>,
) -> ChartDescription {
    let (stack_id, offset) = stack_settings(stack);
    let series = input
        .categories
        .iter()
        .map(|category| {
            let token = input.token(category);
            SeriesSpec {
                kind: ChartKind::Bar,
                name: category.clone(),
                data_key: category.clone(),
                token,
                stroke: None,
                fill: SeriesFill::Color {
                    color: ColorRef::new(token, ColorPurpose::Fill),
                },
                stack_id,
                connect_nulls: false,
                dot: false,
                curve: "linear",
                animate: false,
            }
        })
        .collect();

    input.into_description(
        ChartKind::Bar,
        series,
        offset,
        Vec::new(),
        Some(bar_category_gap.unwrap_or_default()),
    )
}
