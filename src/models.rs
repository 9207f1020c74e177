use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One record of tabular input: category keys hold numbers, the index key holds anything.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Name of one data series plotted within a chart.
pub type Category = String;

/// How multiple series are layered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StackMode {
    /// Series are drawn independently from the baseline.
    #[default]
    Default,
    /// Series share one stack and are layered on top of each other.
    Stacked,
    /// Like `Stacked`, but each data point is normalized to fractions of its total.
    Percent,
}

impl StackMode {
    /// Whether series share a stack identifier.
    pub fn is_stacked(self) -> bool {
        matches!(self, StackMode::Stacked | StackMode::Percent)
    }
}

/// Fill of the area chart's regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillStyle {
    /// Vertical fade from 40% opacity to transparent.
    #[default]
    Gradient,
    /// Constant 30% opacity.
    Solid,
    /// Invisible fill, only the stroke is visible.
    None,
}

/// Spacing between bar categories.
///
/// Accepts either a percentage of the band (`"10%"`) or an absolute number of pixels (`4`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BarCategoryGap {
    Percent(f64),
    Pixels(f64),
}

impl Default for BarCategoryGap {
    fn default() -> Self {
        BarCategoryGap::Percent(10.0)
    }
}

impl BarCategoryGap {
    /// Gap in pixels on each side of a band of `band_px` pixels. Never exceeds half the band.
    pub fn to_pixels(self, band_px: f64) -> f64 {
        let gap = match self {
            BarCategoryGap::Percent(p) => band_px * p / 100.0,
            BarCategoryGap::Pixels(px) => px,
        };
        gap.clamp(0.0, band_px.max(0.0) / 2.0)
    }
}

impl fmt::Display for BarCategoryGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarCategoryGap::Percent(p) => write!(f, "{p}%"),
            BarCategoryGap::Pixels(px) => write!(f, "{px}"),
        }
    }
}

impl FromStr for BarCategoryGap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(p) = s.strip_suffix('%') {
            p.trim()
                .parse::<f64>()
                .map(BarCategoryGap::Percent)
                .map_err(|e| format!("invalid percentage {s:?}: {e}"))
        } else {
            s.parse::<f64>()
                .map(BarCategoryGap::Pixels)
                .map_err(|e| format!("invalid gap {s:?}: {e}"))
        }
    }
}

impl Serialize for BarCategoryGap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            BarCategoryGap::Percent(_) => serializer.serialize_str(&self.to_string()),
            BarCategoryGap::Pixels(px) => serializer.serialize_f64(*px),
        }
    }
}

/// Serde helper: parse a gap from either a JSON number or a `"NN%"` string.
impl<'de> Deserialize<'de> for BarCategoryGap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct GapVisitor;

        impl<'de> Visitor<'de> for GapVisitor {
            type Value = BarCategoryGap;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number of pixels or a percentage string like \"10%\"")
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(BarCategoryGap::Pixels(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(BarCategoryGap::Pixels(v as f64))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(BarCategoryGap::Pixels(v as f64))
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                s.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(GapVisitor)
    }
}

/// Bounding box of the chart container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Default for Size {
    /// `h-12 w-28`: 48 high, 112 wide.
    fn default() -> Self {
        Self {
            width: 112,
            height: 48,
        }
    }
}

/// Space between the container edge and the plotted area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    pub const fn uniform(v: u32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }
}

/// Spark charts keep a 1px margin on all sides to maximize the plotted area.
pub const SPARK_MARGIN: Margin = Margin::uniform(1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_parses_percent_and_pixels() {
        assert_eq!("25%".parse::<BarCategoryGap>().unwrap(), BarCategoryGap::Percent(25.0));
        assert_eq!("4".parse::<BarCategoryGap>().unwrap(), BarCategoryGap::Pixels(4.0));
        assert!("wide".parse::<BarCategoryGap>().is_err());
    }

    #[test]
    fn gap_never_exceeds_half_the_band() {
        assert_eq!(BarCategoryGap::Pixels(50.0).to_pixels(10.0), 5.0);
        assert!((BarCategoryGap::Percent(10.0).to_pixels(20.0) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn gap_deserializes_from_string_or_number() {
        let g: BarCategoryGap = serde_json::from_str("\"30%\"").unwrap();
        assert_eq!(g, BarCategoryGap::Percent(30.0));
        let g: BarCategoryGap = serde_json::from_str("2").unwrap();
        assert_eq!(g, BarCategoryGap::Pixels(2.0));
    }

    #[test]
    fn stack_mode_flags() {
        assert!(!StackMode::Default.is_stacked());
        assert!(StackMode::Stacked.is_stacked());
        assert!(StackMode::Percent.is_stacked());
    }
}
