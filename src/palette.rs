//! Category to colour-token assignment.
//!
//! Colours are semantic tokens, not literal values. A token is resolved once per rendered
//! element together with a [`ColorPurpose`], because one series may need a stroke colour and
//! a separately resolved fill or text colour.
//!
//! # Design Principles
//!
//! - **Positional**: the i-th category receives the i-th palette entry.
//! - **Wraparound**: when there are more categories than colours, assignment continues
//!   from the start of the palette (`i % palette.len()`).
//! - **Deterministic**: identical inputs always produce identical outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Category;

/// RGB color representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Colour token from the fixed chart palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorToken {
    Blue,
    Emerald,
    Violet,
    Amber,
    Gray,
    Cyan,
    Pink,
    Lime,
    Fuchsia,
}

/// What an element uses a resolved colour for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPurpose {
    Stroke,
    Fill,
    Text,
}

/// Built-in palette, in assignment order.
pub const AVAILABLE_CHART_COLORS: [ColorToken; 9] = [
    ColorToken::Blue,
    ColorToken::Emerald,
    ColorToken::Violet,
    ColorToken::Amber,
    ColorToken::Gray,
    ColorToken::Cyan,
    ColorToken::Pink,
    ColorToken::Lime,
    ColorToken::Fuchsia,
];

impl ColorToken {
    pub fn name(self) -> &'static str {
        match self {
            ColorToken::Blue => "blue",
            ColorToken::Emerald => "emerald",
            ColorToken::Violet => "violet",
            ColorToken::Amber => "amber",
            ColorToken::Gray => "gray",
            ColorToken::Cyan => "cyan",
            ColorToken::Pink => "pink",
            ColorToken::Lime => "lime",
            ColorToken::Fuchsia => "fuchsia",
        }
    }

    /// Concrete colour (the 500 shade) used when drawing.
    pub fn rgb(self) -> Rgb8 {
        let (r, g, b) = match self {
            ColorToken::Blue => (59, 130, 246),    // #3B82F6
            ColorToken::Emerald => (16, 185, 129), // #10B981
            ColorToken::Violet => (139, 92, 246),  // #8B5CF6
            ColorToken::Amber => (245, 158, 11),   // #F59E0B
            ColorToken::Gray => (107, 114, 128),   // #6B7280
            ColorToken::Cyan => (6, 182, 212),     // #06B6D4
            ColorToken::Pink => (236, 72, 153),    // #EC4899
            ColorToken::Lime => (132, 204, 22),    // #84CC16
            ColorToken::Fuchsia => (217, 70, 239), // #D946EF
        };
        Rgb8 { r, g, b }
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorToken {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        AVAILABLE_CHART_COLORS
            .iter()
            .copied()
            .find(|t| t.name() == s)
            .ok_or_else(|| format!("unknown color {s:?}"))
    }
}

impl ColorPurpose {
    pub fn prefix(self) -> &'static str {
        match self {
            ColorPurpose::Stroke => "stroke",
            ColorPurpose::Fill => "fill",
            ColorPurpose::Text => "text",
        }
    }
}

/// Class name for a token used for `purpose`, e.g. `stroke-blue-500`.
pub fn color_class_name(token: ColorToken, purpose: ColorPurpose) -> String {
    format!("{}-{}-500", purpose.prefix(), token.name())
}

/// Ordered mapping from category to colour token.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct CategoryColors {
    entries: Vec<(Category, ColorToken)>,
}

impl CategoryColors {
    pub fn get(&self, category: &str) -> Option<ColorToken> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, t)| *t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ColorToken)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Assign colours to categories by position, wrapping around the palette.
///
/// An empty `palette` falls back to [`AVAILABLE_CHART_COLORS`]. A repeated category name keeps
/// its first position but takes the colour of its last occurrence.
pub fn construct_category_colors(
    categories: &[Category],
    palette: &[ColorToken],
) -> CategoryColors {
    let palette = if palette.is_empty() {
        &AVAILABLE_CHART_COLORS[..]
    } else {
        palette
    };

    let mut entries: Vec<(Category, ColorToken)> = Vec::with_capacity(categories.len());
    for (index, category) in categories.iter().enumerate() {
        let token = palette[index % palette.len()];
        match entries.iter_mut().find(|(c, _)| c == category) {
            Some(entry) => entry.1 = token,
            None => entries.push((category.clone(), token)),
        }
    }
    CategoryColors { entries }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_names_combine_purpose_and_token() {
        assert_eq!(
            color_class_name(ColorToken::Blue, ColorPurpose::Stroke),
            "stroke-blue-500"
        );
        assert_eq!(
            color_class_name(ColorToken::Fuchsia, ColorPurpose::Text),
            "text-fuchsia-500"
        );
    }

    #[test]
    fn purposes_cover_stroke_fill_and_text_only() {
        let parsed: Vec<ColorPurpose> =
            serde_json::from_str(r#"["stroke", "fill", "text"]"#).unwrap();
        let prefixes: Vec<&str> = parsed.into_iter().map(ColorPurpose::prefix).collect();
        assert_eq!(prefixes, vec!["stroke", "fill", "text"]);
        assert!(serde_json::from_str::<ColorPurpose>(r#""bg""#).is_err());
    }

    #[test]
    fn tokens_parse_case_insensitively() {
        assert_eq!("Emerald".parse::<ColorToken>(), Ok(ColorToken::Emerald));
        assert!("teal".parse::<ColorToken>().is_err());
    }

    #[test]
    fn every_token_round_trips_through_its_name() {
        for token in AVAILABLE_CHART_COLORS {
            assert_eq!(token.name().parse::<ColorToken>(), Ok(token));
        }
    }
}
