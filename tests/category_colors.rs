use proptest::prelude::*;
use spark_charts::palette::{AVAILABLE_CHART_COLORS, ColorToken, construct_category_colors};

fn cats(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn categories_take_palette_in_order() {
    let colors = construct_category_colors(&cats(&["a", "b", "c"]), &AVAILABLE_CHART_COLORS);
    assert_eq!(colors.get("a"), Some(ColorToken::Blue));
    assert_eq!(colors.get("b"), Some(ColorToken::Emerald));
    assert_eq!(colors.get("c"), Some(ColorToken::Violet));
    assert_eq!(colors.get("d"), None);
}

#[test]
fn overflow_wraps_around_the_palette() {
    let palette = [ColorToken::Pink, ColorToken::Lime];
    let colors = construct_category_colors(&cats(&["a", "b", "c", "d", "e"]), &palette);
    let got: Vec<ColorToken> = colors.iter().map(|(_, t)| t).collect();
    assert_eq!(
        got,
        vec![
            ColorToken::Pink,
            ColorToken::Lime,
            ColorToken::Pink,
            ColorToken::Lime,
            ColorToken::Pink,
        ]
    );
}

#[test]
fn empty_palette_uses_builtin() {
    let colors = construct_category_colors(&cats(&["x"]), &[]);
    assert_eq!(colors.get("x"), Some(ColorToken::Blue));
}

#[test]
fn repeated_category_keeps_position_takes_last_colour() {
    let colors = construct_category_colors(&cats(&["a", "b", "a"]), &AVAILABLE_CHART_COLORS);
    assert_eq!(colors.len(), 2);
    let order: Vec<&str> = colors.iter().map(|(c, _)| c).collect();
    assert_eq!(order, vec!["a", "b"]);
    assert_eq!(colors.get("a"), Some(ColorToken::Violet));
}

fn arb_palette() -> impl Strategy<Value = Vec<ColorToken>> {
    prop::collection::vec(prop::sample::select(AVAILABLE_CHART_COLORS.to_vec()), 1..9)
}

proptest! {
    #[test]
    fn mapping_is_total_and_deterministic(
        names in prop::collection::btree_set("[a-z]{1,4}", 1..12),
        palette in arb_palette(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let first = construct_category_colors(&names, &palette);
        let second = construct_category_colors(&names, &palette);
        prop_assert_eq!(&first, &second);
        for (i, n) in names.iter().enumerate() {
            prop_assert_eq!(first.get(n), Some(palette[i % palette.len()]));
        }
    }

    #[test]
    fn distinct_tokens_when_palette_is_large_enough(
        names in prop::collection::btree_set("[a-z]{1,4}", 1..10),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let colors = construct_category_colors(&names, &AVAILABLE_CHART_COLORS);
        let mut tokens: Vec<ColorToken> = colors.iter().map(|(_, t)| t).collect();
        let before = tokens.len();
        tokens.sort_by_key(|t| t.name());
        tokens.dedup();
        prop_assert_eq!(tokens.len(), before);
    }
}
