use serde_json::{Value, json};
use spark_charts::viz::{Primitive, Scene, build_scene, plot_width_px};
use spark_charts::{
    FillStyle, Row, SparkAreaChart, SparkAreaConfig, SparkBarChart, SparkBarConfig,
    SparkLineChart, SparkLineConfig, SparkOptions, StackMode,
};
use tempfile::tempdir;

fn row(v: Value) -> Row {
    v.as_object().cloned().expect("object literal")
}

fn options(data: Vec<Row>, categories: &[&str]) -> SparkOptions {
    SparkOptions {
        data,
        categories: categories.iter().map(|c| c.to_string()).collect(),
        index: "t".into(),
        ..SparkOptions::default()
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn percent_stack_splits_each_row_by_total() {
    let desc = SparkAreaChart::new(SparkAreaConfig {
        options: options(
            vec![row(json!({"t": 1, "a": 3, "b": 7})), row(json!({"t": 2, "a": 1, "b": 1}))],
            &["a", "b"],
        ),
        stack: StackMode::Percent,
        ..Default::default()
    })
    .describe();

    let scene = build_scene(&desc, plot_width_px(&desc));
    let (a0_lo, a0_hi) = scene.layers[0].spans[0].expect("a present");
    let (b0_lo, b0_hi) = scene.layers[1].spans[0].expect("b present");
    assert!(close(a0_lo, 0.0) && close(a0_hi, 0.3));
    assert!(close(b0_lo, 0.3) && close(b0_hi, 1.0));
    let (_, b1_hi) = scene.layers[1].spans[1].expect("b present");
    assert!(close(b1_hi, 1.0));
    assert!(close(scene.y_range.0, 0.0) && close(scene.y_range.1, 1.0));
}

#[test]
fn stacked_layers_accumulate_in_category_order() {
    let desc = SparkBarChart::new(SparkBarConfig {
        options: options(vec![row(json!({"t": 1, "a": 2, "b": 5}))], &["a", "b"]),
        stack: StackMode::Stacked,
        ..Default::default()
    })
    .describe();

    let scene = build_scene(&desc, plot_width_px(&desc));
    assert_eq!(scene.layers[0].spans[0], Some((0.0, 2.0)));
    assert_eq!(scene.layers[1].spans[0], Some((2.0, 7.0)));
    let rects = scene
        .primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Rect { .. }))
        .count();
    assert_eq!(rects, 2);
}

#[test]
fn null_values_break_lines_unless_connected() {
    let data = vec![
        row(json!({"t": 1, "a": 1})),
        row(json!({"t": 2, "a": null})),
        row(json!({"t": 3, "a": 4})),
    ];
    let paths = |connect_nulls: bool| {
        let desc = SparkLineChart::new(SparkLineConfig {
            options: options(data.clone(), &["a"]),
            connect_nulls,
        })
        .describe();
        build_scene(&desc, plot_width_px(&desc))
            .primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Path { .. }))
            .count()
    };
    assert_eq!(paths(false), 2);
    assert_eq!(paths(true), 1);
}

#[test]
fn explicit_domain_is_used_for_the_y_range() {
    let mut opts = options(
        vec![row(json!({"t": 1, "a": 3})), row(json!({"t": 2, "a": 50}))],
        &["a"],
    );
    opts.min_value = Some(-5.0);
    opts.max_value = Some(10.0);
    let desc = SparkLineChart::new(SparkLineConfig {
        options: opts,
        ..Default::default()
    })
    .describe();
    let scene = build_scene(&desc, plot_width_px(&desc));
    assert_eq!(scene.y_range, (-5.0, 10.0));
}

#[test]
fn renders_svg_string_and_files() {
    let chart = SparkAreaChart::new(SparkAreaConfig {
        options: options(
            vec![row(json!({"t": 1, "a": 3})), row(json!({"t": 2, "b": 7}))],
            &["a", "b"],
        ),
        ..Default::default()
    });

    let svg = chart.render_svg_string().expect("svg string");
    assert!(svg.contains("<svg"));
    assert!(svg.contains("polygon") || svg.contains("polyline") || svg.contains("path"));

    let dir = tempdir().unwrap();
    let svg_path = dir.path().join("spark.svg");
    let png_path = dir.path().join("spark.png");
    chart.render(&svg_path).expect("svg render");
    chart.render(&png_path).expect("png render");
    assert!(std::fs::metadata(&svg_path).unwrap().len() > 0);
    assert!(std::fs::metadata(&png_path).unwrap().len() > 0);
}

#[test]
fn empty_chart_still_renders() {
    let area = SparkAreaChart::new(SparkAreaConfig::default());
    assert!(area.render_svg_string().expect("empty area").contains("<svg"));
    let bar = SparkBarChart::new(SparkBarConfig::default());
    assert!(bar.render_svg_string().expect("empty bar").contains("<svg"));
}

#[test]
fn invisible_fill_draws_only_strokes() {
    let desc = SparkAreaChart::new(SparkAreaConfig {
        options: options(
            vec![row(json!({"t": 1, "a": 3})), row(json!({"t": 2, "a": 5}))],
            &["a"],
        ),
        fill: FillStyle::None,
        ..Default::default()
    })
    .describe();
    let scene = build_scene(&desc, plot_width_px(&desc));
    assert!(scene.primitives.iter().all(|p| matches!(p, Primitive::Path { .. })));
    assert_eq!(scene.primitives.len(), 1);
}

#[test]
fn floor_above_the_data_keeps_the_range_ordered() {
    let mut opts = options(
        vec![row(json!({"t": 1, "a": 1})), row(json!({"t": 2, "a": 3}))],
        &["a"],
    );
    opts.min_value = Some(5.0);
    let desc = SparkAreaChart::new(SparkAreaConfig {
        options: opts,
        ..Default::default()
    })
    .describe();
    let scene = build_scene(&desc, plot_width_px(&desc));
    assert!(scene.y_range.0 <= scene.y_range.1);
    assert_eq!(scene.y_range, (3.0, 5.0));
}

fn area_scene(values: &[Option<f64>], fill: FillStyle) -> Scene {
    let data = values
        .iter()
        .enumerate()
        .map(|(i, v)| row(json!({"t": i, "a": v})))
        .collect();
    let desc = SparkAreaChart::new(SparkAreaConfig {
        options: options(data, &["a"]),
        fill,
        ..Default::default()
    })
    .describe();
    build_scene(&desc, plot_width_px(&desc))
}

fn polygon_opacities(scene: &Scene) -> Vec<f64> {
    scene
        .primitives
        .iter()
        .filter_map(|p| match p {
            Primitive::Polygon { style, .. } => Some(style.color.3),
            _ => None,
        })
        .collect()
}

#[test]
fn gradient_fill_fades_from_top_to_bottom() {
    let scene = area_scene(&[Some(1.0), Some(3.0)], FillStyle::Gradient);
    let opacities = polygon_opacities(&scene);

    assert!(opacities.len() > 1, "gradient should be drawn as several bands");
    assert!((opacities[0] - 0.4).abs() < 1e-9);
    assert!(opacities.windows(2).all(|w| w[1] <= w[0] + 1e-12));
    let last = *opacities.last().unwrap();
    assert!(last > 0.0 && last < 0.05);
}

#[test]
fn solid_fill_draws_one_polygon_per_run() {
    let values = [Some(1.0), Some(2.0), None, Some(3.0), Some(4.0)];
    let scene = area_scene(&values, FillStyle::Solid);
    let opacities = polygon_opacities(&scene);

    assert_eq!(opacities.len(), 2);
    assert!(opacities.iter().all(|o| (o - 0.3).abs() < 1e-9));
    let strokes = scene
        .primitives
        .iter()
        .filter(|p| matches!(p, Primitive::Path { .. }))
        .count();
    assert_eq!(strokes, 2);
}

#[test]
fn bar_category_gap_applies_on_both_sides_of_the_band() {
    let desc = SparkBarChart::new(SparkBarConfig {
        options: options(vec![row(json!({"t": 1, "a": 2}))], &["a"]),
        ..Default::default()
    })
    .describe();
    let scene = build_scene(&desc, plot_width_px(&desc));
    let [Primitive::Rect { corners, .. }] = scene.primitives.as_slice() else {
        panic!("expected a single bar");
    };
    // one band of width 1 with a 10% gap on each side
    assert!((corners[0].0 - 0.1).abs() < 1e-9);
    assert!((corners[1].0 - 0.9).abs() < 1e-9);
}
