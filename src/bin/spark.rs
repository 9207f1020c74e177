use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use spark_charts::config::{self, SparkOptions};
use spark_charts::{
    BarCategoryGap, ChartDescription, ColorToken, FillStyle, SparkAreaChart, SparkAreaConfig,
    SparkBarChart, SparkBarConfig, SparkLineChart, SparkLineConfig, StackMode, storage, viz,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "spark",
    version,
    about = "Render small inline area, line and bar charts to SVG or PNG"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Area spark (filled, optionally stacked).
    Area(AreaArgs),
    /// Line spark.
    Line(LineArgs),
    /// Bar spark (optionally stacked).
    Bar(BarArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum StackArg {
    Default,
    Stacked,
    Percent,
}

impl From<StackArg> for StackMode {
    fn from(v: StackArg) -> Self {
        match v {
            StackArg::Default => StackMode::Default,
            StackArg::Stacked => StackMode::Stacked,
            StackArg::Percent => StackMode::Percent,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FillArg {
    Gradient,
    Solid,
    None,
}

impl From<FillArg> for FillStyle {
    fn from(v: FillArg) -> Self {
        match v {
            FillArg::Gradient => FillStyle::Gradient,
            FillArg::Solid => FillStyle::Solid,
            FillArg::None => FillStyle::None,
        }
    }
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// JSON options file (camelCase keys); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Rows as a .json array of objects or a .csv file with a header.
    #[arg(long)]
    data: Option<PathBuf>,
    /// Category keys separated by comma or semicolon (e.g., sales,costs)
    #[arg(short, long)]
    categories: Option<String>,
    /// Row key used as the horizontal position.
    #[arg(short, long)]
    index: Option<String>,
    /// Palette tokens separated by comma (e.g., blue,emerald).
    #[arg(long)]
    colors: Option<String>,
    /// Let the y-axis floor follow the data.
    #[arg(long, default_value_t = false)]
    auto_min: bool,
    /// Explicit y-axis floor.
    #[arg(long, allow_hyphen_values = true)]
    min: Option<f64>,
    /// Explicit y-axis ceiling.
    #[arg(long, allow_hyphen_values = true)]
    max: Option<f64>,
    /// Width of the chart in pixels (default 112).
    #[arg(long)]
    width: Option<u32>,
    /// Height of the chart in pixels (default 48).
    #[arg(long)]
    height: Option<u32>,
    /// Write the chart to the given path (.svg or .png).
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Write the chart description as JSON to the given path ("-" for stdout).
    #[arg(long)]
    describe: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AreaArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Bridge gaps left by null values.
    #[arg(long, default_value_t = false)]
    connect_nulls: bool,
    /// Layering of series.
    #[arg(long = "type", value_enum)]
    stack: Option<StackArg>,
    /// Area fill.
    #[arg(long, value_enum)]
    fill: Option<FillArg>,
}

#[derive(Args, Debug)]
struct LineArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Bridge gaps left by null values.
    #[arg(long, default_value_t = false)]
    connect_nulls: bool,
}

#[derive(Args, Debug)]
struct BarArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Layering of series.
    #[arg(long = "type", value_enum)]
    stack: Option<StackArg>,
    /// Gap between bar categories: pixels (4) or percent of the band (10%).
    #[arg(long)]
    bar_category_gap: Option<BarCategoryGap>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_colors(s: &str) -> Result<Vec<ColorToken>> {
    parse_list(s)
        .iter()
        .map(|c| c.parse::<ColorToken>().map_err(anyhow::Error::msg))
        .collect()
}

/// Overlay command-line flags on options loaded from `--config`.
fn apply_common(options: &mut SparkOptions, args: &CommonArgs) -> Result<()> {
    if let Some(path) = args.data.as_ref() {
        options.data = storage::load_rows(path)
            .with_context(|| format!("reading data from {}", path.display()))?;
    }
    if let Some(c) = args.categories.as_deref() {
        options.categories = parse_list(c);
    }
    if let Some(i) = args.index.as_ref() {
        options.index = i.clone();
    }
    if let Some(c) = args.colors.as_deref() {
        options.colors = parse_colors(c)?;
    }
    if args.auto_min {
        options.auto_min_value = true;
    }
    if args.min.is_some() {
        options.min_value = args.min;
    }
    if args.max.is_some() {
        options.max_value = args.max;
    }
    if let Some(w) = args.width {
        options.size.width = w;
    }
    if let Some(h) = args.height {
        options.size.height = h;
    }
    Ok(())
}

fn load_config<T>(args: &CommonArgs) -> Result<T>
where
    T: Default + for<'de> serde::Deserialize<'de>,
{
    match args.config.as_ref() {
        Some(path) => config::load_json(path)
            .with_context(|| format!("reading options from {}", path.display())),
        None => Ok(T::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Area(args) => cmd_area(args),
        Command::Line(args) => cmd_line(args),
        Command::Bar(args) => cmd_bar(args),
    }
}

fn cmd_area(args: AreaArgs) -> Result<()> {
    let mut cfg: SparkAreaConfig = load_config(&args.common)?;
    apply_common(&mut cfg.options, &args.common)?;
    if args.connect_nulls {
        cfg.connect_nulls = true;
    }
    if let Some(s) = args.stack {
        cfg.stack = s.into();
    }
    if let Some(f) = args.fill {
        cfg.fill = f.into();
    }
    emit(&SparkAreaChart::new(cfg).describe(), &args.common)
}

fn cmd_line(args: LineArgs) -> Result<()> {
    let mut cfg: SparkLineConfig = load_config(&args.common)?;
    apply_common(&mut cfg.options, &args.common)?;
    if args.connect_nulls {
        cfg.connect_nulls = true;
    }
    emit(&SparkLineChart::new(cfg).describe(), &args.common)
}

fn cmd_bar(args: BarArgs) -> Result<()> {
    let mut cfg: SparkBarConfig = load_config(&args.common)?;
    apply_common(&mut cfg.options, &args.common)?;
    if let Some(s) = args.stack {
        cfg.stack = s.into();
    }
    if args.bar_category_gap.is_some() {
        cfg.bar_category_gap = args.bar_category_gap;
    }
    emit(&SparkBarChart::new(cfg).describe(), &args.common)
}

fn emit(desc: &ChartDescription, args: &CommonArgs) -> Result<()> {
    if args.out.is_none() && args.describe.is_none() {
        anyhow::bail!("nothing to do: pass --out and/or --describe");
    }

    if let Some(path) = args.describe.as_ref() {
        if path.as_os_str() == "-" {
            println!("{}", serde_json::to_string_pretty(desc)?);
        } else {
            storage::save_description_json(desc, path)?;
            eprintln!("Wrote description to {}", path.display());
        }
    }

    if let Some(path) = args.out.as_ref() {
        viz::render_to_file(desc, path)?;
        eprintln!(
            "Wrote {} spark ({} series, {} rows) to {}",
            serde_json::to_value(desc.kind)?.as_str().unwrap_or("chart"),
            desc.series.len(),
            desc.data.len(),
            path.display()
        );
    }

    Ok(())
}
