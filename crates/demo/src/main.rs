// File: crates/demo/src/main.rs
// Summary: Demo renders a metric payload (JSON) or a timestamp/value CSV to a PNG chart.

use anyhow::{Context, Result};
use log::info;
use statgraph_core::{Chart, DataPoint, DisplayConfig, GraphType, MetricCatalog, Payload, Series};
use statgraph_render_skia::SkiaSurface;
use std::path::{Path, PathBuf};

#[cfg(feature = "http")]
mod aqs;

const USAGE: &str = "usage: statgraph-demo [payload.json|series.csv] [--metric NAME] [--param KEY=VALUE]... \
[--field NAME] [--config display.json] [--line] [--out PATH] [--print-url]";

#[derive(Debug)]
struct Args {
    /// Without an input file the payload is fetched (`http` feature).
    input: Option<PathBuf>,
    metric: String,
    params: Vec<(String, String)>,
    field: Option<String>,
    config: Option<PathBuf>,
    line: bool,
    out: Option<PathBuf>,
    print_url: bool,
}

fn parse_args() -> Result<Args> {
    let mut it = std::env::args().skip(1);
    let mut args = Args {
        input: None,
        metric: "total-page-views".to_string(),
        params: Vec::new(),
        field: None,
        config: None,
        line: false,
        out: None,
        print_url: false,
    };
    while let Some(a) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value\n{USAGE}"));
        match a.as_str() {
            "--metric" => args.metric = value("--metric")?,
            "--param" => {
                let kv = value("--param")?;
                let (k, v) = kv.split_once('=').with_context(|| format!("--param expects KEY=VALUE, got {kv:?}"))?;
                args.params.push((k.to_string(), v.to_string()));
            }
            "--field" => args.field = Some(value("--field")?),
            "--config" => args.config = Some(PathBuf::from(value("--config")?)),
            "--out" => args.out = Some(PathBuf::from(value("--out")?)),
            "--line" => args.line = true,
            "--print-url" => args.print_url = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other if other.starts_with("--") => anyhow::bail!("unknown flag {other}\n{USAGE}"),
            other => args.input = Some(PathBuf::from(other)),
        }
    }
    Ok(args)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = parse_args()?;

    let catalog = MetricCatalog::builtin();
    let mut metric = catalog
        .config(&args.metric, args.params.iter().cloned())
        .with_context(|| format!("metric '{}'", args.metric))?;
    if let Some(field) = &args.field {
        metric.value_field = field.clone();
    }
    if args.print_url {
        match catalog.resolve_url(&metric) {
            Ok(url) => println!("{url}"),
            Err(e) => println!("no endpoint for '{}': {e}", metric.name),
        }
    }

    let mut display = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            DisplayConfig::from_json_str(&json).with_context(|| format!("parsing {}", path.display()))?
        }
        None => DisplayConfig::default(),
    };
    if args.line {
        display.graph_type = GraphType::Line;
    }

    let chart = Chart::new(metric, display);
    let mut surface = match &args.input {
        Some(input) => {
            let series = load_series(input, &chart.metric.value_field)
                .with_context(|| format!("failed to load '{}'", input.display()))?;
            info!("loaded {} points from {}", series.len(), input.display());
            println!("Using input file: {} ({} points)", input.display(), series.len());
            chart.render(&series, SkiaSurface::new).context("render failed")?
        }
        None => fetch(&chart, catalog)?,
    };

    let stem = args.input.as_deref().unwrap_or(Path::new("api"));
    let out = args.out.clone().unwrap_or_else(|| out_name_for(stem, &chart.metric.name));
    surface.write_png(&out).with_context(|| format!("writing {}", out.display()))?;
    println!("Wrote {}", out.display());
    Ok(())
}

#[cfg(feature = "http")]
fn fetch(chart: &Chart, catalog: MetricCatalog) -> Result<SkiaSurface> {
    let source = aqs::AqsSource::new(catalog);
    println!("Fetching '{}'", chart.metric.name);
    chart
        .fetch_and_render(&source, SkiaSurface::new)
        .with_context(|| format!("fetching '{}'", chart.metric.name))
}

#[cfg(not(feature = "http"))]
fn fetch(_: &Chart, _: MetricCatalog) -> Result<SkiaSurface> {
    anyhow::bail!("no input file given and the `http` feature is off\n{USAGE}")
}

/// JSON payloads go through the metric's value field; anything else is read as CSV.
fn load_series(path: &Path, value_field: &str) -> Result<Series> {
    let is_json = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if is_json {
        let file = std::fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let payload = Payload::from_reader(std::io::BufReader::new(file))?;
        return Ok(Series::from_payload(&payload, value_field)?);
    }
    load_csv(path, value_field)
}

/// Load a `timestamp,<value>` CSV. The value column is `value_field` when present,
/// else the first of `value`/`views`/`count`.
fn load_csv(path: &Path, value_field: &str) -> Result<Series> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect::<Vec<_>>();

    let idx = |names: &[&str]| headers.iter().position(|h| names.iter().any(|n| h == n));
    let i_time = idx(&["timestamp", "time", "date"]).context("no timestamp column")?;
    let wanted = value_field.to_lowercase();
    let i_value = idx(&[wanted.as_str(), "value", "views", "count"])
        .with_context(|| format!("no '{value_field}' or value column in {headers:?}"))?;

    let mut points = Vec::new();
    for (row, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let ts = rec.get(i_time).with_context(|| format!("row {row}: missing timestamp"))?;
        let value = rec
            .get(i_value)
            .and_then(|s| s.parse::<f64>().ok())
            .with_context(|| format!("row {row}: value is not a number"))?;
        points.push(DataPoint::new(ts, value));
    }
    Ok(Series::new(points)?)
}

/// Produce output file name like target/out/<metric>_<stem>.png
fn out_name_for(input: &Path, metric: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("chart");
    PathBuf::from("target/out").join(format!("{metric}_{stem}.png"))
}
