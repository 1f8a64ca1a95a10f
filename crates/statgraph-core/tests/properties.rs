// File: crates/statgraph-core/tests/properties.rs
// Purpose: Layout invariants across sizes and series shapes, plus controller error paths.

use std::io;

use statgraph_core::{
    normalize, select_labeled_ticks, Chart, ChartError, ChartLayout, DataPoint, DataSource, DisplayConfig,
    DrawingSurface, FetchRenderError, GraphType, MetricCatalog, MetricConfig, Payload, RecordingSurface, Series,
};

fn monthly(n: usize, f: impl Fn(usize) -> f64) -> Series {
    let points = (0..n)
        .map(|i| DataPoint::new(format!("{}{:02}0100", 2015 + i / 12, i % 12 + 1), f(i)))
        .collect();
    Series::new(points).expect("non-empty")
}

fn layout(display: &DisplayConfig, series: &Series) -> ChartLayout {
    let mut measure = RecordingSurface::new(display.width, display.height);
    measure.set_font_size(display.font_px());
    ChartLayout::resolve(display, series, series.instants().expect("valid timestamps"), &measure)
}

fn chart(display: DisplayConfig) -> Chart {
    Chart::new(MetricConfig::new("total-page-views", "views"), display)
}

#[test]
fn compact_and_iso_timestamps_agree() {
    assert_eq!(normalize("20220601").unwrap(), normalize("2022-06-01T00:00:00Z").unwrap());
    assert_eq!(normalize("2022060100").unwrap(), normalize("2022-06-01 00:00:00").unwrap());
}

#[test]
fn bands_stay_inside_the_plot_and_never_overlap() {
    for &width in &[120u32, 400, 977] {
        for &n in &[1usize, 7, 31, 120] {
            let display = DisplayConfig { width, ..DisplayConfig::default() };
            let series = monthly(n, |i| (i * 37 % 101) as f64);
            let l = layout(&display, &series);
            let (left, right) = l.band.range();
            assert_eq!(left, l.axes.geometry.y_axis_width);
            assert!((right - width as f64).abs() < 1e-9);
            let bw = l.band.band_width();
            for i in 0..l.band.len() {
                let start = l.band.band_start_at(i);
                assert!(start >= left - 1e-9 && start + bw <= right + 1e-9, "w={width} n={n} band {i}");
                if i > 0 {
                    assert!(l.band.band_start_at(i - 1) + bw <= start + 1e-9);
                }
            }
        }
    }
}

#[test]
fn value_scale_maps_zero_and_max_to_the_plot_edges() {
    let display = DisplayConfig::default();
    let series = monthly(12, |i| 1000.0 + i as f64 * 250.0);
    let l = layout(&display, &series);
    assert_eq!(l.value.to_px(0.0), l.axes.geometry.plot_height);
    assert_eq!(l.value.to_px(series.max_value()), 0.0);
}

#[test]
fn consecutive_x_labels_never_overlap() {
    for &width in &[200u32, 400, 1024] {
        for &n in &[2usize, 12, 60, 240] {
            let display = DisplayConfig { width, ..DisplayConfig::default() };
            let l = layout(&display, &monthly(n, |i| i as f64));
            for pair in l.x_ticks.windows(2) {
                assert!(pair[0].span().1 < pair[1].span().0, "w={width} n={n}: {pair:?}");
                assert!(pair[0].index < pair[1].index);
            }
        }
    }
}

#[test]
fn x_label_selection_is_deterministic() {
    let display = DisplayConfig::default();
    let series = monthly(48, |i| i as f64);
    let a = layout(&display, &series);
    let mut measure = RecordingSurface::new(400, 151);
    measure.set_font_size(11.0);
    assert_eq!(a.x_ticks, select_labeled_ticks(&a.band, &measure));
}

#[test]
fn single_point_series() {
    let series = Series::new(vec![DataPoint::new("2022-06-01T00:00:00Z", 42.0)]).unwrap();
    let bars = chart(DisplayConfig::default())
        .render(&series, |w, h| Ok(RecordingSurface::new(w, h)))
        .unwrap();
    assert_eq!(bars.fill_rects().len(), 1);

    let display = DisplayConfig { graph_type: GraphType::Line, add_x_axis: false, add_y_axis: false, ..DisplayConfig::default() };
    let line = chart(display).render(&series, |w, h| Ok(RecordingSurface::new(w, h))).unwrap();
    let strokes = line.strokes();
    assert_eq!(strokes.len(), 1);
    assert_eq!(strokes[0].len(), 1);
}

#[test]
fn all_zero_series_draws_flat_bars() {
    let series = monthly(5, |_| 0.0);
    let s = chart(DisplayConfig::default())
        .render(&series, |w, h| Ok(RecordingSurface::new(w, h)))
        .unwrap();
    let rects = s.fill_rects();
    assert_eq!(rects.len(), 5);
    assert!(rects.iter().all(|&(_, y, _, h)| y == 134.5 && h == 0.0));
    assert_eq!(&s.texts()[..1], &["0.0"]);
}

#[test]
fn duplicate_instants_share_a_band() {
    let series = Series::new(vec![
        DataPoint::new("20220101", 1.0),
        DataPoint::new("2022-01-01T00:00:00Z", 2.0),
        DataPoint::new("20220201", 3.0),
    ])
    .unwrap();
    let l = layout(&DisplayConfig::default(), &series);
    assert_eq!(l.band.len(), 2);
}

#[test]
fn empty_payload_fails_before_allocation() {
    let payload = Payload::from_json_str(r#"{"items": []}"#).unwrap();
    let out = chart(DisplayConfig::default()).render_payload(&payload, |_, _| -> statgraph_core::Result<RecordingSurface> {
        panic!("allocator must not run")
    });
    assert!(matches!(out, Err(ChartError::EmptySeries)));
}

#[test]
fn invalid_color_is_a_config_error() {
    let series = monthly(3, |i| i as f64);
    let out = chart(DisplayConfig { color: "not-a-color".into(), ..DisplayConfig::default() })
        .render(&series, |w, h| Ok(RecordingSurface::new(w, h)));
    assert!(matches!(out, Err(ChartError::InvalidDisplayConfig(_))));
}

struct FixedSource(String);

impl DataSource for FixedSource {
    type Error = io::Error;

    fn fetch(&self, metric: &MetricConfig) -> Result<Payload, io::Error> {
        if metric.params.get("project").map(String::as_str) == Some("offline.example") {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "offline"));
        }
        Payload::from_json_str(&self.0).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

const PAYLOAD: &str = r#"{"items": [
    {"project": "en.wikipedia", "timestamp": "2022010100", "devices": 120},
    {"project": "en.wikipedia", "timestamp": "2022020100", "devices": 180}
]}"#;

#[test]
fn fetch_and_render_uses_the_catalog_value_field() {
    let catalog = MetricCatalog::builtin();
    let metric = catalog.config("unique-devices", [("project", "en.wikipedia.org")]).unwrap();
    let chart = Chart::new(metric, DisplayConfig::default());
    let s = chart
        .fetch_and_render(&FixedSource(PAYLOAD.into()), |w, h| Ok(RecordingSurface::new(w, h)))
        .unwrap();
    let rects = s.fill_rects();
    assert_eq!(rects.len(), 2);
    assert_eq!(rects[1].1, 0.0);
}

#[test]
fn source_errors_come_back_unmodified() {
    let catalog = MetricCatalog::builtin();
    let metric = catalog.config("unique-devices", [("project", "offline.example")]).unwrap();
    let chart = Chart::new(metric, DisplayConfig::default());
    match chart.fetch_and_render(&FixedSource(PAYLOAD.into()), |w, h| Ok(RecordingSurface::new(w, h))) {
        Err(FetchRenderError::Source(e)) => assert_eq!(e.kind(), io::ErrorKind::NotConnected),
        other => panic!("unexpected {:?}", other.map(|_| ())),
    }
}

#[test]
fn invalid_config_fails_before_fetching() {
    struct Unreachable;
    impl DataSource for Unreachable {
        type Error = io::Error;
        fn fetch(&self, _: &MetricConfig) -> Result<Payload, io::Error> {
            panic!("source must not be queried")
        }
    }
    let chart = Chart::new(
        MetricConfig::new("total-page-views", "views"),
        DisplayConfig { font_size: 0, ..DisplayConfig::default() },
    );
    let out = chart.fetch_and_render(&Unreachable, |w, h| Ok(RecordingSurface::new(w, h)));
    assert!(matches!(out, Err(FetchRenderError::Chart(ChartError::InvalidDisplayConfig(_)))));
}
