// Copyright 2025 the chartpipe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render sessions: fetch, transform, fit, and build the chart scene.

use std::collections::HashMap;

use chartpipe_charts::{
    AxisSpec, BarDatum, BarMarkSpec, ChartSpec, HeuristicTextMeasurer, LegendItem,
    LegendPlacement, LegendSwatchesSpec, PointDatum, PointMarkSpec, TitleSpec, decimated_indices,
};
use chartpipe_core::{Mark, MarkId, Scene};
use kurbo::Rect;
use peniko::Color;
use peniko::color::palette::css;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::config::ChartSettings;
use crate::dataset::{Dataset, Key, Record, normalize};
use crate::error::RenderError;
use crate::fetch::{DataSource, load_data};
use crate::fit::{Domain, KeyDomain, fit_domain};

pub(crate) const BAR_FILL: Color = css::STEEL_BLUE;
pub(crate) const ALLEGATION_FILL: Color = css::DARK_ORANGE;
pub(crate) const NO_ALLEGATION_FILL: Color = css::STEEL_BLUE;

const TITLE_ID: MarkId = MarkId::from_raw(1);
const X_AXIS_ID_BASE: u64 = 10_000;
const Y_AXIS_ID_BASE: u64 = 20_000;
const LEGEND_ID_BASE: u64 = 30_000;
const MAX_CATEGORY_LABELS: usize = 10;

/// A fully built chart.
#[derive(Debug)]
pub(crate) struct RenderedChart {
    /// Canvas bounds.
    pub(crate) view: Rect,
    pub(crate) plot: Rect,
    pub(crate) domain: Domain,
    pub(crate) record_count: usize,
    pub(crate) scene: Scene,
}

/// Builds the chart for already-fetched data.
pub(crate) fn render(
    dataset: Dataset,
    settings: &ChartSettings,
    raw: &Value,
) -> Result<RenderedChart, RenderError> {
    let records = normalize(dataset, raw)?;
    let domain = fit_domain(&records, dataset.baseline());

    let chart = chart_spec(dataset, settings, &domain);
    let (layout, marks) = chart.marks(&HeuristicTextMeasurer, |spec, plot| {
        series_marks(dataset, spec, plot, &records)
    });

    let mut scene = Scene::new();
    scene.replace(marks);
    Ok(RenderedChart {
        view: layout.view,
        plot: layout.plot,
        domain,
        record_count: records.len(),
        scene,
    })
}

fn chart_spec(dataset: Dataset, settings: &ChartSettings, domain: &Domain) -> ChartSpec {
    let y_axis = AxisSpec::left(Y_AXIS_ID_BASE, domain.value_scale())
        .with_tick_formatter(move |v, step| dataset.format_value(v, step))
        .with_title(settings.y_caption.clone());

    let x_axis = AxisSpec::bottom(X_AXIS_ID_BASE, domain.key_scale());
    let x_axis = match &domain.key {
        KeyDomain::Categories(c) => {
            let labels: Vec<String> = c.iter().map(|c| category_label(c).to_owned()).collect();
            x_axis
                .with_tick_values(
                    decimated_indices(c.len(), MAX_CATEGORY_LABELS)
                        .into_iter()
                        .map(|i| i as f64),
                )
                .with_tick_formatter(move |v, _| {
                    labels
                        .get(band_index(v))
                        .cloned()
                        .unwrap_or_default()
                })
        }
        KeyDomain::Span(..) => x_axis,
    }
    .with_title(settings.x_caption.clone());

    let chart = ChartSpec::new(settings.view_size(), settings.margins())
        .with_title(TitleSpec::new(TITLE_ID, settings.title.clone()))
        .with_axis_bottom(x_axis)
        .with_axis_left(y_axis);

    match dataset {
        Dataset::Gdp => chart,
        Dataset::Cyclist => chart.with_legend(
            LegendSwatchesSpec::new(
                LEGEND_ID_BASE,
                vec![
                    LegendItem::solid("Doping Allegations", ALLEGATION_FILL),
                    LegendItem::solid("No Allegations", NO_ALLEGATION_FILL),
                ],
            ),
            LegendPlacement::default(),
        ),
    }
}

/// Quarter dates label as their year.
fn category_label(category: &str) -> &str {
    category.split('-').next().unwrap_or(category)
}

fn band_index(v: f64) -> usize {
    if v.is_finite() && v >= 0.0 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "tick values are small non-negative band indices"
        )]
        {
            v.round() as usize
        }
    } else {
        0
    }
}

fn series_marks(dataset: Dataset, spec: &ChartSpec, plot: Rect, records: &[Record]) -> Vec<Mark> {
    let (Some(x_axis), Some(y_axis)) = (&spec.axis_bottom, &spec.axis_left) else {
        return Vec::new();
    };
    let Some(y_scale) = y_axis.scale_continuous(plot) else {
        return Vec::new();
    };

    if let Some(band) = x_axis.scale_band(plot) {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let data: Vec<BarDatum> = records
            .iter()
            .map(|r| {
                let band = match &r.key {
                    Key::Category(c) => {
                        let next = index.len();
                        *index.entry(c.as_str()).or_insert(next)
                    }
                    Key::Instant(_) => 0,
                };
                BarDatum {
                    band,
                    value: r.value,
                    tooltip: Some(dataset.tooltip(r)),
                }
            })
            .collect();
        return BarMarkSpec::new(0, band, y_scale)
            .with_baseline(dataset.baseline().unwrap_or(0.0))
            .with_fill(BAR_FILL)
            .marks(&data);
    }

    let Some(x_scale) = x_axis.scale_continuous(plot) else {
        return Vec::new();
    };
    let data: Vec<PointDatum> = records
        .iter()
        .map(|r| PointDatum {
            x: match r.key {
                Key::Instant(secs) => secs as f64,
                Key::Category(_) => f64::NAN,
            },
            y: r.value,
            highlighted: r.flagged(),
            tooltip: Some(dataset.tooltip(r)),
        })
        .collect();
    PointMarkSpec::new(0, x_scale, y_scale)
        .with_fills(NO_ALLEGATION_FILL, ALLEGATION_FILL)
        .marks(&data)
}

/// Lifecycle of a render session. `Rendered` and `Failed` are terminal.
#[derive(Debug)]
pub(crate) enum RenderState {
    Loading,
    Rendered(RenderedChart),
    Failed,
}

/// One render of one dataset: owns its settings and result.
#[derive(Debug)]
pub(crate) struct RenderSession {
    dataset: Dataset,
    settings: ChartSettings,
    state: RenderState,
}

impl RenderSession {
    pub(crate) fn new(dataset: Dataset, settings: ChartSettings) -> Self {
        Self {
            dataset,
            settings,
            state: RenderState::Loading,
        }
    }

    /// The rendered chart, if the session succeeded.
    pub(crate) fn chart(&self) -> Option<&RenderedChart> {
        match &self.state {
            RenderState::Rendered(chart) => Some(chart),
            RenderState::Loading | RenderState::Failed => None,
        }
    }

    /// Fetches once and renders. Sessions are single-shot; later calls return the settled
    /// state without fetching again.
    pub(crate) async fn run(&mut self, source: &dyn DataSource) -> &RenderState {
        if !matches!(self.state, RenderState::Loading) {
            return &self.state;
        }
        let result = match load_data(source, &self.settings.url).await {
            Ok(raw) => render(self.dataset, &self.settings, &raw),
            Err(err) => Err(err.into()),
        };
        self.state = match result {
            Ok(chart) => {
                debug!(
                    dataset = %self.dataset,
                    key = ?chart.domain.key,
                    value = ?chart.domain.value,
                    plot = ?chart.plot,
                    "fitted domain"
                );
                info!(
                    dataset = %self.dataset,
                    records = chart.record_count,
                    marks = chart.scene.len(),
                    "chart rendered"
                );
                RenderState::Rendered(chart)
            }
            Err(err) => {
                error!(dataset = %self.dataset, %err, "render failed");
                RenderState::Failed
            }
        };
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chartpipe_charts::{SERIES_FILL, SERIES_POINTS};
    use chartpipe_core::MarkPayload;
    use kurbo::Point;
    use peniko::Brush;
    use serde_json::json;
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt as _};
    use tracing_subscriber::{Layer, Registry};

    use super::*;
    use crate::fetch::StaticSource;

    fn gdp_settings() -> ChartSettings {
        ChartSettings::for_dataset(Dataset::Gdp)
    }

    fn cyclist_settings() -> ChartSettings {
        ChartSettings::for_dataset(Dataset::Cyclist)
    }

    fn series(chart: &RenderedChart, z: i32) -> Vec<&Mark> {
        let mut marks: Vec<&Mark> = chart
            .scene
            .ordered()
            .into_iter()
            .filter(|m| m.z_index == z)
            .collect();
        marks.sort_by_key(|m| m.id);
        marks
    }

    fn rect(mark: &Mark) -> Rect {
        match &mark.payload {
            MarkPayload::Rect(r) => r.rect,
            other => panic!("expected rect, got {other:?}"),
        }
    }

    fn center(mark: &Mark) -> Point {
        match &mark.payload {
            MarkPayload::Circle(c) => c.circle.center,
            other => panic!("expected circle, got {other:?}"),
        }
    }

    fn gdp_three() -> Value {
        json!({"data": [["2001-01-01", 100.0], ["2001-04-01", 150.0], ["2001-07-01", 120.0]]})
    }

    fn riders() -> Value {
        json!([
            {"Year": 1994, "Seconds": 2290, "Name": "A", "Doping": "Alleged"},
            {"Year": 1998, "Seconds": 3720, "Name": "B", "Doping": ""},
            {"Year": 2006, "Seconds": 2300, "Name": "C", "Doping": ""},
            {"Year": 2015, "Seconds": 2400, "Name": "D", "Doping": "Positive test"},
        ])
    }

    #[test]
    fn gdp_renders_one_bar_per_record_tallest_at_index_one() {
        let chart = render(Dataset::Gdp, &gdp_settings(), &gdp_three()).unwrap();
        assert_eq!(chart.domain.value, (0.0, 150.0));
        let bars = series(&chart, SERIES_FILL);
        assert_eq!(bars.len(), 3);
        let heights: Vec<f64> = bars.iter().map(|m| rect(m).height()).collect();
        assert!(heights[1] > heights[0] && heights[1] > heights[2]);
        let xs: Vec<f64> = bars.iter().map(|m| rect(m).x0).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!(bars.iter().all(|m| (rect(m).y1 - chart.plot.y1).abs() < 1e-9));
        assert_eq!(bars[2].tooltip.as_deref(), Some("2001-07-01\n$120 Billion"));
    }

    #[test]
    fn cyclist_points_are_colored_by_flag() {
        let chart = render(Dataset::Cyclist, &cyclist_settings(), &riders()).unwrap();
        let points = series(&chart, SERIES_POINTS);
        assert_eq!(points.len(), 4);
        let fills: Vec<bool> = points
            .iter()
            .map(|m| match &m.payload {
                MarkPayload::Circle(c) => c.fill == Brush::from(ALLEGATION_FILL),
                _ => false,
            })
            .collect();
        assert_eq!(fills, [true, false, false, true]);

        let xs: Vec<f64> = points.iter().map(|m| center(m).x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        assert!((xs[0] - chart.plot.x0).abs() < 1e-9);
        assert!((xs[3] - chart.plot.x1).abs() < 1e-9);

        let b = points[1].tooltip.as_deref().unwrap();
        assert_eq!(b, "Year: 1998\nName: B\nDoping: None");
    }

    #[test]
    fn cyclist_chart_has_both_legend_entries() {
        let chart = render(Dataset::Cyclist, &cyclist_settings(), &riders()).unwrap();
        let labels: Vec<String> = chart
            .scene
            .ordered()
            .into_iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) if m.z_index == chartpipe_charts::LEGEND_LABELS => {
                    Some(t.text.clone())
                }
                _ => None,
            })
            .collect();
        assert_eq!(labels, ["Doping Allegations", "No Allegations"]);
    }

    #[test]
    fn axes_and_captions_are_decorated() {
        let chart = render(Dataset::Gdp, &gdp_settings(), &gdp_three()).unwrap();
        let texts: Vec<&str> = chart
            .scene
            .ordered()
            .into_iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"United States GDP"));
        assert!(texts.contains(&"Gross Domestic Product (Billions)"));
        assert!(texts.contains(&"2001"));
        assert!(texts.contains(&"160"));
    }

    #[test]
    fn degenerate_values_share_one_defined_y() {
        let raw = json!([
            {"Year": 2000, "Seconds": 3000, "Name": "A", "Doping": ""},
            {"Year": 2001, "Seconds": 3000, "Name": "B", "Doping": ""},
        ]);
        let chart = render(Dataset::Cyclist, &cyclist_settings(), &raw).unwrap();
        let ys: Vec<f64> = series(&chart, SERIES_POINTS)
            .iter()
            .map(|m| center(m).y)
            .collect();
        assert_eq!(ys.len(), 2);
        assert!(ys.iter().all(|y| y.is_finite()));
        assert_eq!(ys[0], ys[1]);
        assert!((ys[0] - 0.5 * (chart.plot.y0 + chart.plot.y1)).abs() < 1e-9);
    }

    #[test]
    fn rendering_twice_is_idempotent() {
        let raw = riders();
        let a = render(Dataset::Cyclist, &cyclist_settings(), &raw).unwrap();
        let b = render(Dataset::Cyclist, &cyclist_settings(), &raw).unwrap();
        assert_eq!(a.scene.ordered(), b.scene.ordered());
    }

    #[derive(Clone, Default)]
    struct ErrorEvents(Arc<AtomicUsize>);

    impl ErrorEvents {
        fn count(&self) -> usize {
            self.0.load(Ordering::SeqCst)
        }
    }

    impl<S: Subscriber> Layer<S> for ErrorEvents {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[tokio::test]
    async fn malformed_data_fails_the_session_with_one_logged_error() {
        let cases = [
            (Dataset::Gdp, Value::Null),
            (Dataset::Gdp, json!({})),
            (Dataset::Gdp, json!({"data": "nope"})),
            (Dataset::Gdp, json!(42)),
            (Dataset::Cyclist, Value::Null),
            (Dataset::Cyclist, json!({})),
            (Dataset::Cyclist, json!("riders")),
        ];
        for (dataset, raw) in cases {
            let errors = ErrorEvents::default();
            let _guard = tracing::subscriber::set_default(Registry::default().with(errors.clone()));

            let mut session = RenderSession::new(dataset, ChartSettings::for_dataset(dataset));
            let state = session.run(&StaticSource::Document(raw)).await;
            assert!(matches!(state, RenderState::Failed));
            assert!(session.chart().is_none());
            assert_eq!(errors.count(), 1, "{dataset}");
        }
    }

    #[tokio::test]
    async fn fetch_failure_fails_the_session() {
        let errors = ErrorEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(errors.clone()));

        let mut session = RenderSession::new(Dataset::Cyclist, cyclist_settings());
        session
            .run(&StaticSource::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
            .await;
        assert!(matches!(session.state, RenderState::Failed));
        assert!(session.chart().is_none());
        assert_eq!(errors.count(), 1);
    }

    #[tokio::test]
    async fn session_is_single_shot() {
        let errors = ErrorEvents::default();
        let _guard = tracing::subscriber::set_default(Registry::default().with(errors.clone()));

        let mut session = RenderSession::new(Dataset::Gdp, gdp_settings());
        session.run(&StaticSource::Document(gdp_three())).await;
        let marks = session.chart().map_or(0, |c| c.scene.len());
        assert!(marks > 3);
        let state = session.run(&StaticSource::Document(Value::Null)).await;
        assert!(matches!(state, RenderState::Rendered(_)));
        assert_eq!(session.chart().map_or(0, |c| c.scene.len()), marks);
        assert_eq!(errors.count(), 0);
    }
}
