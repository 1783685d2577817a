use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ChartError;
use crate::page::Page;
use crate::record::{Metric, PlayerRecord};
use crate::telemetry::{ClientEvent, TelemetrySink};

pub const SCATTER_POINT_RADIUS: f64 = 6.0;
pub const FALLBACK_NOTE: &str = "Unable to render charts in this browser.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar(Metric),
    /// Line chart with the area under it filled.
    Area(Metric),
    Scatter { x: Metric, y: Metric },
}

/// Static description of one chart slot on a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPlan {
    pub canvas_id: &'static str,
    pub label: &'static str,
    pub kind: ChartKind,
    pub point_radius: Option<f64>,
    /// Show an inline note next to the canvas when this chart fails.
    pub fallback_note: bool,
}

const fn bar(canvas_id: &'static str, label: &'static str, metric: Metric) -> ChartPlan {
    ChartPlan {
        canvas_id,
        label,
        kind: ChartKind::Bar(metric),
        point_radius: None,
        fallback_note: false,
    }
}

const fn area(canvas_id: &'static str, label: &'static str, metric: Metric) -> ChartPlan {
    ChartPlan {
        canvas_id,
        label,
        kind: ChartKind::Area(metric),
        point_radius: None,
        fallback_note: false,
    }
}

const fn scatter(canvas_id: &'static str, label: &'static str, x: Metric, y: Metric) -> ChartPlan {
    ChartPlan {
        canvas_id,
        label,
        kind: ChartKind::Scatter { x, y },
        point_radius: Some(SCATTER_POINT_RADIUS),
        fallback_note: false,
    }
}

pub const TEAM_CHARTS: [ChartPlan; 3] = [
    bar("teamRunsChart", "Runs", Metric::Runs),
    bar("teamWicketsChart", "Wickets", Metric::Wickets),
    area("teamAvgChart", "Batting Average", Metric::BatAvg),
];

pub const BATTING_CHARTS: [ChartPlan; 5] = [
    ChartPlan {
        fallback_note: true,
        ..bar("barRuns", "Runs", Metric::Runs)
    },
    ChartPlan {
        point_radius: Some(3.0),
        ..area("areaAvg", "Bat Avg", Metric::BatAvg)
    },
    area("areaSR", "SR", Metric::StrikeRate),
    area("areaBF", "Avg Balls Faced", Metric::AvgBallsFaced),
    scatter("scatterAvgSR", "Avg vs SR", Metric::BatAvg, Metric::StrikeRate),
];

pub const BOWLING_CHARTS: [ChartPlan; 6] = [
    bar("barWickets", "Wickets", Metric::Wickets),
    area("areaBowlingAvg", "Bowling Avg", Metric::BowlingAvg),
    area("areaDotBalls", "Dot Balls", Metric::DotBalls),
    area("areaEconomy", "Economy", Metric::Economy),
    area("areaBowlingSR", "Bowling SR", Metric::BowlingSr),
    scatter(
        "scatterSRvsEconomy",
        "SR vs Econ",
        Metric::BowlingSr,
        Metric::Economy,
    ),
];

pub const fn plans_for(page: &Page) -> &'static [ChartPlan] {
    match page {
        Page::Team { .. } => &TEAM_CHARTS,
        Page::Batting { .. } => &BATTING_CHARTS,
        Page::Bowling { .. } => &BOWLING_CHARTS,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Values(Vec<f64>),
    Points(Vec<ScatterPoint>),
}

/// A chart plan filled with one fetch's worth of data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub plan: ChartPlan,
    pub labels: Vec<String>,
    pub data: ChartData,
}

/// One value per record, index-aligned with the labels, missing as `0`.
pub fn series(records: &[PlayerRecord], metric: Metric) -> Vec<f64> {
    records.iter().map(|record| record.metric(metric)).collect()
}

impl ChartSpec {
    pub fn build(plan: &ChartPlan, records: &[PlayerRecord]) -> Self {
        let data = match plan.kind {
            ChartKind::Bar(metric) | ChartKind::Area(metric) => {
                ChartData::Values(series(records, metric))
            }
            ChartKind::Scatter { x, y } => {
                let r = plan.point_radius.unwrap_or(SCATTER_POINT_RADIUS);
                ChartData::Points(
                    series(records, x)
                        .into_iter()
                        .zip(series(records, y))
                        .map(|(x, y)| ScatterPoint { x, y, r })
                        .collect(),
                )
            }
        };

        Self {
            plan: *plan,
            labels: records.iter().map(|record| record.name.clone()).collect(),
            data,
        }
    }

    pub const fn canvas_id(&self) -> &'static str {
        self.plan.canvas_id
    }

    /// Chart.js configuration object for this chart.
    pub fn config(&self) -> Value {
        let mut dataset = json!({ "label": self.plan.label });
        match &self.data {
            ChartData::Values(values) => dataset["data"] = json!(values),
            ChartData::Points(points) => dataset["data"] = json!(points),
        }

        let mut options = json!({
            "responsive": true,
            "maintainAspectRatio": false,
        });

        let kind = match self.plan.kind {
            ChartKind::Bar(_) => "bar",
            ChartKind::Area(_) => {
                dataset["fill"] = json!(true);
                if let Some(radius) = self.plan.point_radius {
                    options["elements"] = json!({ "point": { "radius": radius } });
                }
                "line"
            }
            ChartKind::Scatter { x, y } => {
                options["scales"] = json!({
                    "x": { "title": { "display": true, "text": x.label() } },
                    "y": { "title": { "display": true, "text": y.label() } },
                });
                "scatter"
            }
        };

        let data = if matches!(self.plan.kind, ChartKind::Scatter { .. }) {
            json!({ "datasets": [dataset] })
        } else {
            json!({ "labels": self.labels, "datasets": [dataset] })
        };

        json!({ "type": kind, "data": data, "options": options })
    }
}

pub fn build_charts(plans: &[ChartPlan], records: &[PlayerRecord]) -> Vec<ChartSpec> {
    plans
        .iter()
        .map(|plan| ChartSpec::build(plan, records))
        .collect()
}

/// Drawing target for chart specs, e.g. canvases on the current page.
pub trait ChartSurface {
    fn draw(&mut self, spec: &ChartSpec) -> Result<(), ChartError>;

    fn show_fallback(&mut self, canvas_id: &str);
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ChartReport {
    pub rendered: Vec<&'static str>,
    pub failed: Vec<(&'static str, ChartError)>,
}

/// Draws every spec on its own; one failing chart never stops the rest.
pub fn render_charts(
    surface: &mut dyn ChartSurface,
    specs: &[ChartSpec],
    telemetry: &dyn TelemetrySink,
) -> ChartReport {
    let mut report = ChartReport::default();

    for spec in specs {
        let canvas_id = spec.canvas_id();
        match surface.draw(spec) {
            Ok(()) => report.rendered.push(canvas_id),
            Err(error) => {
                log::warn!("chart {canvas_id} failed: {error}");
                telemetry.report(ClientEvent::chart_error(canvas_id, error.to_string()));
                if spec.plan.fallback_note {
                    surface.show_fallback(canvas_id);
                }
                report.failed.push((canvas_id, error));
            }
        }
    }

    report
}
