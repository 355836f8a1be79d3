// Dashboard view model - poll state rendered into display-ready fields
use crate::domain::poll_state::{LatestPhase, PollState, SeriesPhase};
use crate::domain::reading::{Reading, SeriesPoint, Timestamp};
use crate::presentation::formatting::{
    axis_tick_label, distance_label, latest_timestamp_label, level_label, tooltip_time_label,
    tooltip_value_label,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    pub loading: LoadingView,
    pub error: Option<String>,
    pub latest_status: &'static str,
    pub series_status: &'static str,
    /// Absent until the first latest-reading fetch settles.
    pub latest: Option<LatestCard>,
    pub chart: ChartView,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadingView {
    pub latest: bool,
    pub series: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LatestCard {
    pub distance: String,
    pub level: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartView {
    pub title: &'static str,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartPoint {
    pub time_ms: i64,
    pub distance: f64,
    pub tick_label: String,
    pub tooltip_label: String,
    pub tooltip_value: String,
}

impl DashboardView {
    pub fn from_state(state: &PollState) -> Self {
        let latest = (!state.loading_latest).then(|| LatestCard::from_reading(state.latest.as_ref()));

        Self {
            loading: LoadingView {
                latest: state.loading_latest,
                series: state.loading_series,
            },
            error: state.last_error.clone(),
            latest_status: latest_status(state.latest_phase),
            series_status: series_status(state.series_phase),
            latest,
            chart: ChartView {
                title: "Distância (últimas 24h)",
                points: state.series.points.iter().map(ChartPoint::from_point).collect(),
            },
        }
    }
}

impl LatestCard {
    fn from_reading(reading: Option<&Reading>) -> Self {
        Self {
            distance: distance_label(reading.and_then(|r| r.distance)),
            level: level_label(reading.and_then(|r| r.level)),
            timestamp: latest_timestamp_label(
                reading.map(|r| &r.timestamp).unwrap_or(&Timestamp::Missing),
            ),
        }
    }
}

impl ChartPoint {
    fn from_point(point: &SeriesPoint) -> Self {
        let time_ms = point.time_ms();
        Self {
            time_ms,
            distance: point.distance,
            tick_label: axis_tick_label(time_ms as f64),
            tooltip_label: tooltip_time_label(time_ms as f64),
            tooltip_value: tooltip_value_label(Some(point.distance)),
        }
    }
}

fn latest_status(phase: LatestPhase) -> &'static str {
    match phase {
        LatestPhase::Loading => "loading",
        LatestPhase::Loaded => "loaded",
        LatestPhase::Failed => "failed",
        LatestPhase::Polling => "polling",
    }
}

fn series_status(phase: SeriesPhase) -> &'static str {
    match phase {
        SeriesPhase::Loading => "loading",
        SeriesPhase::Loaded => "loaded",
        SeriesPhase::Failed => "failed",
    }
}
