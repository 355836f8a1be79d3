// Poll state - everything the dashboard view renders from
use super::reading::{Reading, ReadingSeries};

/// Series timeline. Loaded once, never re-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesPhase {
    Loading,
    Loaded,
    Failed,
}

/// Latest-reading timeline. `Polling` marks a tick in flight after the
/// initial load settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestPhase {
    Loading,
    Loaded,
    Failed,
    Polling,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PollState {
    pub latest: Option<Reading>,
    pub series: ReadingSeries,
    pub last_error: Option<String>,
    pub latest_phase: LatestPhase,
    pub series_phase: SeriesPhase,
    /// First-paint gates. They flip to false once and never back.
    pub loading_latest: bool,
    pub loading_series: bool,
}

impl Default for PollState {
    fn default() -> Self {
        Self {
            latest: None,
            series: ReadingSeries::default(),
            last_error: None,
            latest_phase: LatestPhase::Loading,
            series_phase: SeriesPhase::Loading,
            loading_latest: true,
            loading_series: true,
        }
    }
}

impl PollState {
    pub fn begin_poll(&mut self) {
        if !self.loading_latest {
            self.latest_phase = LatestPhase::Polling;
        }
    }

    pub fn apply_latest(&mut self, outcome: Result<Reading, String>) {
        match outcome {
            Ok(reading) => {
                self.latest = Some(reading);
                self.latest_phase = LatestPhase::Loaded;
                self.last_error = None;
            }
            Err(message) => {
                self.latest_phase = LatestPhase::Failed;
                self.last_error = Some(message);
            }
        }
        self.loading_latest = false;
    }

    pub fn apply_series(&mut self, outcome: Result<ReadingSeries, String>) {
        match outcome {
            Ok(series) => {
                self.series = series;
                self.series_phase = SeriesPhase::Loaded;
                self.last_error = None;
            }
            Err(message) => {
                self.series_phase = SeriesPhase::Failed;
                self.last_error = Some(message);
            }
        }
        self.loading_series = false;
    }
}
