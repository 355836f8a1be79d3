// Poll service - initial loads plus the periodic latest-reading refresh
use crate::application::json_fetcher::JsonFetcher;
use crate::domain::level::LevelCalibration;
use crate::domain::poll_state::PollState;
use crate::domain::reading::{Reading, ingest_series};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct PollEndpoints {
    pub latest_url: String,
    pub series_url: String,
}

/// Owns the poll state. Views observe it through [`PollService::subscribe`].
#[derive(Clone)]
pub struct PollService {
    fetcher: Arc<dyn JsonFetcher>,
    endpoints: PollEndpoints,
    interval: Duration,
    calibration: Option<LevelCalibration>,
    state: Arc<watch::Sender<PollState>>,
}

impl PollService {
    pub fn new(
        fetcher: Arc<dyn JsonFetcher>,
        endpoints: PollEndpoints,
        interval: Duration,
        calibration: Option<LevelCalibration>,
    ) -> Self {
        let (state, _) = watch::channel(PollState::default());
        Self {
            fetcher,
            endpoints,
            interval,
            calibration,
            state: Arc::new(state),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    /// Kick off both initial loads and the refresh ticker.
    ///
    /// The first tick fires one full interval after start. Cancelling the
    /// token stops further ticks; fetches already in flight still complete
    /// and write into the state.
    pub fn start(self, cancel: CancellationToken) -> JoinHandle<()> {
        tracing::info!(
            "Polling {} every {:?} (history from {})",
            self.endpoints.latest_url,
            self.interval,
            self.endpoints.series_url
        );

        self.spawn_series_load();
        self.spawn_latest_fetch();

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + self.interval, self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.state.send_modify(PollState::begin_poll);
                        self.spawn_latest_fetch();
                    }
                }
            }

            tracing::info!("Poller stopped");
        })
    }

    fn spawn_series_load(&self) {
        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        let url = self.endpoints.series_url.clone();
        let calibration = self.calibration;

        tokio::spawn(async move {
            let outcome = match fetcher.fetch_json(&url).await {
                Ok(raw) => {
                    let series = ingest_series(&raw, calibration.as_ref());
                    tracing::debug!("Loaded {} history points", series.len());
                    Ok(series)
                }
                Err(e) => {
                    tracing::warn!("Error fetching history: {}", e);
                    Err(e.message)
                }
            };
            state.send_modify(|s| s.apply_series(outcome));
        });
    }

    fn spawn_latest_fetch(&self) {
        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        let url = self.endpoints.latest_url.clone();
        let calibration = self.calibration;

        tokio::spawn(async move {
            let outcome = match fetcher.fetch_json(&url).await {
                Ok(raw) => Ok(Reading::from_json(&raw, calibration.as_ref())),
                Err(e) => {
                    tracing::warn!("Error fetching latest reading: {}", e);
                    Err(e.message)
                }
            };
            state.send_modify(|s| s.apply_latest(outcome));
        });
    }
}
