// Application state for HTTP handlers
use crate::domain::poll_state::PollState;
use tokio::sync::watch;

#[derive(Clone)]
pub struct AppState {
    pub poll_state: watch::Receiver<PollState>,
}
