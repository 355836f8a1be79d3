// HTTP request handlers
use crate::presentation::app_state::AppState;
use crate::presentation::view::DashboardView;
use axum::{
    Json,
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{Stream, StreamExt};
use std::sync::Arc;
use tokio_stream::wrappers::WatchStream;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Current dashboard snapshot
pub async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardView> {
    let view = DashboardView::from_state(&state.poll_state.borrow());
    Json(view)
}

/// Push a fresh view on connect and after every state change
pub async fn dashboard_events(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = WatchStream::new(state.poll_state.clone()).map(|poll_state| {
        Event::default()
            .event("dashboard")
            .json_data(DashboardView::from_state(&poll_state))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
