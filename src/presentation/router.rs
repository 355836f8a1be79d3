// Router for the dashboard view endpoints
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{dashboard_events, get_dashboard, health_check};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/dashboard/events", get(dashboard_events))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::poll_state::PollState;
    use crate::domain::reading::Reading;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tokio::sync::watch;
    use tower::ServiceExt;

    fn router_with(state: PollState) -> (Router, watch::Sender<PollState>) {
        let (tx, rx) = watch::channel(state);
        (build_router(Arc::new(AppState { poll_state: rx })), tx)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_health_check() {
        let (router, _tx) = router_with(PollState::default());
        let response = router
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }

    #[tokio::test]
    async fn test_dashboard_reflects_latest_state() {
        let (router, tx) = router_with(PollState::default());

        let (status, body) = get_json(router.clone(), "/api/dashboard").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["loading"]["latest"], json!(true));
        assert_eq!(body["latest"], Value::Null);

        tx.send_modify(|s| {
            s.apply_latest(Ok(Reading::from_json(&json!({"distancia": 87.0, "nivel": 15}), None)));
            s.apply_series(Err("Erro 404: not found".to_string()));
        });

        let (_, body) = get_json(router, "/api/dashboard").await;
        assert_eq!(body["latest"]["distance"], json!("87 cm"));
        assert_eq!(body["latest"]["level"], json!("15%"));
        assert_eq!(body["error"], json!("Erro 404: not found"));
        assert_eq!(body["series_status"], json!("failed"));
    }

    #[tokio::test]
    async fn test_events_endpoint_is_an_event_stream() {
        let (router, _tx) = router_with(PollState::default());
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/dashboard/events")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/event-stream"
        );
    }
}
