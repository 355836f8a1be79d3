// HTTP fetcher - reqwest implementation of the JSON fetch seam
use crate::application::json_fetcher::JsonFetcher;
use crate::infrastructure::error::FetchFailure;
use async_trait::async_trait;
use reqwest::{StatusCode, header};
use serde_json::Value;

/// Used when a transport error carries no message of its own.
pub const TRANSPORT_FALLBACK_MESSAGE: &str = "Erro de comunicação com o servidor";

#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for HttpFetcher {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchFailure> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| FetchFailure::new(transport_failure_message(&e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.bytes().await {
                Ok(body) => body.to_vec(),
                Err(e) => {
                    tracing::debug!("Could not read error body from {}: {}", url, e);
                    Vec::new()
                }
            };
            return Err(FetchFailure::new(status_failure_message(status, &body)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| FetchFailure::new(transport_failure_message(&e.to_string())))
    }
}

/// `Erro <status>: <message>`, where the message comes from the JSON error
/// body (`message`, then `detail`) or else the status text.
pub fn status_failure_message(status: StatusCode, body: &[u8]) -> String {
    let message = match serde_json::from_slice::<Value>(body) {
        Ok(parsed) => ["message", "detail"]
            .iter()
            .find_map(|key| parsed.get(key).and_then(Value::as_str))
            .filter(|m| !m.trim().is_empty())
            .map(str::to_string),
        Err(e) => {
            tracing::debug!("Ignoring unparsable error body for status {}: {}", status, e);
            None
        }
    };

    let message = message.unwrap_or_else(|| status_text(status));
    format!("Erro {}: {}", status.as_u16(), message)
}

pub fn transport_failure_message(message: &str) -> String {
    if message.trim().is_empty() {
        TRANSPORT_FALLBACK_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};
    use serde_json::json;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn test_router() -> Router {
        Router::new()
            .route(
                "/leituras/ultima",
                get(|| async { Json(json!({"distancia": 42.0, "nivel": 80})) }),
            )
            .route(
                "/missing",
                get(|| async {
                    (
                        axum::http::StatusCode::NOT_FOUND,
                        Json(json!({"message": "not found"})),
                    )
                }),
            )
            .route(
                "/detail",
                get(|| async {
                    (
                        axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"detail": "Erro interno do servidor ao buscar histórico"})),
                    )
                }),
            )
            .route(
                "/broken",
                get(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "<html>oops") }),
            )
            .route("/not-json", get(|| async { "plain text" }))
    }

    #[test]
    fn test_status_message_from_body() {
        let message = status_failure_message(StatusCode::NOT_FOUND, br#"{"message":"not found"}"#);
        assert_eq!(message, "Erro 404: not found");
    }

    #[test]
    fn test_status_message_falls_back_to_status_text() {
        let message = status_failure_message(StatusCode::INTERNAL_SERVER_ERROR, b"not json");
        assert_eq!(message, "Erro 500: Internal Server Error");

        let message = status_failure_message(StatusCode::BAD_GATEWAY, br#"{"message":""}"#);
        assert_eq!(message, "Erro 502: Bad Gateway");

        let message = status_failure_message(StatusCode::from_u16(599).unwrap(), b"");
        assert_eq!(message, "Erro 599: 599");
    }

    #[test]
    fn test_transport_message_fallback() {
        assert_eq!(transport_failure_message(""), TRANSPORT_FALLBACK_MESSAGE);
        assert_eq!(transport_failure_message("  "), TRANSPORT_FALLBACK_MESSAGE);
        assert_eq!(transport_failure_message("connection refused"), "connection refused");
    }

    #[tokio::test]
    async fn test_fetch_success_returns_payload() {
        let base = serve(test_router()).await;
        let fetcher = HttpFetcher::default();

        let payload = fetcher.fetch_json(&format!("{}/leituras/ultima", base)).await.unwrap();
        assert_eq!(payload, json!({"distancia": 42.0, "nivel": 80}));
    }

    #[tokio::test]
    async fn test_fetch_error_statuses() {
        let base = serve(test_router()).await;
        let fetcher = HttpFetcher::default();

        let err = fetcher.fetch_json(&format!("{}/missing", base)).await.unwrap_err();
        assert_eq!(err.message, "Erro 404: not found");

        let err = fetcher.fetch_json(&format!("{}/broken", base)).await.unwrap_err();
        assert_eq!(err.message, "Erro 500: Internal Server Error");

        let err = fetcher.fetch_json(&format!("{}/detail", base)).await.unwrap_err();
        assert_eq!(err.message, "Erro 500: Erro interno do servidor ao buscar histórico");
    }

    #[tokio::test]
    async fn test_fetch_non_json_success_fails() {
        let base = serve(test_router()).await;
        let err = HttpFetcher::default()
            .fetch_json(&format!("{}/not-json", base))
            .await
            .unwrap_err();
        assert!(!err.message.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_transport_failure() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = HttpFetcher::default()
            .fetch_json(&format!("http://{}/leituras", addr))
            .await
            .unwrap_err();
        assert!(!err.message.trim().is_empty());
    }
}
