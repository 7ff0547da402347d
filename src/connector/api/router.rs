use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::domain::{fallback, DrinkRequest};

use super::container::Container;

/// Build the HTTP surface: the dispensing endpoint, its usage hint, and a
/// liveness probe.
pub fn build_router(container: Arc<Container>) -> Router {
    Router::new()
        .route("/api/scp294", post(dispense).get(usage))
        .route("/healthz", get(healthz))
        .with_state(container)
}

#[derive(Deserialize)]
pub struct DispenseBody {
    #[serde(default)]
    query: String,
}

/// The request path never surfaces an upstream failure as an HTTP error:
/// rate-limit rejection resolves to the hard failsafe and everything past
/// input validation resolves inside the pipeline. The sole client error is
/// an empty query.
async fn dispense(
    State(container): State<Arc<Container>>,
    headers: HeaderMap,
    Json(body): Json<DispenseBody>,
) -> Response {
    let key = client_key(&headers);

    if !container.rate_limiter().try_acquire(&key) {
        warn!("rate limit exceeded for {key}, dispensing failsafe");
        return (StatusCode::OK, Json(fallback::hard_failsafe())).into_response();
    }

    let request = match DrinkRequest::parse(&body.query) {
        Ok(request) => request,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "Missing query"})),
            )
                .into_response();
        }
    };

    let drink = container.dispense_use_case().execute(&request).await;
    (StatusCode::OK, Json(drink)).into_response()
}

async fn usage() -> Response {
    Json(json!({
        "usage": "POST {\"query\": \"<drink request>\"} to this endpoint"
    }))
    .into_response()
}

async fn healthz() -> Response {
    Json(json!({"ok": true})).into_response()
}

/// Caller identity for the rate limiter. The service sits behind the game
/// platform's proxy, so the forwarded client address is authoritative when
/// present.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn test_client_key_prefers_forwarded_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        assert_eq!(client_key(&headers), "203.0.113.7");
    }

    #[test]
    fn test_client_key_defaults_when_header_absent() {
        assert_eq!(client_key(&HeaderMap::new()), "local");
    }

    #[test]
    fn test_client_key_ignores_empty_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static(""));

        assert_eq!(client_key(&headers), "local");
    }
}
