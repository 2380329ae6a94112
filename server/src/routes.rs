//! HTTP routes for the strength API.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use fxstrength_common::Timestamp;
use fxstrength_engine::Snapshot;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Version reported by the status endpoints.
pub const API_VERSION: &str = "1.0.0";

/// Body of the root and health endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub timestamp: Timestamp,
    pub version: String,
}

impl StatusResponse {
    fn now(status: &str) -> Self {
        Self {
            status: status.to_string(),
            timestamp: fxstrength_common::now(),
            version: API_VERSION.to_string(),
        }
    }
}

/// Build the API router.
///
/// Cross-origin requests are accepted from any origin, with any method and
/// header, credentials included.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/status", get(health_check))
        .route("/api/v1/strength", get(get_currency_strength))
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse::now("Currency Strength Widget API is running"))
}

async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse::now("healthy"))
}

#[instrument(skip(state))]
async fn get_currency_strength(State(state): State<AppState>) -> Result<Json<Snapshot>, ApiError> {
    let snapshot = state.engine.get_strength_data().await?;
    Ok(Json(Snapshot::clone(&snapshot)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use chrono::Duration;
    use fxstrength_common::{ManualClock, STATIC_PAIRS};
    use fxstrength_engine::{
        MockStrengthSource, RandomStrengthSource, StrengthEngine, StrengthEngineConfig,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app_with(source: Arc<dyn fxstrength_engine::StrengthSource>) -> (Arc<ManualClock>, Router) {
        let clock = Arc::new(ManualClock::default());
        let engine = StrengthEngine::new(source, clock.clone(), StrengthEngineConfig::default());
        (clock, router(AppState::new(Arc::new(engine))))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_status() {
        let (_, app) = app_with(Arc::new(RandomStrengthSource::with_seed(3)));
        let (status, body) = send(&app, get_request("/")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Currency Strength Widget API is running");
        assert_eq!(body["version"], "1.0.0");
        assert!(body["timestamp"].is_string());
        assert_eq!(body.as_object().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_health_ignores_cache_state() {
        let source = Arc::new(MockStrengthSource::uniform(5.0));
        source.fail_with("broken");
        let (_, app) = app_with(source);

        let (status, body) = send(&app, get_request("/api/v1/status")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], "1.0.0");

        let parsed: StatusResponse = serde_json::from_value(body).unwrap();
        let age = fxstrength_common::now() - parsed.timestamp;
        assert!(age < Duration::seconds(5));
    }

    #[tokio::test]
    async fn test_strength_body_shape() {
        let (_, app) = app_with(Arc::new(RandomStrengthSource::with_seed(3)));
        let (status, body) = send(&app, get_request("/api/v1/strength")).await;

        assert_eq!(status, StatusCode::OK);
        let object = body.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert!(object["timestamp"].is_string());

        let strengths = object["strength_data"].as_object().unwrap();
        assert_eq!(strengths.len(), STATIC_PAIRS.len());
        for pair in &STATIC_PAIRS {
            let value = strengths[&pair.code()].as_f64().unwrap();
            assert!((3.0..=7.0).contains(&value));
        }

        let aggregates = object["currency_aggregates"].as_object().unwrap();
        assert_eq!(aggregates.len(), 3);
        for key in ["scores", "counts", "averages"] {
            let map = aggregates[key].as_object().unwrap();
            assert_eq!(map.len(), 8, "{}", key);
            assert!(map.contains_key("USD") && map.contains_key("NZD"));
        }
        assert!(aggregates["counts"]["EUR"].is_u64());
    }

    #[tokio::test]
    async fn test_strength_cached_between_requests() {
        let (clock, app) = app_with(Arc::new(RandomStrengthSource::with_seed(3)));

        let (_, first) = send(&app, get_request("/api/v1/strength")).await;
        clock.advance(Duration::seconds(299));
        let (_, second) = send(&app, get_request("/api/v1/strength")).await;
        assert_eq!(first, second);

        clock.advance(Duration::seconds(2));
        let (_, third) = send(&app, get_request("/api/v1/strength")).await;
        assert_ne!(first["timestamp"], third["timestamp"]);
        assert_ne!(first["strength_data"], third["strength_data"]);
    }

    #[tokio::test]
    async fn test_strength_failure_maps_to_500() {
        let source = Arc::new(MockStrengthSource::uniform(5.0));
        source.fail_with("rng unavailable");
        let (_, app) = app_with(source);

        let (status, body) = send(&app, get_request("/api/v1/strength")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({ "detail": "Error generating strength data: rng unavailable" })
        );
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin_with_credentials() {
        let (_, app) = app_with(Arc::new(RandomStrengthSource::with_seed(3)));
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/v1/strength")
            .header(header::ORIGIN, "https://widget.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-widget-id")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://widget.example"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "x-widget-id");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (_, app) = app_with(Arc::new(RandomStrengthSource::with_seed(3)));
        let response = app.oneshot(get_request("/api/v2/strength")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
