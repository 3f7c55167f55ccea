//! HTTP API routes
//!
//! Defines all REST API endpoints for the server.

use crate::constants::api::PROXY_PREFIX;
use crate::error::Error;
use crate::server::state::AppState;
use crate::task::Task;
use crate::viewer::{render_snapshot, MapSnapshot};

use axum::{
    extract::{RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::{debug, warn};

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_path = resolve_static_dir(&state.config.server.static_dir);

    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/map/snapshot", post(snapshot_handler))
        .route(&format!("{}/search", PROXY_PREFIX), get(proxy_search_handler))
        .route(&format!("{}/reverse", PROXY_PREFIX), get(proxy_reverse_handler))
        .fallback_service(ServeDir::new(static_path).append_index_html_on_directories(true))
        .with_state(state)
}

/// Find the static bundle relative to cwd first, then next to the executable
fn resolve_static_dir(configured: &str) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() || path.exists() {
        return path;
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(configured)))
        .filter(|candidate| candidate.exists())
        .unwrap_or(path)
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "UPSTREAM_ERROR" => StatusCode::BAD_GATEWAY,
            "INTERNAL_ERROR" => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidCoordinates(_) => "INVALID_COORDINATES",
            Error::NotFound(_) => "NOT_FOUND",
            Error::Geo(_) | Error::Http(_) => "UPSTREAM_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
            Error::Json(_) => "INVALID_REQUEST",
            _ => "INTERNAL_ERROR",
        };
        ApiError {
            error: err.to_string(),
            code: code.to_string(),
        }
    }
}

/// Status response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server is running
    pub running: bool,
    /// Server version
    pub version: String,
    /// Upstream geocoder behind the proxy
    pub geocoder: String,
}

/// Server status endpoint
///
/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        running: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        geocoder: state.config.geocoder.base_url.clone(),
    })
}

/// Snapshot request body
#[derive(Debug, Deserialize)]
pub struct SnapshotRequest {
    /// Tasks as delivered by the task store
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Evaluation time for overdue status, defaults to the server clock
    pub now: Option<DateTime<Utc>>,
    /// Task to open in the detail panel
    pub selected: Option<String>,
}

/// Render the task map headlessly
///
/// POST /api/map/snapshot
async fn snapshot_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SnapshotRequest>,
) -> Result<Json<MapSnapshot>, ApiError> {
    let now = req.now.unwrap_or_else(Utc::now);
    let snapshot = render_snapshot(&state.config, req.tasks, now, req.selected.as_deref())?;
    Ok(Json(snapshot))
}

/// Forward search through the same-origin proxy
///
/// GET /nominatim/search
async fn proxy_search_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    proxy(&state, "search", query.as_deref()).await
}

/// Reverse lookup through the same-origin proxy
///
/// GET /nominatim/reverse
async fn proxy_reverse_handler(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    proxy(&state, "reverse", query.as_deref()).await
}

/// Relay one request to the upstream geocoder, keeping its status and body
async fn proxy(state: &AppState, endpoint: &str, query: Option<&str>) -> Result<Response, ApiError> {
    let url = state.upstream_url(endpoint, query);
    debug!(url = %url, "Proxying geocoder request");

    let upstream = state.http().get(&url).send().await.map_err(|e| {
        warn!(error = %e, endpoint, "Geocoder upstream unreachable");
        ApiError {
            error: format!("Geocoder request failed: {}", e),
            code: "UPSTREAM_ERROR".to_string(),
        }
    })?;

    let status = StatusCode::from_u16(upstream.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    let content_type = upstream
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| HeaderValue::from_bytes(v.as_bytes()).ok())
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));

    let body = upstream.bytes().await.map_err(|e| ApiError {
        error: format!("Failed to read geocoder response: {}", e),
        code: "UPSTREAM_ERROR".to_string(),
    })?;

    Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::task::fixtures::{now, task};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::sync::Mutex;
    use tower::ServiceExt;

    fn create_test_state() -> Arc<AppState> {
        Arc::new(AppState::new(Config::default()).unwrap())
    }

    fn state_with_upstream(base_url: &str) -> Arc<AppState> {
        let mut config = Config::default();
        config.geocoder.base_url = base_url.to_string();
        Arc::new(AppState::new(config).unwrap())
    }

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn post_snapshot(app: Router, body: serde_json::Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/map/snapshot")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_status_endpoint() {
        let app = create_router(create_test_state());

        let response = app
            .oneshot(Request::builder().uri("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let status: StatusResponse = serde_json::from_slice(&body).unwrap();

        assert!(status.running);
        assert_eq!(status.geocoder, "https://nominatim.openstreetmap.org");
    }

    #[tokio::test]
    async fn test_proxy_forwards_query_string() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let recorder = seen.clone();
        let upstream = Router::new().route(
            "/search",
            get(move |RawQuery(query): RawQuery| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(query.unwrap_or_default());
                    Json(serde_json::json!([{
                        "lat": "-27.36",
                        "lon": "-55.89",
                        "display_name": "Posadas"
                    }]))
                }
            }),
        );
        let app = create_router(state_with_upstream(&spawn_upstream(upstream).await));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nominatim/search?format=json&q=Posadas%20C&limit=1")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let places: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(places[0]["display_name"], "Posadas");

        assert_eq!(
            seen.lock().unwrap().as_slice(),
            ["format=json&q=Posadas%20C&limit=1".to_string()]
        );
    }

    #[tokio::test]
    async fn test_proxy_keeps_upstream_status() {
        let upstream = Router::new().route(
            "/reverse",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let app = create_router(state_with_upstream(&spawn_upstream(upstream).await));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nominatim/reverse?format=json&lat=1&lon=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_proxy_upstream_unreachable() {
        // Reserve a port, then close it so nothing is listening
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let app = create_router(state_with_upstream(&format!("http://{}", addr)));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/nominatim/search?q=Posadas")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn test_snapshot_endpoint() {
        let app = create_router(create_test_state());
        let mut late = task("late", Some((-27.40, -55.80)));
        late.end_date = now() - chrono::Duration::seconds(1);

        let response = post_snapshot(
            app,
            serde_json::json!({
                "tasks": [task("a", Some((-27.30, -55.90))), late, task("b", None)],
                "now": now(),
                "selected": "late"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let snapshot: MapSnapshot = serde_json::from_slice(&body).unwrap();

        assert_eq!(snapshot.markers.len(), 2);
        assert_eq!(snapshot.stats.total, 2);
        assert_eq!(snapshot.stats.overdue, 1);
        assert!(snapshot.selected.unwrap().overdue);
    }

    #[tokio::test]
    async fn test_snapshot_unknown_selection() {
        let app = create_router(create_test_state());

        let response = post_snapshot(
            app,
            serde_json::json!({
                "tasks": [task("a", Some((-27.30, -55.90)))],
                "selected": "missing"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let err: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(err.code, "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_snapshot_accepts_task_store_json() {
        let app = create_router(create_test_state());

        let response = post_snapshot(
            app,
            serde_json::json!({
                "tasks": [{
                    "id": "t-1",
                    "title": "Poda de árboles",
                    "startDate": "2026-03-01T08:00:00Z",
                    "endDate": "2026-03-05T18:00:00Z",
                    "priority": "urgent",
                    "location": { "lat": -27.37, "lng": -55.90, "address": "Av. Uruguay" }
                }],
                "now": "2026-03-10T12:00:00Z"
            }),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let snapshot: MapSnapshot = serde_json::from_slice(&body).unwrap();
        assert_eq!(snapshot.stats.overdue, 1);
        assert_eq!(snapshot.markers[0].task_id, "t-1");
    }
}
