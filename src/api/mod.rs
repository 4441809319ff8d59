use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::store::SnapshotStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SnapshotStore,
}

/// Error body for the read surface: `{"error": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Build the Axum router for the read API.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/classements", get(classements_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// GET / (liveness banner)
async fn index_handler() -> &'static str {
    "Football Data API is running!"
}

/// GET /api/classements
///
/// Serves the last published snapshot verbatim, or a structured 500 when
/// no snapshot has been published yet or the file on disk is unreadable.
async fn classements_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, (StatusCode, Json<ErrorBody>)> {
    state.store.load().map(Json).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: format!("Failed to load data: {e:#}"),
            }),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::models::{MatchRecord, MatchStatus, Snapshot};
    use serde_json::json;

    fn state_with(store: SnapshotStore) -> State<Arc<AppState>> {
        State(Arc::new(AppState { store }))
    }

    #[tokio::test]
    async fn index_reports_liveness() {
        assert_eq!(index_handler().await, "Football Data API is running!");
    }

    #[tokio::test]
    async fn read_before_any_publish_returns_a_structured_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("classements.json"));

        let response = classements_handler(state_with(store)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(
            message.starts_with("Failed to load data: "),
            "got: {message}"
        );
    }

    #[tokio::test]
    async fn read_after_publish_returns_the_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::new(dir.path().join("classements.json"));
        let snapshot = Snapshot {
            ongoing: vec![MatchRecord {
                id: 42,
                home_team: json!("Marseille"),
                away_team: json!("Lyon"),
                start_time: None,
                status: MatchStatus::InProgress,
                lineup: None,
            }],
            finished: vec![],
            not_started: vec![],
        };
        store.publish(&snapshot).unwrap();

        let response = classements_handler(state_with(store)).await.into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let served: Snapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(served, snapshot);
    }

    #[tokio::test]
    async fn corrupt_snapshot_is_reported_not_served() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classements.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = SnapshotStore::new(path);

        let response = classements_handler(state_with(store)).await.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
