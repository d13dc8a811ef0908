use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::{json, Value};

use super::AppState;

/// GET / - service description
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "CRM View API",
            "version": version,
            "description": "List, filter and form metadata for CRM doctypes",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "sort_options": "GET /api/doc/:doctype/sort_options (protected)",
                "filterable_fields": "GET /api/doc/:doctype/filterable_fields (protected)",
                "fields": "GET /api/doc/:doctype/fields (protected)",
                "list": "POST /api/doc/:doctype/list (protected)",
            }
        }
    }))
}

/// GET /health - store connectivity
pub async fn health(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => {
            // Callers are unauthenticated; the cause stays in the log
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "database": "unavailable"
                    }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerRegistry;
    use crate::database::{DatabaseError, DocStore, MemoryStore, Record};
    use crate::filter::Filter;
    use crate::meta::DocTypeMeta;
    use crate::view::ViewSettings;
    use async_trait::async_trait;
    use axum::body::to_bytes;
    use std::sync::Arc;

    /// Store whose connection is gone
    struct DownStore;

    fn down() -> DatabaseError {
        DatabaseError::Sqlx(sqlx::Error::Protocol("connection refused by 10.0.0.7:5432".into()))
    }

    #[async_trait]
    impl DocStore for DownStore {
        async fn get_meta(&self, _doctype: &str) -> Result<DocTypeMeta, DatabaseError> {
            Err(down())
        }

        async fn get_all(&self, _filter: &Filter) -> Result<Vec<Record>, DatabaseError> {
            Err(down())
        }

        async fn count(&self, _filter: &Filter) -> Result<i64, DatabaseError> {
            Err(down())
        }

        async fn view_settings(&self, _name: &str) -> Result<Option<ViewSettings>, DatabaseError> {
            Err(down())
        }

        async fn user_views(&self, _doctype: &str, _user: &str) -> Result<Vec<ViewSettings>, DatabaseError> {
            Err(down())
        }

        async fn health_check(&self) -> Result<(), DatabaseError> {
            Err(down())
        }
    }

    async fn health_of(store: Arc<dyn DocStore>) -> (StatusCode, Value) {
        let state = AppState::new(store, ControllerRegistry::new());
        let response = health(Extension(state)).await.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn healthy_store_reports_ok() {
        let (status, body) = health_of(Arc::new(MemoryStore::new())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["database"], "ok");
    }

    #[tokio::test]
    async fn failed_store_hides_the_cause() {
        let (status, body) = health_of(Arc::new(DownStore)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["status"], "degraded");
        assert!(!body.to_string().contains("10.0.0.7"), "leaked: {}", body);
    }
}
