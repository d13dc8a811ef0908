use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Extension, Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, SecurityConfig};
use crate::handlers::{protected::doc, public, AppState};
use crate::middleware::jwt_auth_middleware;

/// Build the full router: public routes, JWT-protected `/api/doc` routes,
/// then the global CORS layer and, when request logging is on, tracing.
pub fn app(state: AppState) -> Router {
    let config = config::config();

    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(doc_routes())
        // Global middleware
        .layer(
            ServiceBuilder::new()
                .layer(cors_layer(&config.security))
                .layer(Extension(state)),
        );

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn doc_routes() -> Router {
    Router::new()
        .route("/api/doc/:doctype/sort_options", get(doc::sort_options_get))
        .route("/api/doc/:doctype/filterable_fields", get(doc::filterable_fields_get))
        .route("/api/doc/:doctype/fields", get(doc::fields_get))
        .route("/api/doc/:doctype/list", post(doc::list_post))
        .route_layer(middleware::from_fn(jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if !security.enable_cors {
        return CorsLayer::new();
    }

    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
