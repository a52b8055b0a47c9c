//! Menu HTTP application wiring.
//!
//! # Purpose
//! Builds the Axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and testable.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::favorites::FavoritesService;
use crate::observability;
use crate::store::MenuStore;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_opentelemetry::OpenTelemetrySpanExt;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub api_version: String,
    pub store: Arc<dyn MenuStore>,
    pub favorites: FavoritesService,
}

impl AppState {
    /// Wire one store in as both the dish catalog and the user directory.
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: MenuStore + 'static,
    {
        Self {
            api_version: "v1".to_string(),
            favorites: FavoritesService::new(store.clone(), store.clone()),
            store,
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer =
        TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
            let parent = observability::trace_context_from_headers(request.headers());
            let span = tracing::info_span!(
                "http.request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version()
            );
            span.set_parent(parent);
            span
        });

    Router::new()
        .route(
            "/system/info",
            axum::routing::get(api::system::system_info),
        )
        .route(
            "/system/health",
            axum::routing::get(api::system::system_health),
        )
        .route(
            "/favorites/add",
            axum::routing::post(api::favorites::add_favorite),
        )
        .route(
            "/favorites/remove",
            axum::routing::delete(api::favorites::remove_favorite),
        )
        .route(
            "/favorites/list",
            axum::routing::get(api::favorites::list_favorites),
        )
        .route(
            "/favorites/reorder",
            axum::routing::put(api::favorites::reorder_favorites),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()),
        )
        .layer(trace_layer)
        .with_state(state)
}
