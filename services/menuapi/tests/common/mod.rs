#![allow(dead_code)]

use axum::body::Body;
use axum::routing::RouterIntoService;
use menuapi::app::{AppState, build_router};
use menuapi::seed::Seed;
use menuapi::store::memory::InMemoryStore;
use std::sync::Arc;

pub fn app_with_seed(seed: Seed) -> RouterIntoService<Body, ()> {
    let store = InMemoryStore::new(seed);
    build_router(AppState::new(Arc::new(store))).into_service()
}

pub fn app() -> RouterIntoService<Body, ()> {
    app_with_seed(Seed::builtin())
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}
