//! HTTP API request/response types.
//!
//! # Purpose
//! Defines payload shapes for the menu REST API and OpenAPI schema
//! generation. Field names follow the camelCase wire format clients already
//! use.
use crate::model::{Dish, DishId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct SystemInfo {
    pub api_version: String,
    pub store_backend: String,
    pub durable_storage: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Body of add/remove requests and the optional body of list requests.
///
/// Ids stay raw JSON until the handler resolves them, so numeric strings are
/// accepted the same way numbers are.
#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<i64>)]
    pub dish_id: Option<Value>,
}

#[derive(Debug, Deserialize, ToSchema, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[schema(value_type = Option<i64>)]
    pub user_id: Option<Value>,
    #[schema(value_type = Option<Vec<i64>>)]
    pub ordered_ids: Option<Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct FavoritesResponse {
    pub message: String,
    #[schema(value_type = Vec<i64>)]
    pub favorites: Vec<DishId>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct EmptyFavoritesResponse {
    pub message: String,
    pub favorites: Vec<Dish>,
}

/// A non-empty listing is a bare array of dishes; an empty one carries a message.
#[derive(Debug, Serialize, ToSchema, Clone)]
#[serde(untagged)]
pub enum FavoritesListResponse {
    Dishes(Vec<Dish>),
    Empty(EmptyFavoritesResponse),
}
