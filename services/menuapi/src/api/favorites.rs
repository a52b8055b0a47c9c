//! Favorites API handlers.
//!
//! # Purpose
//! Implements the add, remove, list and reorder endpoints over
//! [`FavoritesService`](crate::favorites::FavoritesService). Ids are passed on
//! as received; a field missing from the body is handed over as `null`.
use crate::api::error::ApiError;
use crate::api::parse_body;
use crate::api::types::{
    EmptyFavoritesResponse, FavoriteRequest, FavoritesListResponse, FavoritesResponse,
    ReorderRequest,
};
use crate::app::AppState;
use crate::favorites::FavoritesListing;
use axum::Json;
use axum::body::Bytes;
use axum::extract::{Query, State};
use serde_json::Value;
use std::collections::HashMap;

const ADDED_MESSAGE: &str = "Prato adicionado aos favoritos";
const REMOVED_MESSAGE: &str = "Prato removido dos favoritos";
const EMPTY_MESSAGE: &str = "Sua lista de favoritos está vazia";
const REORDERED_MESSAGE: &str = "Lista de favoritos reordenada";

#[utoipa::path(
    post,
    path = "/favorites/add",
    tag = "favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Dish added to favorites", body = FavoritesResponse),
        (status = 400, description = "User not identified", body = crate::api::types::ErrorResponse),
        (status = 404, description = "User or dish not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Dish already favorited", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn add_favorite(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let body: FavoriteRequest = parse_body(&body)?;
    let user_id = body.user_id.unwrap_or_default();
    let dish_id = body.dish_id.unwrap_or_default();
    let favorites = state.favorites.add(&user_id, &dish_id).await?;
    Ok(Json(FavoritesResponse {
        message: ADDED_MESSAGE.to_string(),
        favorites,
    }))
}

#[utoipa::path(
    delete,
    path = "/favorites/remove",
    tag = "favorites",
    request_body = FavoriteRequest,
    responses(
        (status = 200, description = "Dish removed from favorites", body = FavoritesResponse),
        (status = 400, description = "User not identified", body = crate::api::types::ErrorResponse),
        (status = 404, description = "User or dish not found", body = crate::api::types::ErrorResponse),
        (status = 409, description = "Dish not in favorites", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn remove_favorite(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let body: FavoriteRequest = parse_body(&body)?;
    let user_id = body.user_id.unwrap_or_default();
    let dish_id = body.dish_id.unwrap_or_default();
    let favorites = state.favorites.remove(&user_id, &dish_id).await?;
    Ok(Json(FavoritesResponse {
        message: REMOVED_MESSAGE.to_string(),
        favorites,
    }))
}

#[utoipa::path(
    get,
    path = "/favorites/list",
    tag = "favorites",
    params(
        ("userId" = Option<i64>, Query, description = "User identifier; may also be sent in a JSON body")
    ),
    responses(
        (status = 200, description = "Favorite dishes in stored order", body = FavoritesListResponse),
        (status = 400, description = "User not identified", body = crate::api::types::ErrorResponse),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn list_favorites(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    body: Bytes,
) -> Result<Json<FavoritesListResponse>, ApiError> {
    let user_id = match params.get("userId") {
        Some(value) => Value::String(value.clone()),
        None => parse_body::<FavoriteRequest>(&body)?
            .user_id
            .unwrap_or_default(),
    };
    let response = match state.favorites.list(&user_id).await? {
        FavoritesListing::Empty => FavoritesListResponse::Empty(EmptyFavoritesResponse {
            message: EMPTY_MESSAGE.to_string(),
            favorites: Vec::new(),
        }),
        FavoritesListing::Dishes(dishes) => FavoritesListResponse::Dishes(dishes),
    };
    Ok(Json(response))
}

#[utoipa::path(
    put,
    path = "/favorites/reorder",
    tag = "favorites",
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Favorites replaced with the given order", body = FavoritesResponse),
        (status = 400, description = "User not identified, orderedIds not an array, or ids not favorited", body = crate::api::types::ErrorResponse),
        (status = 404, description = "User not found", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn reorder_favorites(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FavoritesResponse>, ApiError> {
    let body: ReorderRequest = parse_body(&body)?;
    let user_id = body.user_id.unwrap_or_default();
    let ordered_ids = body.ordered_ids.unwrap_or_default();
    let favorites = state.favorites.reorder(&user_id, &ordered_ids).await?;
    Ok(Json(FavoritesResponse {
        message: REORDERED_MESSAGE.to_string(),
        favorites,
    }))
}
