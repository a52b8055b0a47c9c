//! OpenAPI schema aggregation for the menu API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for docs
//! and client generation.
use crate::api::{
    favorites, system,
    types::{
        EmptyFavoritesResponse, ErrorResponse, FavoriteRequest, FavoritesListResponse,
        FavoritesResponse, HealthStatus, ReorderRequest, SystemInfo,
    },
};
use crate::model::{Dish, Role, User};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "menuapi",
        version = "v1",
        description = "Restaurant menu HTTP API"
    ),
    paths(
        system::system_info,
        system::system_health,
        favorites::add_favorite,
        favorites::remove_favorite,
        favorites::list_favorites,
        favorites::reorder_favorites
    ),
    components(schemas(
        SystemInfo,
        HealthStatus,
        ErrorResponse,
        Dish,
        User,
        Role,
        FavoriteRequest,
        ReorderRequest,
        FavoritesResponse,
        EmptyFavoritesResponse,
        FavoritesListResponse
    )),
    tags(
        (name = "system", description = "System and discovery endpoints"),
        (name = "favorites", description = "Per-user favorite dishes")
    )
)]
pub struct ApiDoc;
