//! Dish records served by the catalog.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type DishId = i64;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    #[schema(value_type = i64)]
    pub id: DishId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub ingredients: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub views: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
}
