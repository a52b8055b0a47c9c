//! User records and their favorites sequence.
//!
//! # Invariants
//! - `favorites` never holds the same dish id twice.
//! - Only the favorites service mutates `favorites` after startup.
use super::DishId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type UserId = i64;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq)]
pub struct User {
    #[schema(value_type = i64)]
    pub id: UserId,
    pub name: String,
    pub login: String,
    // Seed credentials are plaintext; they are accepted on load and never echoed back.
    #[serde(default, skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    #[schema(value_type = Vec<i64>)]
    pub favorites: Vec<DishId>,
}
