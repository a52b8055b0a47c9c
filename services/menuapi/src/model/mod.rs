//! Menu data model module.
//!
//! # Purpose
//! Re-exports the dish and user records shared by the store, the favorites
//! service and the HTTP API.
mod dish;
mod user;

pub use dish::{Dish, DishId};
pub use user::{Role, User, UserId};
