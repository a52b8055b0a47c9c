//! Storage seams for the menu service.
//!
//! # Purpose
//! Declares the two collaborators the favorites service consumes: a dish
//! catalog answering existence and lookup queries, and a user directory that
//! owns each user's favorites sequence and applies updates atomically.
use crate::model::{Dish, DishId, User, UserId};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    /// The update closure refused the current favorites; carries its error.
    #[error("favorites update rejected: {0}")]
    Rejected(anyhow::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Transformation applied to a user's current favorites under the directory's
/// write lock. Returning an error leaves the stored sequence untouched.
pub type FavoritesUpdate = Box<dyn FnOnce(&[DishId]) -> anyhow::Result<Vec<DishId>> + Send>;

#[async_trait]
pub trait DishCatalog: Send + Sync {
    async fn get_dish(&self, dish_id: DishId) -> StoreResult<Dish>;
    async fn dish_exists(&self, dish_id: DishId) -> StoreResult<bool>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_user(&self, user_id: UserId) -> StoreResult<User>;
    async fn user_exists(&self, user_id: UserId) -> StoreResult<bool>;

    /// Replace the user's favorites with the output of `update`.
    ///
    /// Fails with [`StoreError::NotFound`] for unknown users and with
    /// [`StoreError::Rejected`] when `update` refuses the current sequence.
    async fn update_favorites(
        &self,
        user_id: UserId,
        update: FavoritesUpdate,
    ) -> StoreResult<Vec<DishId>>;
}

#[async_trait]
pub trait MenuStore: DishCatalog + UserDirectory {
    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
