//! In-memory implementation of the menu store.
//!
//! # Purpose
//! Holds dishes and users in `HashMap`s guarded by `tokio::sync::RwLock`. This
//! is the only backend: the service keeps no state across restarts.
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: favorites updates run their
//!   read-modify-write entirely under the users write lock, so concurrent
//!   requests against the same user never lose an update.
//!
//! # Metrics
//! Gauges for the seeded collection sizes are published on construction.
use super::{
    DishCatalog, FavoritesUpdate, MenuStore, StoreError, StoreResult, UserDirectory,
};
use crate::model::{Dish, DishId, User, UserId};
use crate::seed::Seed;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

pub struct InMemoryStore {
    /// Dish records keyed by `id`.
    dishes: Arc<RwLock<HashMap<DishId, Dish>>>,
    /// User records keyed by `id`, each carrying its own favorites sequence.
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryStore {
    pub fn new(seed: Seed) -> Self {
        metrics::gauge!("menu_dishes_total").set(seed.dishes.len() as f64);
        metrics::gauge!("menu_users_total").set(seed.users.len() as f64);
        let dishes = seed
            .dishes
            .into_iter()
            .map(|dish| (dish.id, dish))
            .collect();
        let users = seed
            .users
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        Self {
            dishes: Arc::new(RwLock::new(dishes)),
            users: Arc::new(RwLock::new(users)),
        }
    }
}

#[async_trait]
impl DishCatalog for InMemoryStore {
    async fn get_dish(&self, dish_id: DishId) -> StoreResult<Dish> {
        self.dishes
            .read()
            .await
            .get(&dish_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("dish {dish_id}")))
    }

    async fn dish_exists(&self, dish_id: DishId) -> StoreResult<bool> {
        Ok(self.dishes.read().await.contains_key(&dish_id))
    }
}

#[async_trait]
impl UserDirectory for InMemoryStore {
    async fn get_user(&self, user_id: UserId) -> StoreResult<User> {
        self.users
            .read()
            .await
            .get(&user_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))
    }

    async fn user_exists(&self, user_id: UserId) -> StoreResult<bool> {
        Ok(self.users.read().await.contains_key(&user_id))
    }

    async fn update_favorites(
        &self,
        user_id: UserId,
        update: FavoritesUpdate,
    ) -> StoreResult<Vec<DishId>> {
        let mut users = self.users.write().await;
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| StoreError::NotFound(format!("user {user_id}")))?;
        let next = update(&user.favorites).map_err(StoreError::Rejected)?;
        user.favorites.clone_from(&next);
        Ok(next)
    }
}

#[async_trait]
impl MenuStore for InMemoryStore {
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
