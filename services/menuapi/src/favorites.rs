//! Favorites management for menu users.
//!
//! # Purpose
//! Validates and applies changes to a user's ordered list of favorite dishes
//! and answers listing queries. Ids arrive as loosely typed JSON values and are
//! resolved here, so every rejection is counted by the same code path.
//!
//! # Key invariants and assumptions
//! - Checks run in a fixed order: user id present, user exists, dish exists,
//!   then the operation-specific rule.
//! - A rejected call never changes the stored sequence. Rule checks that depend
//!   on the current favorites run inside [`UserDirectory::update_favorites`],
//!   under the same lock as the write.
//! - The stored sequence never holds a dish id twice.
//!
//! # Id resolution
//! `userId` and `dishId` accept JSON numbers or numeric strings, read up to the
//! first non-digit. A null, zero, false or empty `userId` means the caller is
//! not identified; any other unreadable id simply matches no record.
//! `orderedIds` elements only match when they are JSON integers.
//!
//! # Reorder semantics
//! Reorder replaces the stored sequence with the caller's list. Favorites the
//! caller leaves out are dropped from the list.
use crate::model::{Dish, DishId, UserId};
use crate::store::{DishCatalog, FavoritesUpdate, StoreError, UserDirectory};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FavoritesError {
    #[error("Usuário não identificado")]
    MissingUserId,
    #[error("Usuário não encontrado")]
    UserNotFound,
    #[error("Prato não encontrado")]
    DishNotFound,
    #[error("Prato já está nos favoritos")]
    DuplicateFavorite,
    #[error("Prato não está nos favoritos")]
    FavoriteNotPresent,
    #[error("Ordem inválida: orderedIds deve ser um array")]
    InvalidOrder,
    #[error("IDs inválidos: {}", .0.join(", "))]
    InvalidIds(Vec<String>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FavoritesError {
    /// Stable machine-readable code, shared by API bodies and metric labels.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingUserId => "missing_user_id",
            Self::UserNotFound => "user_not_found",
            Self::DishNotFound => "dish_not_found",
            Self::DuplicateFavorite => "duplicate_favorite",
            Self::FavoriteNotPresent => "favorite_not_present",
            Self::InvalidOrder => "invalid_order",
            Self::InvalidIds(_) => "invalid_ids",
            Self::Store(_) => "internal",
        }
    }
}

pub type FavoritesResult<T> = Result<T, FavoritesError>;

/// Result of listing a user's favorites.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesListing {
    /// The user has no favorites stored.
    Empty,
    /// Dish records in stored order. Ids whose dish no longer exists are skipped.
    Dishes(Vec<Dish>),
}

#[derive(Clone)]
pub struct FavoritesService {
    dishes: Arc<dyn DishCatalog>,
    users: Arc<dyn UserDirectory>,
}

impl FavoritesService {
    pub fn new(dishes: Arc<dyn DishCatalog>, users: Arc<dyn UserDirectory>) -> Self {
        Self { dishes, users }
    }

    /// Fail with `UserNotFound` unless `user_id` resolves.
    pub async fn ensure_user(&self, user_id: UserId) -> FavoritesResult<()> {
        if self.users.user_exists(user_id).await? {
            Ok(())
        } else {
            Err(FavoritesError::UserNotFound)
        }
    }

    async fn ensure_dish(&self, dish_id: DishId) -> FavoritesResult<()> {
        if self.dishes.dish_exists(dish_id).await? {
            Ok(())
        } else {
            Err(FavoritesError::DishNotFound)
        }
    }

    async fn resolve_user(&self, raw: &Value) -> FavoritesResult<UserId> {
        let user_id = resolve_user_id(raw)?;
        self.ensure_user(user_id).await?;
        Ok(user_id)
    }

    async fn resolve_dish(&self, raw: &Value) -> FavoritesResult<DishId> {
        let dish_id = parse_id(raw).ok_or(FavoritesError::DishNotFound)?;
        self.ensure_dish(dish_id).await?;
        Ok(dish_id)
    }

    /// Run `rule` against the stored favorites and persist its output.
    async fn apply<F>(&self, user_id: UserId, rule: F) -> FavoritesResult<Vec<DishId>>
    where
        F: FnOnce(&[DishId]) -> FavoritesResult<Vec<DishId>> + Send + 'static,
    {
        let update: FavoritesUpdate = Box::new(move |current| Ok(rule(current)?));
        match self.users.update_favorites(user_id, update).await {
            Ok(favorites) => Ok(favorites),
            Err(StoreError::NotFound(_)) => Err(FavoritesError::UserNotFound),
            Err(StoreError::Rejected(err)) => Err(err
                .downcast::<FavoritesError>()
                .unwrap_or_else(|err| StoreError::Unexpected(err).into())),
            Err(err) => Err(err.into()),
        }
    }

    /// Append `dish_id` to the end of the user's favorites.
    pub async fn add(&self, user_id: &Value, dish_id: &Value) -> FavoritesResult<Vec<DishId>> {
        let result: FavoritesResult<Vec<DishId>> = async {
            let user_id = self.resolve_user(user_id).await?;
            let dish_id = self.resolve_dish(dish_id).await?;
            self.apply(user_id, move |current| add_favorite(current, dish_id))
                .await
        }
        .await;
        record_outcome(Some("menu_favorites_added_total"), &result);
        result
    }

    /// Remove `dish_id` from the user's favorites.
    pub async fn remove(&self, user_id: &Value, dish_id: &Value) -> FavoritesResult<Vec<DishId>> {
        let result: FavoritesResult<Vec<DishId>> = async {
            let user_id = self.resolve_user(user_id).await?;
            let dish_id = self.resolve_dish(dish_id).await?;
            self.apply(user_id, move |current| remove_favorite(current, dish_id))
                .await
        }
        .await;
        record_outcome(Some("menu_favorites_removed_total"), &result);
        result
    }

    /// Resolve the user's favorites to dish records, in stored order.
    pub async fn list(&self, user_id: &Value) -> FavoritesResult<FavoritesListing> {
        let result = self.list_resolved(user_id).await;
        record_outcome(None, &result);
        result
    }

    async fn list_resolved(&self, user_id: &Value) -> FavoritesResult<FavoritesListing> {
        let user_id = resolve_user_id(user_id)?;
        let user = match self.users.get_user(user_id).await {
            Ok(user) => user,
            Err(StoreError::NotFound(_)) => return Err(FavoritesError::UserNotFound),
            Err(err) => return Err(err.into()),
        };
        if user.favorites.is_empty() {
            return Ok(FavoritesListing::Empty);
        }
        let mut dishes = Vec::with_capacity(user.favorites.len());
        for dish_id in &user.favorites {
            match self.dishes.get_dish(*dish_id).await {
                Ok(dish) => dishes.push(dish),
                Err(StoreError::NotFound(_)) => {
                    tracing::warn!(user_id, dish_id, "favorite references a missing dish");
                }
                Err(err) => return Err(err.into()),
            }
        }
        Ok(FavoritesListing::Dishes(dishes))
    }

    /// Replace the user's favorites with `ordered_ids`.
    ///
    /// `ordered_ids` must be a JSON array whose elements are all current
    /// favorites of the user.
    pub async fn reorder(
        &self,
        user_id: &Value,
        ordered_ids: &Value,
    ) -> FavoritesResult<Vec<DishId>> {
        let result: FavoritesResult<Vec<DishId>> = async {
            let user_id = self.resolve_user(user_id).await?;
            let candidates = ordered_ids
                .as_array()
                .ok_or(FavoritesError::InvalidOrder)?
                .clone();
            self.apply(user_id, move |current| {
                reorder_favorites(current, &candidates)
            })
            .await
        }
        .await;
        record_outcome(Some("menu_favorites_reordered_total"), &result);
        result
    }
}

/// Count one rejected favorites request under `reason`.
pub fn record_rejection(reason: &'static str) {
    tracing::debug!(reason, "favorites request rejected");
    metrics::counter!("menu_favorites_rejected_total", "reason" => reason).increment(1);
}

fn record_outcome<T>(success: Option<&'static str>, result: &FavoritesResult<T>) {
    match result {
        Ok(_) => {
            if let Some(counter) = success {
                metrics::counter!(counter).increment(1);
            }
        }
        // Logged where the error is turned into a response.
        Err(FavoritesError::Store(_)) => {}
        Err(err) => record_rejection(err.code()),
    }
}

fn resolve_user_id(raw: &Value) -> FavoritesResult<UserId> {
    if is_blank(raw) {
        return Err(FavoritesError::MissingUserId);
    }
    parse_id(raw).ok_or(FavoritesError::UserNotFound)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.is_finite())
                .map(|float| float.trunc() as i64)
        }),
        Value::String(text) => leading_integer(text),
        _ => None,
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let value = digits[..end].parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

fn add_favorite(current: &[DishId], dish_id: DishId) -> FavoritesResult<Vec<DishId>> {
    if current.contains(&dish_id) {
        return Err(FavoritesError::DuplicateFavorite);
    }
    let mut next = current.to_vec();
    next.push(dish_id);
    Ok(next)
}

fn remove_favorite(current: &[DishId], dish_id: DishId) -> FavoritesResult<Vec<DishId>> {
    if !current.contains(&dish_id) {
        return Err(FavoritesError::FavoriteNotPresent);
    }
    Ok(current.iter().copied().filter(|id| *id != dish_id).collect())
}

// Only integers match; a repeated id is rejected so the stored sequence stays distinct.
fn reorder_favorites(current: &[DishId], candidates: &[Value]) -> FavoritesResult<Vec<DishId>> {
    let mut seen = HashSet::new();
    let mut next = Vec::with_capacity(candidates.len());
    let mut invalid = Vec::new();
    for candidate in candidates {
        match candidate.as_i64() {
            Some(id) if current.contains(&id) && seen.insert(id) => next.push(id),
            _ => invalid.push(display_id(candidate)),
        }
    }
    if !invalid.is_empty() {
        return Err(FavoritesError::InvalidIds(invalid));
    }
    Ok(next)
}

fn display_id(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::Seed;
    use crate::store::memory::InMemoryStore;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::json;

    fn service() -> (FavoritesService, Arc<InMemoryStore>) {
        let store = Arc::new(InMemoryStore::new(Seed::builtin()));
        (FavoritesService::new(store.clone(), store.clone()), store)
    }

    async fn stored(store: &InMemoryStore, user_id: UserId) -> Vec<DishId> {
        store.get_user(user_id).await.expect("user").favorites
    }

    fn dish_ids(listing: FavoritesListing) -> Vec<DishId> {
        match listing {
            FavoritesListing::Dishes(dishes) => dishes.iter().map(|dish| dish.id).collect(),
            FavoritesListing::Empty => Vec::new(),
        }
    }

    #[tokio::test]
    async fn add_then_list_includes_dish_once() {
        let (service, _) = service();
        for dish_id in [4, 1, 8] {
            service.add(&json!(2), &json!(dish_id)).await.expect("add");
        }
        let listed = dish_ids(service.list(&json!(2)).await.expect("list"));
        assert_eq!(listed, vec![2, 4, 1, 8]);
        assert_eq!(listed.iter().filter(|id| **id == 4).count(), 1);
    }

    #[tokio::test]
    async fn duplicate_add_fails_without_changes() {
        let (service, store) = service();
        let err = service.add(&json!(3), &json!(2)).await.expect_err("duplicate");
        assert!(matches!(err, FavoritesError::DuplicateFavorite));
        assert_eq!(stored(&store, 3).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn remove_absent_fails_without_changes() {
        let (service, store) = service();
        let err = service.remove(&json!(4), &json!(1)).await.expect_err("absent");
        assert!(matches!(err, FavoritesError::FavoriteNotPresent));
        assert_eq!(stored(&store, 4).await, vec![5, 6]);
    }

    #[tokio::test]
    async fn add_then_remove_restores_sequence() {
        let (service, store) = service();
        let before = stored(&store, 7).await;
        service.add(&json!(7), &json!(3)).await.expect("add");
        let after = service.remove(&json!(7), &json!(3)).await.expect("remove");
        assert_eq!(after, before);
        assert_eq!(stored(&store, 7).await, before);
    }

    #[tokio::test]
    async fn remove_keeps_order_of_remaining_favorites() {
        let (service, _) = service();
        service.add(&json!(4), &json!(1)).await.expect("add");
        let favorites = service.remove(&json!(4), &json!(6)).await.expect("remove");
        assert_eq!(favorites, vec![5, 1]);
    }

    #[tokio::test]
    async fn user_one_add_remove_scenario() {
        let (service, _) = service();
        assert_eq!(service.add(&json!(1), &json!(2)).await.expect("add"), vec![2]);
        assert!(matches!(
            service.add(&json!(1), &json!(2)).await,
            Err(FavoritesError::DuplicateFavorite)
        ));
        assert!(service.remove(&json!(1), &json!(2)).await.expect("remove").is_empty());
        assert!(matches!(
            service.remove(&json!(1), &json!(2)).await,
            Err(FavoritesError::FavoriteNotPresent)
        ));
    }

    #[tokio::test]
    async fn unknown_user_is_checked_before_dish() {
        let (service, _) = service();
        assert!(matches!(
            service.add(&json!(99), &json!(99)).await,
            Err(FavoritesError::UserNotFound)
        ));
        assert!(matches!(
            service.remove(&json!(99), &json!(2)).await,
            Err(FavoritesError::UserNotFound)
        ));
        assert!(matches!(
            service.list(&json!(99)).await,
            Err(FavoritesError::UserNotFound)
        ));
        assert!(matches!(
            service.reorder(&json!(99), &json!("nope")).await,
            Err(FavoritesError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn unknown_dish_is_rejected() {
        let (service, store) = service();
        assert!(matches!(
            service.add(&json!(1), &json!(42)).await,
            Err(FavoritesError::DishNotFound)
        ));
        assert!(matches!(
            service.remove(&json!(3), &json!(42)).await,
            Err(FavoritesError::DishNotFound)
        ));
        assert!(stored(&store, 1).await.is_empty());
    }

    #[tokio::test]
    async fn empty_list_is_distinguished() {
        let (service, _) = service();
        assert_eq!(service.list(&json!(5)).await.expect("list"), FavoritesListing::Empty);
    }

    #[tokio::test]
    async fn reorder_permutation_sets_list_order() {
        let (service, _) = service();
        let favorites = service.reorder(&json!(3), &json!([3, 2])).await.expect("reorder");
        assert_eq!(favorites, vec![3, 2]);
        let listing = service.list(&json!(3)).await.expect("list");
        let FavoritesListing::Dishes(dishes) = listing else {
            panic!("expected dishes");
        };
        assert_eq!(dishes[0].name, "Salada Caesar");
        assert_eq!(dishes[1].name, "Lasanha de Carne");
    }

    #[tokio::test]
    async fn reorder_with_foreign_ids_fails_without_changes() {
        let (service, store) = service();
        let err = service
            .reorder(&json!(3), &json!([3, 5, 2, 8]))
            .await
            .expect_err("invalid ids");
        match &err {
            FavoritesError::InvalidIds(ids) => assert_eq!(ids, &["5", "8"]),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "IDs inválidos: 5, 8");
        assert_eq!(stored(&store, 3).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn reorder_requires_an_array() {
        let (service, store) = service();
        for body in [json!(null), json!({"ids": [2, 3]}), json!("3,2"), json!(3)] {
            let err = service.reorder(&json!(3), &body).await.expect_err("shape");
            assert!(matches!(err, FavoritesError::InvalidOrder));
        }
        assert_eq!(stored(&store, 3).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn reorder_compares_ids_strictly() {
        let (service, _) = service();
        let err = service
            .reorder(&json!(3), &json!(["3", 2]))
            .await
            .expect_err("string id");
        assert_eq!(err.to_string(), "IDs inválidos: 3");
    }

    #[tokio::test]
    async fn reorder_rejects_repeated_ids() {
        let (service, store) = service();
        let err = service
            .reorder(&json!(3), &json!([2, 3, 2]))
            .await
            .expect_err("repeated");
        assert_eq!(err.to_string(), "IDs inválidos: 2");
        assert_eq!(stored(&store, 3).await, vec![2, 3]);
    }

    // Reorder replaces rather than permutes: omitted favorites are dropped.
    #[tokio::test]
    async fn reorder_with_subset_drops_omitted_favorites() {
        let (service, store) = service();
        let favorites = service.reorder(&json!(4), &json!([6])).await.expect("reorder");
        assert_eq!(favorites, vec![6]);
        assert_eq!(stored(&store, 4).await, vec![6]);

        let favorites = service.reorder(&json!(4), &json!([])).await.expect("reorder");
        assert!(favorites.is_empty());
        assert_eq!(service.list(&json!(4)).await.expect("list"), FavoritesListing::Empty);
    }

    #[tokio::test]
    async fn list_skips_dishes_missing_from_catalog() {
        let users = Arc::new(InMemoryStore::new(Seed::builtin()));
        let mut trimmed = Seed::builtin();
        trimmed.dishes.retain(|dish| dish.id != 7);
        let catalog = Arc::new(InMemoryStore::new(trimmed));
        let service = FavoritesService::new(catalog, users.clone());

        let listed = dish_ids(service.list(&json!(7)).await.expect("list"));
        assert_eq!(listed, vec![8]);
        assert_eq!(stored(&users, 7).await, vec![7, 8]);
    }

    #[tokio::test]
    async fn list_with_only_stale_ids_returns_no_dishes() {
        let users = Arc::new(InMemoryStore::new(Seed::builtin()));
        let catalog = Arc::new(InMemoryStore::new(Seed {
            dishes: Vec::new(),
            users: Vec::new(),
        }));
        let service = FavoritesService::new(catalog, users);
        assert_eq!(
            service.list(&json!(2)).await.expect("list"),
            FavoritesListing::Dishes(Vec::new())
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(FavoritesError::MissingUserId.code(), "missing_user_id");
        assert_eq!(FavoritesError::InvalidOrder.code(), "invalid_order");
        assert_eq!(
            FavoritesError::InvalidIds(vec!["1".into()]).code(),
            "invalid_ids"
        );
        assert_eq!(
            FavoritesError::Store(StoreError::Unexpected(anyhow::anyhow!("boom"))).code(),
            "internal"
        );
    }

    #[tokio::test]
    async fn reorder_rejects_float_ids() {
        let (service, store) = service();
        let err = service
            .reorder(&json!(3), &json!([3.0, 2]))
            .await
            .expect_err("float id");
        assert_eq!(err.to_string(), "IDs inválidos: 3.0");
        assert_eq!(stored(&store, 3).await, vec![2, 3]);
    }

    #[tokio::test]
    async fn ids_are_resolved_before_the_store_is_touched() {
        let (service, store) = service();
        for blank in [json!(null), json!(0), json!(""), json!(false)] {
            assert!(matches!(
                service.add(&blank, &json!(2)).await,
                Err(FavoritesError::MissingUserId)
            ));
        }
        assert!(matches!(
            service.list(&json!("abc")).await,
            Err(FavoritesError::UserNotFound)
        ));
        assert!(matches!(
            service.remove(&json!(99), &Value::Null).await,
            Err(FavoritesError::UserNotFound)
        ));
        assert!(matches!(
            service.add(&json!(1), &Value::Null).await,
            Err(FavoritesError::DishNotFound)
        ));
        assert_eq!(
            service.add(&json!("1"), &json!("4 pratos")).await.expect("add"),
            vec![4]
        );
        assert_eq!(stored(&store, 1).await, vec![4]);
    }

    #[test]
    fn user_id_presence_rules() {
        for blank in [json!(null), json!(0), json!(""), json!(false)] {
            assert!(matches!(
                resolve_user_id(&blank),
                Err(FavoritesError::MissingUserId)
            ));
        }
        assert!(matches!(
            resolve_user_id(&json!("abc")),
            Err(FavoritesError::UserNotFound)
        ));
        assert_eq!(resolve_user_id(&json!(3)).expect("id"), 3);
        assert_eq!(resolve_user_id(&json!("7")).expect("id"), 7);
    }

    #[test]
    fn ids_parse_like_leading_integers() {
        assert_eq!(parse_id(&json!(4)), Some(4));
        assert_eq!(parse_id(&json!(4.9)), Some(4));
        assert_eq!(parse_id(&json!(" 12abc")), Some(12));
        assert_eq!(parse_id(&json!("-3")), Some(-3));
        assert_eq!(parse_id(&json!("+8")), Some(8));
        assert_eq!(parse_id(&json!("x1")), None);
        assert_eq!(parse_id(&json!("")), None);
        assert_eq!(parse_id(&json!([1])), None);
        assert_eq!(parse_id(&json!(true)), None);
    }

    #[test]
    fn operations_publish_outcome_metrics() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime");
        metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let (service, _) = service();
                service.add(&json!(1), &json!(2)).await.expect("add");
                service.add(&json!(1), &json!(2)).await.expect_err("duplicate");
                service.remove(&json!(1), &json!(2)).await.expect("remove");
                service.remove(&json!(1), &json!(2)).await.expect_err("absent");
                service
                    .reorder(&json!(3), &json!([3, 2]))
                    .await
                    .expect("reorder");
                service
                    .reorder(&json!(3), &json!([9]))
                    .await
                    .expect_err("invalid ids");
                service.reorder(&json!(3), &json!("2")).await.expect_err("shape");
                service.add(&Value::Null, &json!(2)).await.expect_err("missing user");
                service.remove(&json!(1), &json!("pizza")).await.expect_err("dish");
                service.list(&json!(99)).await.expect_err("unknown user");
                service.list(&json!(3)).await.expect("list");
            })
        });

        let rendered = handle.render();
        for line in [
            "menu_favorites_added_total 1",
            "menu_favorites_removed_total 1",
            "menu_favorites_reordered_total 1",
            r#"menu_favorites_rejected_total{reason="duplicate_favorite"} 1"#,
            r#"menu_favorites_rejected_total{reason="favorite_not_present"} 1"#,
            r#"menu_favorites_rejected_total{reason="invalid_ids"} 1"#,
            r#"menu_favorites_rejected_total{reason="invalid_order"} 1"#,
            r#"menu_favorites_rejected_total{reason="missing_user_id"} 1"#,
            r#"menu_favorites_rejected_total{reason="dish_not_found"} 1"#,
            r#"menu_favorites_rejected_total{reason="user_not_found"} 1"#,
            "menu_dishes_total 8",
            "menu_users_total 10",
        ] {
            assert!(rendered.contains(line), "missing {line:?} in:\n{rendered}");
        }
    }
}
