use async_trait::async_trait;
use thiserror::Error;

use crate::contract::model::{NewUser, Page, PageQuery, User};

/// Returned by [`UsersRepository::insert`] when the key is already taken.
#[derive(Debug, Error)]
#[error("duplicate key {id:?}")]
pub struct DuplicateKey {
    pub id: Option<i32>,
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a user; returns the stored record with its key.
    /// A key collision is reported as a [`DuplicateKey`] error.
    async fn insert(&self, u: NewUser) -> anyhow::Result<User>;
    /// Replace every column of the row keyed by `u.id`. Returns true if a row matched.
    async fn update(&self, u: User) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
    /// Delete all listed ids; missing ones are skipped. Returns rows removed.
    async fn batch_delete(&self, ids: &[i32]) -> anyhow::Result<u64>;
    async fn select_all(&self) -> anyhow::Result<Vec<User>>;
    async fn select_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;
    /// Users whose `name` contains the given fragment, ascending by id.
    async fn select_by_name(&self, name: &str) -> anyhow::Result<Vec<User>>;
    /// One page of users matching both substring filters.
    ///
    /// `query` is expected to carry validated bounds.
    async fn select_by_page(&self, query: &PageQuery) -> anyhow::Result<Page<User>>;
}
