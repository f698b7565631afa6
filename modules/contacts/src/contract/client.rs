use async_trait::async_trait;

use crate::contract::{
    error::ContactsError,
    model::{NewUser, Page, PageQuery, User},
};

/// Public API trait for the contacts module that other modules can use
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Create a user; returns the stored record with its key.
    async fn add_user(&self, new_user: NewUser) -> Result<User, ContactsError>;

    /// Replace every field of an existing user.
    async fn update_user(&self, user: User) -> Result<User, ContactsError>;

    async fn delete_user(&self, id: i32) -> Result<(), ContactsError>;

    /// Delete every listed user that exists; returns how many were removed.
    async fn batch_delete_users(&self, ids: Vec<i32>) -> Result<u64, ContactsError>;

    async fn list_users(&self) -> Result<Vec<User>, ContactsError>;

    /// `Ok(None)` when no user has this key.
    async fn get_user(&self, id: i32) -> Result<Option<User>, ContactsError>;

    /// Users whose display name contains `name`.
    async fn find_users_by_name(&self, name: &str) -> Result<Vec<User>, ContactsError>;

    async fn list_users_page(&self, query: PageQuery) -> Result<Page<User>, ContactsError>;
}
