use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::contract::model::{NewUser, Page, PageQuery, User};
use crate::domain::error::DomainError;
use crate::domain::repo::{DuplicateKey, UsersRepository};

/// Domain service for user contacts.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub default_page_size: u64,
    pub max_page_size: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 1000,
        }
    }
}

impl Service {
    pub fn new(repo: Arc<dyn UsersRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    #[instrument(
        name = "contacts.service.add_user",
        skip(self, new_user),
        fields(username = %new_user.username, requested_id = ?new_user.id)
    )]
    pub async fn add_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Adding new user");

        // Fast path only; a concurrent insert is still caught by the store below.
        if let Some(id) = new_user.id {
            if self.repo.select_by_id(id).await?.is_some() {
                return Err(DomainError::user_already_exists(id));
            }
        }

        let user = match self.repo.insert(new_user).await {
            Ok(user) => user,
            Err(e) => {
                let taken = e.downcast_ref::<DuplicateKey>().and_then(|d| d.id);
                return Err(match taken {
                    Some(id) => DomainError::user_already_exists(id),
                    None => e.into(),
                });
            }
        };
        info!("Successfully added user with id={}", user.id);
        Ok(user)
    }

    #[instrument(name = "contacts.service.update_user", skip(self, user), fields(user_id = %user.id))]
    pub async fn update_user(&self, user: User) -> Result<User, DomainError> {
        info!("Updating user");

        if !self.repo.update(user.clone()).await? {
            return Err(DomainError::user_not_found(user.id));
        }

        info!("Successfully updated user");
        Ok(user)
    }

    #[instrument(name = "contacts.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting user");

        if !self.repo.delete(id).await? {
            return Err(DomainError::user_not_found(id));
        }

        info!("Successfully deleted user");
        Ok(())
    }

    #[instrument(name = "contacts.service.batch_delete_users", skip(self, ids), fields(requested = ids.len()))]
    pub async fn batch_delete_users(&self, ids: Vec<i32>) -> Result<u64, DomainError> {
        if ids.is_empty() {
            debug!("Nothing to delete");
            return Ok(0);
        }

        let removed = self.repo.batch_delete(&ids).await?;
        info!(removed, "Batch delete finished");
        Ok(removed)
    }

    #[instrument(name = "contacts.service.list_users", skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>, DomainError> {
        debug!("Listing all users");
        let users = self.repo.select_all().await?;
        debug!("Successfully listed {} users", users.len());
        Ok(users)
    }

    #[instrument(name = "contacts.service.find_user", skip(self), fields(user_id = %id))]
    pub async fn find_user(&self, id: i32) -> Result<Option<User>, DomainError> {
        debug!("Getting user by id");
        Ok(self.repo.select_by_id(id).await?)
    }

    #[instrument(name = "contacts.service.find_users_by_name", skip(self))]
    pub async fn find_users_by_name(&self, name: &str) -> Result<Vec<User>, DomainError> {
        debug!("Searching users by name");
        Ok(self.repo.select_by_name(name).await?)
    }

    /// Paginated search. Missing `page_num`/`page_size` fall back to 1 and
    /// the configured default page size.
    #[instrument(name = "contacts.service.list_users_page", skip(self))]
    pub async fn list_users_page(
        &self,
        page_num: Option<u64>,
        page_size: Option<u64>,
        username: String,
        name: String,
    ) -> Result<Page<User>, DomainError> {
        let query = PageQuery {
            page_num: page_num.unwrap_or(1),
            page_size: page_size.unwrap_or(self.config.default_page_size),
            username,
            name,
        };
        self.validate_page_query(&query)?;

        let page = self.repo.select_by_page(&query).await?;
        debug!(
            "Successfully listed {} of {} users in page {}",
            page.items.len(),
            page.total,
            page.page_num
        );
        Ok(page)
    }

    fn validate_page_query(&self, query: &PageQuery) -> Result<(), DomainError> {
        if query.page_num < 1 {
            return Err(DomainError::validation("pageNum", "must be at least 1"));
        }
        if query.page_size < 1 {
            return Err(DomainError::validation("pageSize", "must be at least 1"));
        }
        if query.page_size > self.config.max_page_size {
            return Err(DomainError::validation(
                "pageSize",
                format!("must not exceed {}", self.config.max_page_size),
            ));
        }
        // The store binds the row offset as a signed 64-bit value.
        let within_range = query
            .page_num
            .checked_mul(query.page_size)
            .is_some_and(|end| end <= i64::MAX as u64);
        if !within_range {
            return Err(DomainError::validation(
                "pageNum",
                "is beyond the last addressable page",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// In-memory repository good enough to exercise service rules.
    #[derive(Default)]
    struct MemRepo {
        rows: Mutex<Vec<User>>,
        // Simulates a lookup that lost the race against a concurrent insert
        stale_lookups: bool,
    }

    #[async_trait]
    impl UsersRepository for MemRepo {
        async fn insert(&self, u: NewUser) -> anyhow::Result<User> {
            let mut rows = self.rows.lock().unwrap();
            let id = u
                .id
                .unwrap_or_else(|| rows.iter().map(|r| r.id).max().unwrap_or(0) + 1);
            if rows.iter().any(|r| r.id == id) {
                return Err(DuplicateKey { id: Some(id) }.into());
            }
            let user = u.into_user(id);
            rows.push(user.clone());
            Ok(user)
        }
        async fn update(&self, u: User) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|r| r.id == u.id) {
                Some(row) => {
                    *row = u;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
        async fn delete(&self, id: i32) -> anyhow::Result<bool> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() != before)
        }
        async fn batch_delete(&self, ids: &[i32]) -> anyhow::Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !ids.contains(&r.id));
            Ok((before - rows.len()) as u64)
        }
        async fn select_all(&self) -> anyhow::Result<Vec<User>> {
            Ok(self.rows.lock().unwrap().clone())
        }
        async fn select_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
            if self.stale_lookups {
                return Ok(None);
            }
            Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
        }
        async fn select_by_name(&self, name: &str) -> anyhow::Result<Vec<User>> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|r| r.name.contains(name))
                .cloned()
                .collect())
        }
        async fn select_by_page(&self, q: &PageQuery) -> anyhow::Result<Page<User>> {
            let rows = self.rows.lock().unwrap();
            let matching: Vec<User> = rows
                .iter()
                .filter(|r| r.username.contains(&q.username) && r.name.contains(&q.name))
                .cloned()
                .collect();
            let start = ((q.page_num - 1) * q.page_size) as usize;
            Ok(Page {
                items: matching
                    .iter()
                    .skip(start)
                    .take(q.page_size as usize)
                    .cloned()
                    .collect(),
                page_num: q.page_num,
                page_size: q.page_size,
                total: matching.len() as u64,
            })
        }
    }

    fn service() -> Service {
        Service::new(Arc::new(MemRepo::default()), ServiceConfig::default())
    }

    fn new_user(id: Option<i32>, name: &str) -> NewUser {
        NewUser {
            id,
            username: name.to_lowercase(),
            name: name.to_owned(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn duplicate_explicit_id_is_a_conflict() {
        let svc = service();
        svc.add_user(new_user(Some(7), "Alice")).await.unwrap();

        let err = svc.add_user(new_user(Some(7), "Bob")).await.unwrap_err();
        assert!(matches!(err, DomainError::UserAlreadyExists { id: 7 }));
    }

    #[tokio::test]
    async fn duplicate_rejected_by_store_is_a_conflict() {
        let svc = Service::new(
            Arc::new(MemRepo {
                stale_lookups: true,
                ..Default::default()
            }),
            ServiceConfig::default(),
        );
        svc.add_user(new_user(Some(5), "Alice")).await.unwrap();

        let err = svc.add_user(new_user(Some(5), "Bob")).await.unwrap_err();
        assert!(matches!(err, DomainError::UserAlreadyExists { id: 5 }));
    }

    #[tokio::test]
    async fn page_offset_beyond_store_range_is_rejected() {
        let svc = service();
        for num in [u64::MAX, 10_000_000_000_000_000] {
            let err = svc
                .list_users_page(Some(num), Some(1000), String::new(), String::new())
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::Validation { ref field, .. } if field == "pageNum"),
                "pageNum={num}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_user_are_not_found() {
        let svc = service();
        let ghost = new_user(None, "Ghost").into_user(42);

        let err = svc.update_user(ghost).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { id: 42 }));

        let err = svc.delete_user(42).await.unwrap_err();
        assert!(matches!(err, DomainError::UserNotFound { id: 42 }));
    }

    #[tokio::test]
    async fn empty_batch_delete_is_a_no_op() {
        let svc = service();
        svc.add_user(new_user(None, "Alice")).await.unwrap();

        assert_eq!(svc.batch_delete_users(vec![]).await.unwrap(), 0);
        assert_eq!(svc.list_users().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn page_defaults_are_applied() {
        let svc = service();
        let page = svc
            .list_users_page(None, None, String::new(), String::new())
            .await
            .unwrap();
        assert_eq!(page.page_num, 1);
        assert_eq!(page.page_size, 10);
    }

    #[tokio::test]
    async fn page_bounds_are_validated() {
        let svc = service();
        for (num, size, field) in [
            (0, 10, "pageNum"),
            (1, 0, "pageSize"),
            (1, 1001, "pageSize"),
        ] {
            let err = svc
                .list_users_page(Some(num), Some(size), String::new(), String::new())
                .await
                .unwrap_err();
            match err {
                DomainError::Validation { field: f, .. } => assert_eq!(f, field),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
    }
}
