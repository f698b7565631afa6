use async_trait::async_trait;
use std::sync::Arc;

use crate::contract::{
    client::UsersApi,
    error::ContactsError,
    model::{NewUser, Page, PageQuery, User},
};
use crate::domain::service::Service;

/// Local implementation of the UsersApi trait that delegates to the domain service
pub struct ContactsLocalClient {
    service: Arc<Service>,
}

impl ContactsLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UsersApi for ContactsLocalClient {
    async fn add_user(&self, new_user: NewUser) -> Result<User, ContactsError> {
        Ok(self.service.add_user(new_user).await?)
    }

    async fn update_user(&self, user: User) -> Result<User, ContactsError> {
        Ok(self.service.update_user(user).await?)
    }

    async fn delete_user(&self, id: i32) -> Result<(), ContactsError> {
        Ok(self.service.delete_user(id).await?)
    }

    async fn batch_delete_users(&self, ids: Vec<i32>) -> Result<u64, ContactsError> {
        Ok(self.service.batch_delete_users(ids).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, ContactsError> {
        Ok(self.service.list_users().await?)
    }

    async fn get_user(&self, id: i32) -> Result<Option<User>, ContactsError> {
        Ok(self.service.find_user(id).await?)
    }

    async fn find_users_by_name(&self, name: &str) -> Result<Vec<User>, ContactsError> {
        Ok(self.service.find_users_by_name(name).await?)
    }

    async fn list_users_page(&self, query: PageQuery) -> Result<Page<User>, ContactsError> {
        Ok(self
            .service
            .list_users_page(
                Some(query.page_num),
                Some(query.page_size),
                query.username,
                query.name,
            )
            .await?)
    }
}
