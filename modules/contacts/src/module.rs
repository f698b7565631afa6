//! Explicit wiring of the contacts module: repository, service, routes, docs.

use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;
use utoipa::OpenApi;

use crate::api::rest::{openapi::ContactsApiDoc, routes};
use crate::config::ContactsConfig;
use crate::contract::client::UsersApi;
use crate::domain::repo::UsersRepository;
use crate::domain::service::{Service, ServiceConfig};
use crate::gateways::local::ContactsLocalClient;
use crate::infra::storage::{migrations::Migrator, SeaOrmUsersRepository};

/// The assembled contacts module.
#[derive(Clone)]
pub struct Contacts {
    service: Arc<Service>,
}

impl Contacts {
    /// Wire the module over an arbitrary repository.
    pub fn new(repo: Arc<dyn UsersRepository>, config: ContactsConfig) -> Self {
        let service_config = ServiceConfig {
            default_page_size: config.default_page_size,
            max_page_size: config.max_page_size,
        };
        Self {
            service: Arc::new(Service::new(repo, service_config)),
        }
    }

    /// Wire the module over SeaORM.
    pub fn with_database(db: DatabaseConnection, config: ContactsConfig) -> Self {
        Self::new(Arc::new(SeaOrmUsersRepository::new(db)), config)
    }

    /// Create or upgrade the `users` table.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        info!("Running contacts database migrations");
        Migrator::up(db, None).await?;
        info!("Contacts database migrations completed");
        Ok(())
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other components.
    pub fn client(&self) -> Arc<dyn UsersApi> {
        Arc::new(ContactsLocalClient::new(self.service.clone()))
    }

    pub fn router(&self) -> Router {
        routes::router(self.service.clone())
    }

    pub fn openapi() -> utoipa::openapi::OpenApi {
        ContactsApiDoc::openapi()
    }
}
