//! Tests to verify that handlers and the service emit the expected traces

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Extension, Router,
};
use std::sync::Arc;
use tower::ServiceExt;
use tracing_test::traced_test;

use anyhow::Result;
use contacts::api::rest::handlers;
use contacts::contract::model::{NewUser, Page, PageQuery, User};
use contacts::domain::repo::UsersRepository;
use contacts::domain::service::{Service, ServiceConfig};

// Mock repository for testing
#[derive(Clone)]
struct MockUsersRepository {
    users: Vec<User>,
    fail: bool,
}

impl MockUsersRepository {
    fn new() -> Self {
        Self {
            users: vec![User {
                id: 1,
                username: "test".to_string(),
                name: "Test User".to_string(),
                phone: None,
                email: Some("test@example.com".to_string()),
                address: None,
            }],
            fail: false,
        }
    }

    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            anyhow::bail!("connection reset by peer");
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl UsersRepository for MockUsersRepository {
    async fn insert(&self, u: NewUser) -> Result<User> {
        self.check()?;
        Ok(u.into_user(2))
    }

    async fn update(&self, u: User) -> Result<bool> {
        self.check()?;
        Ok(self.users.iter().any(|x| x.id == u.id))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        self.check()?;
        Ok(self.users.iter().any(|x| x.id == id))
    }

    async fn batch_delete(&self, ids: &[i32]) -> Result<u64> {
        self.check()?;
        Ok(self.users.iter().filter(|x| ids.contains(&x.id)).count() as u64)
    }

    async fn select_all(&self) -> Result<Vec<User>> {
        self.check()?;
        Ok(self.users.clone())
    }

    async fn select_by_id(&self, id: i32) -> Result<Option<User>> {
        self.check()?;
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }

    async fn select_by_name(&self, name: &str) -> Result<Vec<User>> {
        self.check()?;
        Ok(self
            .users
            .iter()
            .filter(|u| u.name.contains(name))
            .cloned()
            .collect())
    }

    async fn select_by_page(&self, query: &PageQuery) -> Result<Page<User>> {
        self.check()?;
        Ok(Page {
            items: self.users.clone(),
            page_num: query.page_num,
            page_size: query.page_size,
            total: self.users.len() as u64,
        })
    }
}

fn create_test_router(repo: MockUsersRepository) -> Router {
    let service = Arc::new(Service::new(Arc::new(repo), ServiceConfig::default()));

    Router::new()
        .route("/user/add", axum::routing::post(handlers::add_user))
        .route("/user/selectAll", axum::routing::get(handlers::select_all))
        .route(
            "/user/selectById/{id}",
            axum::routing::get(handlers::select_by_id),
        )
        .route(
            "/user/selectByPage",
            axum::routing::get(handlers::select_by_page),
        )
        .route(
            "/user/delete/{id}",
            axum::routing::delete(handlers::delete_user),
        )
        .layer(Extension(service))
}

#[traced_test]
#[tokio::test]
async fn add_user_handler_emits_service_logs() {
    let app = create_test_router(MockUsersRepository::new());

    let request = Request::builder()
        .method("POST")
        .uri("/user/add")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"username":"new","name":"New User"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(logs_contain("Adding new user"));
    assert!(logs_contain("Successfully added user with id=2"));
}

#[traced_test]
#[tokio::test]
async fn select_by_id_handler_emits_span() {
    let app = create_test_router(MockUsersRepository::new());

    let request = Request::builder()
        .method("GET")
        .uri("/user/selectById/1")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(logs_contain("contacts.service.find_user"));
}

#[traced_test]
#[tokio::test]
async fn select_by_page_handler_logs_query() {
    let app = create_test_router(MockUsersRepository::new());

    let request = Request::builder()
        .method("GET")
        .uri("/user/selectByPage?pageNum=1&pageSize=5&name=Test")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(logs_contain("Listing users page with query"));
}

#[traced_test]
#[tokio::test]
async fn delete_of_missing_user_is_404() {
    let app = create_test_router(MockUsersRepository::new());

    let request = Request::builder()
        .method("DELETE")
        .uri("/user/delete/404")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(logs_contain("Deleting user"));
}

#[traced_test]
#[tokio::test]
async fn database_failure_is_logged_and_hidden() {
    let app = create_test_router(MockUsersRepository::failing());

    let request = Request::builder()
        .method("GET")
        .uri("/user/selectAll")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "500");
    assert_eq!(json["msg"], "Internal error");
    assert!(!json["msg"].as_str().unwrap().contains("connection reset"));

    assert!(logs_contain("Database error occurred"));
    assert!(logs_contain("connection reset by peer"));
}
