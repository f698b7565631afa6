use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Extension, Router,
};

use crate::api::rest::handlers;
use crate::domain::service::Service;

/// The `/user` route table. The literal `/user/delete/batch` takes
/// precedence over `/user/delete/{id}`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route("/user/add", post(handlers::add_user))
        .route("/user/update", put(handlers::update_user))
        .route("/user/delete/batch", delete(handlers::batch_delete_users))
        .route("/user/delete/{id}", delete(handlers::delete_user))
        .route("/user/selectAll", get(handlers::select_all))
        .route("/user/selectById/{id}", get(handlers::select_by_id))
        .route("/user/selectByName/{name}", get(handlers::select_by_name))
        .route("/user/selectByPage", get(handlers::select_by_page))
        .layer(Extension(service))
}
