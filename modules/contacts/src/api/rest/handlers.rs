use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query,
    },
    Extension, Json,
};
use tracing::info;

use crate::api::rest::dto::{PageDto, SelectByPageQuery, UserDto};
use crate::api::rest::envelope::Envelope;
use crate::api::rest::error::ApiResult;
use crate::api::rest::openapi::{
    EmptyEnvelopeSchema, ErrorEnvelopeSchema, PageEnvelopeSchema, UserEnvelopeSchema,
    UserListEnvelopeSchema,
};
use crate::contract::model::User;
use crate::domain::service::Service;

/// Add a user
#[utoipa::path(
    post,
    path = "/user/add",
    tag = "user",
    operation_id = "addUser",
    request_body = UserDto,
    responses(
        (status = 200, description = "User stored", body = EmptyEnvelopeSchema),
        (status = 400, description = "Malformed body", body = ErrorEnvelopeSchema),
        (status = 409, description = "Id already taken", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn add_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<UserDto>, JsonRejection>,
) -> ApiResult<()> {
    let Json(req) = payload?;
    info!("Adding user: {:?}", req);

    svc.add_user(req.into()).await?;
    Ok(Envelope::ok())
}

/// Replace every field of an existing user
#[utoipa::path(
    put,
    path = "/user/update",
    tag = "user",
    operation_id = "updateUser",
    request_body = UserDto,
    responses(
        (status = 200, description = "User updated", body = EmptyEnvelopeSchema),
        (status = 400, description = "Malformed body or missing id", body = ErrorEnvelopeSchema),
        (status = 404, description = "No user with this id", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn update_user(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<UserDto>, JsonRejection>,
) -> ApiResult<()> {
    let Json(req) = payload?;
    info!("Updating user: {:?}", req);

    let user = User::try_from(req)?;
    svc.update_user(user).await?;
    Ok(Envelope::ok())
}

/// Delete a user by id
#[utoipa::path(
    delete,
    path = "/user/delete/{id}",
    tag = "user",
    operation_id = "deleteUser",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = EmptyEnvelopeSchema),
        (status = 400, description = "Id is not an integer", body = ErrorEnvelopeSchema),
        (status = 404, description = "No user with this id", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn delete_user(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    info!("Deleting user with id: {}", id);

    svc.delete_user(id).await?;
    Ok(Envelope::ok())
}

/// Delete several users; ids that do not exist are skipped
#[utoipa::path(
    delete,
    path = "/user/delete/batch",
    tag = "user",
    operation_id = "batchDeleteUsers",
    request_body = Vec<i32>,
    responses(
        (status = 200, description = "Matching users deleted", body = EmptyEnvelopeSchema),
        (status = 400, description = "Body is not a list of integers", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn batch_delete_users(
    Extension(svc): Extension<Arc<Service>>,
    payload: Result<Json<Vec<i32>>, JsonRejection>,
) -> ApiResult<()> {
    let Json(ids) = payload?;
    info!("Batch deleting {} users", ids.len());

    svc.batch_delete_users(ids).await?;
    Ok(Envelope::ok())
}

/// List every user in ascending id order
#[utoipa::path(
    get,
    path = "/user/selectAll",
    tag = "user",
    operation_id = "selectAllUsers",
    responses(
        (status = 200, description = "All users", body = UserListEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn select_all(Extension(svc): Extension<Arc<Service>>) -> ApiResult<Vec<UserDto>> {
    let users = svc.list_users().await?;
    Ok(Envelope::success(
        users.into_iter().map(UserDto::from).collect(),
    ))
}

/// Get a user by id; `data` is null when absent
#[utoipa::path(
    get,
    path = "/user/selectById/{id}",
    tag = "user",
    operation_id = "selectUserById",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "User or null", body = UserEnvelopeSchema),
        (status = 400, description = "Id is not an integer", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn select_by_id(
    Extension(svc): Extension<Arc<Service>>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<UserDto> {
    let Path(id) = id?;
    info!("Getting user with id: {}", id);

    let user = svc.find_user(id).await?;
    Ok(Envelope::success_opt(user.map(UserDto::from)))
}

/// Users whose name contains the given text
#[utoipa::path(
    get,
    path = "/user/selectByName/{name}",
    tag = "user",
    operation_id = "selectUsersByName",
    params(("name" = String, Path, description = "Name fragment")),
    responses(
        (status = 200, description = "Matching users", body = UserListEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn select_by_name(
    Extension(svc): Extension<Arc<Service>>,
    name: Result<Path<String>, PathRejection>,
) -> ApiResult<Vec<UserDto>> {
    let Path(name) = name?;
    info!("Searching users by name: {}", name);

    let users = svc.find_users_by_name(&name).await?;
    Ok(Envelope::success(
        users.into_iter().map(UserDto::from).collect(),
    ))
}

/// Paginated search with optional username/name filters
#[utoipa::path(
    get,
    path = "/user/selectByPage",
    tag = "user",
    operation_id = "selectUsersByPage",
    params(SelectByPageQuery),
    responses(
        (status = 200, description = "One page of users", body = PageEnvelopeSchema),
        (status = 400, description = "Invalid page bounds", body = ErrorEnvelopeSchema),
        (status = 500, description = "Internal error", body = ErrorEnvelopeSchema)
    )
)]
pub async fn select_by_page(
    Extension(svc): Extension<Arc<Service>>,
    query: Result<Query<SelectByPageQuery>, QueryRejection>,
) -> ApiResult<PageDto> {
    let Query(query) = query?;
    info!("Listing users page with query: {:?}", query);

    let page = svc
        .list_users_page(
            query.page_num,
            query.page_size,
            query.username.unwrap_or_default(),
            query.name.unwrap_or_default(),
        )
        .await?;
    Ok(Envelope::success(PageDto::from(page)))
}
