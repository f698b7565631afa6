//! OpenAPI document for the `/user` endpoint group.
//!
//! Envelope payloads are described by dedicated schema structs so the
//! generic `Envelope<T>` stays free of utoipa derives.

use utoipa::{OpenApi, ToSchema};

use crate::api::rest::dto::{PageDto, UserDto};

/// Success envelope without a payload.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct EmptyEnvelopeSchema {
    #[schema(example = "200")]
    code: String,
    #[schema(example = "success")]
    msg: String,
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}

/// Error envelope: `code` mirrors the HTTP status, `data` is null.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct ErrorEnvelopeSchema {
    #[schema(example = "404")]
    code: String,
    #[schema(example = "User not found: 42")]
    msg: String,
    #[schema(value_type = Option<Object>)]
    data: Option<serde_json::Value>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UserEnvelopeSchema {
    #[schema(example = "200")]
    code: String,
    #[schema(example = "success")]
    msg: String,
    data: Option<UserDto>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UserListEnvelopeSchema {
    #[schema(example = "200")]
    code: String,
    #[schema(example = "success")]
    msg: String,
    data: Vec<UserDto>,
}

#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PageEnvelopeSchema {
    #[schema(example = "200")]
    code: String,
    #[schema(example = "success")]
    msg: String,
    data: PageDto,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "CRUD and paginated search over user contacts."
    ),
    paths(
        super::handlers::add_user,
        super::handlers::update_user,
        super::handlers::delete_user,
        super::handlers::batch_delete_users,
        super::handlers::select_all,
        super::handlers::select_by_id,
        super::handlers::select_by_name,
        super::handlers::select_by_page,
    ),
    components(schemas(
        UserDto,
        PageDto,
        EmptyEnvelopeSchema,
        ErrorEnvelopeSchema,
        UserEnvelopeSchema,
        UserListEnvelopeSchema,
        PageEnvelopeSchema
    )),
    tags((name = "user", description = "User contact management"))
)]
pub struct ContactsApiDoc;
