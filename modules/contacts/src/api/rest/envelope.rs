use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const SUCCESS_CODE: &str = "200";
pub const SUCCESS_MSG: &str = "success";

/// Uniform response wrapper: `{"code": "200", "msg": "success", "data": ...}`.
///
/// `data` is always present on the wire and is `null` when there is no payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    pub msg: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self::success_opt(Some(data))
    }

    /// Success whose payload may legitimately be absent.
    pub fn success_opt(data: Option<T>) -> Self {
        Self {
            code: SUCCESS_CODE.to_owned(),
            msg: SUCCESS_MSG.to_owned(),
            data,
        }
    }
}

impl Envelope<()> {
    /// Success without a payload.
    pub fn ok() -> Self {
        Self::success_opt(None)
    }

    pub fn error(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code: status.as_u16().to_string(),
            msg: msg.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
