use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{NewUser, Page, User};
use crate::domain::error::DomainError;

/// REST DTO for a user contact, both as request body and response payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Omit on add to let the store assign one. Required on update.
    #[schema(example = 1)]
    pub id: Option<i32>,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "Alice Liddell")]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

/// One page of users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub page_num: u64,
    pub page_size: u64,
    /// Number of users matching the filters across all pages.
    pub total: u64,
    pub list: Vec<UserDto>,
}

/// Query parameters of `GET /user/selectByPage`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SelectByPageQuery {
    /// 1-based page number, defaults to 1.
    pub page_num: Option<u64>,
    /// Page size, defaults to the configured default.
    pub page_size: Option<u64>,
    /// Substring filter on `username`; empty matches all.
    pub username: Option<String>,
    /// Substring filter on `name`; empty matches all.
    pub name: Option<String>,
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: Some(user.id),
            username: user.username,
            name: user.name,
            phone: user.phone,
            email: user.email,
            address: user.address,
        }
    }
}

impl From<UserDto> for NewUser {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            name: dto.name,
            phone: dto.phone,
            email: dto.email,
            address: dto.address,
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = DomainError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        let id = dto
            .id
            .ok_or_else(|| DomainError::validation("id", "is required"))?;
        Ok(NewUser::from(dto).into_user(id))
    }
}

impl From<Page<User>> for PageDto {
    fn from(page: Page<User>) -> Self {
        let page = page.map_items(UserDto::from);
        Self {
            page_num: page.page_num,
            page_size: page.page_size,
            total: page.total,
            list: page.items,
        }
    }
}
