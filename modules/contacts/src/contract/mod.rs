pub mod client;
pub mod error;
pub mod model;

pub use client::UsersApi;
pub use error::ContactsError;
pub use model::{NewUser, Page, PageQuery, User};
