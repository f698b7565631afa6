/// Pure user model for inter-module communication (no serde)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Display name.
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Data for creating a user. Without an `id` the store assigns one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewUser {
    pub id: Option<i32>,
    pub username: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl NewUser {
    /// The stored record once the key is known.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

/// Paginated search request. Empty filters match every record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number.
    pub page_num: u64,
    pub page_size: u64,
    pub username: String,
    pub name: String,
}

/// One page of results plus the total number of matching records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page_num: u64,
    pub page_size: u64,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn empty(page_num: u64, page_size: u64) -> Self {
        Self {
            items: Vec::new(),
            page_num,
            page_size,
            total: 0,
        }
    }

    /// Map items while preserving the pagination metadata.
    pub fn map_items<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_num: self.page_num,
            page_size: self.page_size,
            total: self.total,
        }
    }
}
