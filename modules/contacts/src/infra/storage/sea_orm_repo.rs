//! SeaORM-backed repository implementation for the domain port.
//!
//! Generic over `C: ConnectionTrait`, so it works with a `DatabaseConnection`
//! or with a transaction handle.

use anyhow::Context;
use sea_orm::{
    sea_query::{Condition, SimpleExpr},
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DbBackend, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::contract::model::{NewUser, Page, PageQuery, User};
use crate::domain::repo::{DuplicateKey, UsersRepository};
use crate::infra::storage::entity::{ActiveModel as UserAM, Column, Entity as UserEntity};

/// SeaORM repository impl.
/// Holds a connection object; its lifetime/ownership is up to the caller.
pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Statement that moves the key sequence past explicitly inserted ids.
/// SQLite derives the next rowid from the table itself and needs none.
fn sync_id_sequence_sql(backend: DbBackend) -> Option<&'static str> {
    match backend {
        DbBackend::Postgres => Some(
            "SELECT setval(pg_get_serial_sequence('users', 'id'), (SELECT MAX(id) FROM users))",
        ),
        _ => None,
    }
}

fn insert_error(e: DbErr, id: Option<i32>) -> anyhow::Error {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DuplicateKey { id }.into(),
        _ => anyhow::Error::new(e).context("insert failed"),
    }
}

/// Substring filter; an empty needle matches everything.
fn contains(column: Column, needle: &str) -> Option<SimpleExpr> {
    (!needle.is_empty()).then(|| column.contains(needle))
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn insert(&self, u: NewUser) -> anyhow::Result<User> {
        let explicit_id = u.id;
        let m = UserAM {
            id: u.id.map_or(NotSet, Set),
            username: Set(u.username),
            name: Set(u.name),
            phone: Set(u.phone),
            email: Set(u.email),
            address: Set(u.address),
        };
        let stored = m
            .insert(&self.conn)
            .await
            .map_err(|e| insert_error(e, explicit_id))?;

        if explicit_id.is_some() {
            if let Some(sql) = sync_id_sequence_sql(self.conn.get_database_backend()) {
                self.conn
                    .execute_unprepared(sql)
                    .await
                    .context("id sequence sync failed")?;
            }
        }
        Ok(stored.into())
    }

    async fn update(&self, u: User) -> anyhow::Result<bool> {
        // update_many reports a zero row count instead of failing on a missing key
        let m = UserAM {
            username: Set(u.username),
            name: Set(u.name),
            phone: Set(u.phone),
            email: Set(u.email),
            address: Set(u.address),
            ..Default::default()
        };
        let res = UserEntity::update_many()
            .set(m)
            .filter(Column::Id.eq(u.id))
            .exec(&self.conn)
            .await
            .context("update failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let res = UserEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn batch_delete(&self, ids: &[i32]) -> anyhow::Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let res = UserEntity::delete_many()
            .filter(Column::Id.is_in(ids.iter().copied()))
            .exec(&self.conn)
            .await
            .context("batch_delete failed")?;
        Ok(res.rows_affected)
    }

    async fn select_all(&self) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("select_all failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("select_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn select_by_name(&self, name: &str) -> anyhow::Result<Vec<User>> {
        let rows = UserEntity::find()
            .filter(Condition::all().add_option(contains(Column::Name, name)))
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await
            .context("select_by_name failed")?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn select_by_page(&self, query: &PageQuery) -> anyhow::Result<Page<User>> {
        let filter = Condition::all()
            .add_option(contains(Column::Username, &query.username))
            .add_option(contains(Column::Name, &query.name));

        let paginator = UserEntity::find()
            .filter(filter)
            .order_by_asc(Column::Id)
            .paginate(&self.conn, query.page_size);

        let total = paginator
            .num_items()
            .await
            .context("select_by_page count failed")?;
        let rows = paginator
            .fetch_page(query.page_num.saturating_sub(1))
            .await
            .context("select_by_page fetch failed")?;

        Ok(Page {
            items: rows.into_iter().map(Into::into).collect(),
            page_num: query.page_num,
            page_size: query.page_size,
            total,
        })
    }
}
