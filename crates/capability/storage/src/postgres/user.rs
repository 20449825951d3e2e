//! Postgres 用户存储实现
//!
//! 设计要点：
//! - `password_hash` 可能是历史明文，由认证能力在登录时升级
//! - `refresh_jti` 为空表示当前没有有效的 refresh token

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::traits::UserStore;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgUserStore {
    pub pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StorageError> {
    Ok(UserRecord {
        user_id: row.try_get("user_id")?,
        username: row.try_get("username")?,
        password: row.try_get("password_hash")?,
        is_active: row.try_get("is_active")?,
        is_superuser: row.try_get("is_superuser")?,
    })
}

#[async_trait::async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StorageError> {
        let row = sqlx::query(
            "select user_id, username, password_hash, is_active, is_superuser \
             from users where username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let row = sqlx::query(
            "select user_id, username, password_hash, is_active, is_superuser \
             from users where user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("update users set password_hash = $2 where user_id = $1")
            .bind(user_id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_refresh_jti(&self, user_id: i64) -> Result<Option<String>, StorageError> {
        let value: Option<Option<String>> =
            sqlx::query_scalar("select refresh_jti from users where user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(value.flatten())
    }

    async fn set_refresh_jti(
        &self,
        user_id: i64,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let result = sqlx::query("update users set refresh_jti = $2 where user_id = $1")
            .bind(user_id)
            .bind(refresh_jti)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
