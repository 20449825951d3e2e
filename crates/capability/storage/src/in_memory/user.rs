//! 用户内存存储实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 内置超级管理员账户（用户名：admin，密码：admin123）
//! - 根据用户名 / ID 查找用户
//! - 口令哈希升级与 refresh token jti 绑定

use crate::error::StorageError;
use crate::models::UserRecord;
use crate::traits::UserStore;
use std::collections::HashMap;
use std::sync::RwLock;

struct UserEntry {
    record: UserRecord,
    refresh_jti: Option<String>,
}

impl UserEntry {
    fn new(record: UserRecord) -> Self {
        Self {
            record,
            refresh_jti: None,
        }
    }
}

/// 用户内存存储
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储，以 user_id 为键。
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, UserEntry>>,
}

impl InMemoryUserStore {
    /// 创建空的用户存储
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// 内置超级管理员账户
    ///
    /// 创建包含默认 admin 用户（user_id = 1）的存储。
    pub fn with_default_admin() -> Self {
        let admin = UserRecord {
            user_id: 1,
            username: "admin".to_string(),
            password: "admin123".to_string(),
            is_active: true,
            is_superuser: true,
        };
        let users = HashMap::from([(admin.user_id, UserEntry::new(admin))]);
        Self {
            users: RwLock::new(users),
        }
    }

    /// 写入或覆盖一个用户（用于种子数据和测试）
    ///
    /// 覆盖时清除已绑定的 refresh token。
    pub fn insert(&self, record: UserRecord) -> Result<(), StorageError> {
        let mut users = self.users.write().map_err(|_| StorageError::lock_failed())?;
        users.insert(record.user_id, UserEntry::new(record));
        Ok(())
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::lock_failed())?;
        Ok(users
            .values()
            .find(|entry| entry.record.username == username)
            .map(|entry| entry.record.clone()))
    }

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::lock_failed())?;
        Ok(users.get(&user_id).map(|entry| entry.record.clone()))
    }

    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError> {
        let mut users = self.users.write().map_err(|_| StorageError::lock_failed())?;
        match users.get_mut(&user_id) {
            Some(entry) => {
                entry.record.password = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_refresh_jti(&self, user_id: i64) -> Result<Option<String>, StorageError> {
        let users = self.users.read().map_err(|_| StorageError::lock_failed())?;
        Ok(users
            .get(&user_id)
            .and_then(|entry| entry.refresh_jti.clone()))
    }

    async fn set_refresh_jti(
        &self,
        user_id: i64,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError> {
        let mut users = self.users.write().map_err(|_| StorageError::lock_failed())?;
        match users.get_mut(&user_id) {
            Some(entry) => {
                entry.refresh_jti = refresh_jti.map(str::to_string);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(user_id: i64) -> UserRecord {
        UserRecord {
            user_id,
            username: format!("user-{user_id}"),
            password: "pw".to_string(),
            is_active: true,
            is_superuser: false,
        }
    }

    #[test]
    fn insert_reports_poisoned_lock() {
        let store = Arc::new(InMemoryUserStore::new());
        let poisoner = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.users.write().expect("lock");
            panic!("poison the user table");
        })
        .join();

        let err = store.insert(user(2)).expect_err("poisoned");
        assert_eq!(err.message(), "lock failed");
    }

    #[test]
    fn insert_overwrites_and_clears_refresh_binding() {
        let store = InMemoryUserStore::new();
        store.insert(user(2)).expect("insert");
        {
            let mut users = store.users.write().expect("lock");
            let entry = users.get_mut(&2).expect("entry");
            entry.refresh_jti = Some("jti".to_string());
        }
        store.insert(user(2)).expect("insert");
        let users = store.users.read().expect("lock");
        assert!(users.get(&2).is_some_and(|entry| entry.refresh_jti.is_none()));
    }
}
