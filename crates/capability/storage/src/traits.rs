//! 存储接口 Trait 定义
//!
//! 定义所有资源存储的异步接口：
//! - UserStore：用户存储（认证能力使用）
//! - SensorStore：传感器存储
//! - ReadingStore：读数存储
//!
//! 设计原则：
//! - 存储层不做归属判定，只按过滤条件取数
//! - 所有接口返回 StorageError
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    NewReading, NewSensor, Page, ReadingRecord, SensorFilter, SensorRecord, SensorUpdate,
    UserRecord,
};
use async_trait::async_trait;

/// 用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 根据用户名查找用户
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StorageError>;

    /// 根据用户 ID 查找用户
    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError>;

    /// 更新口令哈希（明文口令升级为 argon2）
    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, StorageError>;

    /// 读取当前有效的 refresh token jti
    async fn get_refresh_jti(&self, user_id: i64) -> Result<Option<String>, StorageError>;

    /// 绑定（或清除）refresh token jti
    async fn set_refresh_jti(
        &self,
        user_id: i64,
        refresh_jti: Option<&str>,
    ) -> Result<bool, StorageError>;
}

/// 传感器存储接口
///
/// 列表按 `sensor_id` 升序（即插入顺序）返回。
#[async_trait]
pub trait SensorStore: Send + Sync {
    /// 查找指定传感器
    async fn find_sensor(&self, sensor_id: i64) -> Result<Option<SensorRecord>, StorageError>;

    /// 统计满足过滤条件的传感器数量（不受分页影响）
    async fn count_sensors(&self, filter: SensorFilter) -> Result<i64, StorageError>;

    /// 分页列出满足过滤条件的传感器
    async fn list_sensors(
        &self,
        filter: SensorFilter,
        page: Page,
    ) -> Result<Vec<SensorRecord>, StorageError>;

    /// 创建传感器，返回带分配 ID 的记录
    async fn create_sensor(&self, record: NewSensor) -> Result<SensorRecord, StorageError>;

    /// 部分更新传感器，返回更新后的记录；不存在时返回 None
    async fn update_sensor(
        &self,
        sensor_id: i64,
        update: SensorUpdate,
    ) -> Result<Option<SensorRecord>, StorageError>;

    /// 删除传感器，返回是否确有删除
    async fn delete_sensor(&self, sensor_id: i64) -> Result<bool, StorageError>;
}

/// 读数存储接口
///
/// 列表按 `reading_id` 升序（即写入顺序）返回。
#[async_trait]
pub trait ReadingStore: Send + Sync {
    /// 统计指定传感器的读数数量（不受分页影响）
    async fn count_readings(&self, sensor_id: i64) -> Result<i64, StorageError>;

    /// 分页列出指定传感器的读数
    async fn list_readings(
        &self,
        sensor_id: i64,
        page: Page,
    ) -> Result<Vec<ReadingRecord>, StorageError>;

    /// 写入读数，返回带分配 ID 的记录
    async fn create_reading(&self, record: NewReading) -> Result<ReadingRecord, StorageError>;
}
