//! 数据模型
//!
//! 定义所有存储相关的数据模型和更新结构：
//! - 用户模型：UserRecord
//! - 传感器模型：SensorRecord, NewSensor, SensorUpdate, SensorFilter
//! - 读数模型：ReadingRecord, NewReading
//! - 分页窗口：Page

use domain::Principal;

/// 用户记录。
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub user_id: i64,
    pub username: String,
    /// argon2 哈希；历史数据可能是明文，登录成功后升级。
    pub password: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

impl UserRecord {
    /// 将用户记录转换为请求主体。
    pub fn to_principal(&self) -> Principal {
        Principal::new(self.user_id, self.is_superuser)
    }
}

/// 传感器记录。
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    pub sensor_id: i64,
    pub name: String,
    pub measurement: String,
    pub location: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// 传感器创建输入（`sensor_id` 由存储分配）。
#[derive(Debug, Clone)]
pub struct NewSensor {
    pub name: String,
    pub measurement: String,
    pub location: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// 传感器部分更新输入。
///
/// 没有 `owner_id`：所有者创建后不可变更。
/// `description` 外层 `None` 表示不修改，`Some(None)` 表示清空。
#[derive(Debug, Clone, Default)]
pub struct SensorUpdate {
    pub name: Option<String>,
    pub measurement: Option<String>,
    pub location: Option<String>,
    pub description: Option<Option<String>>,
}

impl SensorUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.measurement.is_none()
            && self.location.is_none()
            && self.description.is_none()
    }

    /// 将更新合并到已加载的记录上，只覆盖显式给出的字段。
    pub fn apply_to(self, record: &mut SensorRecord) {
        if let Some(name) = self.name {
            record.name = name;
        }
        if let Some(measurement) = self.measurement {
            record.measurement = measurement;
        }
        if let Some(location) = self.location {
            record.location = location;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
    }
}

/// 传感器查询过滤条件。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorFilter {
    pub owner_id: Option<i64>,
}

impl SensorFilter {
    /// 不过滤（超级管理员视图）。
    pub fn all() -> Self {
        Self { owner_id: None }
    }

    /// 仅指定所有者的传感器。
    pub fn owned_by(owner_id: i64) -> Self {
        Self {
            owner_id: Some(owner_id),
        }
    }

    pub fn matches(&self, record: &SensorRecord) -> bool {
        self.owner_id.is_none_or(|owner_id| record.owner_id == owner_id)
    }
}

/// 读数记录。
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingRecord {
    pub reading_id: i64,
    pub sensor_id: i64,
    pub value: f64,
    pub ts_ms: i64,
}

/// 读数创建输入（`reading_id` 由存储分配）。
#[derive(Debug, Clone)]
pub struct NewReading {
    pub sensor_id: i64,
    pub value: f64,
    pub ts_ms: i64,
}

/// 偏移分页窗口。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self { skip, limit }
    }
}
