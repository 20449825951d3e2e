//! 传感器内存存储实现
//!
//! 功能：
//! - 传感器 CRUD 操作
//! - 按所有者过滤的计数与分页

use crate::error::StorageError;
use crate::models::{NewSensor, Page, SensorFilter, SensorRecord, SensorUpdate};
use crate::traits::SensorStore;
use crate::validation::page_window;
use std::collections::BTreeMap;
use std::sync::RwLock;

struct SensorTable {
    next_id: i64,
    rows: BTreeMap<i64, SensorRecord>,
}

/// 传感器内存存储
///
/// 使用 RwLock + BTreeMap 提供线程安全的内存存储，ID 自增分配。
pub struct InMemorySensorStore {
    table: RwLock<SensorTable>,
}

impl InMemorySensorStore {
    /// 创建新的传感器存储
    pub fn new() -> Self {
        Self {
            table: RwLock::new(SensorTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// 当前传感器数量（用于测试）
    pub fn len(&self) -> usize {
        self.table.read().map(|table| table.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySensorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SensorStore for InMemorySensorStore {
    async fn find_sensor(&self, sensor_id: i64) -> Result<Option<SensorRecord>, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::lock_failed())?;
        Ok(table.rows.get(&sensor_id).cloned())
    }

    async fn count_sensors(&self, filter: SensorFilter) -> Result<i64, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::lock_failed())?;
        let count = table.rows.values().filter(|item| filter.matches(item)).count();
        Ok(count as i64)
    }

    async fn list_sensors(
        &self,
        filter: SensorFilter,
        page: Page,
    ) -> Result<Vec<SensorRecord>, StorageError> {
        let table = self.table.read().map_err(|_| StorageError::lock_failed())?;
        let matched: Vec<&SensorRecord> =
            table.rows.values().filter(|item| filter.matches(item)).collect();
        let window = page_window(&page, matched.len())?;
        Ok(matched[window].iter().map(|item| (*item).clone()).collect())
    }

    async fn create_sensor(&self, record: NewSensor) -> Result<SensorRecord, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::lock_failed())?;
        let sensor_id = table.next_id;
        table.next_id += 1;
        let created = SensorRecord {
            sensor_id,
            name: record.name,
            measurement: record.measurement,
            location: record.location,
            description: record.description,
            owner_id: record.owner_id,
        };
        table.rows.insert(sensor_id, created.clone());
        Ok(created)
    }

    async fn update_sensor(
        &self,
        sensor_id: i64,
        update: SensorUpdate,
    ) -> Result<Option<SensorRecord>, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::lock_failed())?;
        let sensor = match table.rows.get_mut(&sensor_id) {
            Some(sensor) => sensor,
            None => return Ok(None),
        };
        update.apply_to(sensor);
        Ok(Some(sensor.clone()))
    }

    async fn delete_sensor(&self, sensor_id: i64) -> Result<bool, StorageError> {
        let mut table = self.table.write().map_err(|_| StorageError::lock_failed())?;
        Ok(table.rows.remove(&sensor_id).is_some())
    }
}
