//! 读数内存存储实现
//!
//! 不感知传感器是否存在；删除传感器不会清理这里的读数。

use crate::error::StorageError;
use crate::models::{NewReading, Page, ReadingRecord};
use crate::traits::ReadingStore;
use crate::validation::page_window;
use std::sync::RwLock;

/// 读数内存存储
///
/// 追加写入的 Vec，ID 单调递增，顺序即写入顺序。
pub struct InMemoryReadingStore {
    readings: RwLock<Vec<ReadingRecord>>,
}

impl InMemoryReadingStore {
    /// 创建新的读数存储
    pub fn new() -> Self {
        Self {
            readings: RwLock::new(Vec::new()),
        }
    }

    /// 获取当前累计的读数数量（用于测试）
    pub fn len(&self) -> usize {
        self.readings.read().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReadingStore for InMemoryReadingStore {
    async fn count_readings(&self, sensor_id: i64) -> Result<i64, StorageError> {
        let readings = self.readings.read().map_err(|_| StorageError::lock_failed())?;
        let count = readings
            .iter()
            .filter(|item| item.sensor_id == sensor_id)
            .count();
        Ok(count as i64)
    }

    async fn list_readings(
        &self,
        sensor_id: i64,
        page: Page,
    ) -> Result<Vec<ReadingRecord>, StorageError> {
        let readings = self.readings.read().map_err(|_| StorageError::lock_failed())?;
        let matched: Vec<&ReadingRecord> = readings
            .iter()
            .filter(|item| item.sensor_id == sensor_id)
            .collect();
        let window = page_window(&page, matched.len())?;
        Ok(matched[window].iter().map(|item| (*item).clone()).collect())
    }

    async fn create_reading(&self, record: NewReading) -> Result<ReadingRecord, StorageError> {
        let mut readings = self
            .readings
            .write()
            .map_err(|_| StorageError::lock_failed())?;
        let reading_id = readings.last().map(|item| item.reading_id + 1).unwrap_or(1);
        let created = ReadingRecord {
            reading_id,
            sensor_id: record.sensor_id,
            value: record.value,
            ts_ms: record.ts_ms,
        };
        readings.push(created.clone());
        Ok(created)
    }
}
