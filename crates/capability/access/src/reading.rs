//! 读数访问服务。
//!
//! 读数没有自己的所有者，所有访问都先解析所属传感器并按传感器归属判定。

use crate::page::{Paged, collect_page};
use crate::sensor::resolve_sensor;
use crate::validation::ensure_finite;
use crate::AccessError;
use domain::{Operation, Principal};
use iot_storage::{NewReading, Page, ReadingRecord, ReadingStore, SensorStore};
use iot_telemetry::record_reading_appended;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// 读数写入输入（未校验）。`ts_ms` 缺省时取当前时间。
#[derive(Debug, Clone)]
pub struct ReadingDraft {
    pub value: f64,
    pub ts_ms: Option<i64>,
}

/// 读数追加与分页编排。
pub struct ReadingService {
    sensors: Arc<dyn SensorStore>,
    readings: Arc<dyn ReadingStore>,
}

impl ReadingService {
    pub fn new(sensors: Arc<dyn SensorStore>, readings: Arc<dyn ReadingStore>) -> Self {
        Self { sensors, readings }
    }

    /// 为传感器追加一条读数，`sensor_id` 总是取自调用参数。
    pub async fn append(
        &self,
        principal: &Principal,
        sensor_id: i64,
        draft: ReadingDraft,
    ) -> Result<ReadingRecord, AccessError> {
        let value = ensure_finite(draft.value, "value")?;
        resolve_sensor(self.sensors.as_ref(), principal, sensor_id, Operation::Write).await?;
        let created = self
            .readings
            .create_reading(NewReading {
                sensor_id,
                value,
                ts_ms: draft.ts_ms.unwrap_or_else(now_epoch_millis),
            })
            .await?;
        record_reading_appended();
        debug!(
            target: "iot.access",
            sensor_id,
            reading_id = created.reading_id,
            "reading appended"
        );
        Ok(created)
    }

    /// 分页列出传感器的读数，`total` 为该传感器的读数总数。
    pub async fn list(
        &self,
        principal: &Principal,
        sensor_id: i64,
        page: Page,
    ) -> Result<Paged<ReadingRecord>, AccessError> {
        resolve_sensor(self.sensors.as_ref(), principal, sensor_id, Operation::Read).await?;
        collect_page(
            self.readings.count_readings(sensor_id),
            self.readings.list_readings(sensor_id, page),
        )
        .await
    }
}

/// 当前时间戳（毫秒）。
fn now_epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
