//! Postgres 传感器存储实现
//!
//! 设计要点：
//! - 所有者过滤使用可空参数：`$1 is null` 时不过滤
//! - 部分更新通过 coalesce 保留未提供的字段

use crate::error::StorageError;
use crate::models::{NewSensor, Page, SensorFilter, SensorRecord, SensorUpdate};
use crate::traits::SensorStore;
use crate::validation::ensure_page;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

const SENSOR_COLUMNS: &str = "sensor_id, name, measurement, location, description, owner_id";

pub struct PgSensorStore {
    pub pool: PgPool,
}

impl PgSensorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn sensor_from_row(row: &PgRow) -> Result<SensorRecord, StorageError> {
    Ok(SensorRecord {
        sensor_id: row.try_get("sensor_id")?,
        name: row.try_get("name")?,
        measurement: row.try_get("measurement")?,
        location: row.try_get("location")?,
        description: row.try_get("description")?,
        owner_id: row.try_get("owner_id")?,
    })
}

#[async_trait::async_trait]
impl SensorStore for PgSensorStore {
    async fn find_sensor(&self, sensor_id: i64) -> Result<Option<SensorRecord>, StorageError> {
        let row = sqlx::query(&format!(
            "select {SENSOR_COLUMNS} from sensors where sensor_id = $1"
        ))
        .bind(sensor_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(sensor_from_row).transpose()
    }

    async fn count_sensors(&self, filter: SensorFilter) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar(
            "select count(*) from sensors where ($1::bigint is null or owner_id = $1)",
        )
        .bind(filter.owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }

    async fn list_sensors(
        &self,
        filter: SensorFilter,
        page: Page,
    ) -> Result<Vec<SensorRecord>, StorageError> {
        ensure_page(&page)?;
        let rows = sqlx::query(&format!(
            "select {SENSOR_COLUMNS} from sensors \
             where ($1::bigint is null or owner_id = $1) \
             order by sensor_id offset $2 limit $3"
        ))
        .bind(filter.owner_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(sensor_from_row).collect()
    }

    async fn create_sensor(&self, record: NewSensor) -> Result<SensorRecord, StorageError> {
        let row = sqlx::query(&format!(
            "insert into sensors (name, measurement, location, description, owner_id) \
             values ($1, $2, $3, $4, $5) \
             returning {SENSOR_COLUMNS}"
        ))
        .bind(&record.name)
        .bind(&record.measurement)
        .bind(&record.location)
        .bind(&record.description)
        .bind(record.owner_id)
        .fetch_one(&self.pool)
        .await?;
        sensor_from_row(&row)
    }

    async fn update_sensor(
        &self,
        sensor_id: i64,
        update: SensorUpdate,
    ) -> Result<Option<SensorRecord>, StorageError> {
        let (description_set, description) = match update.description {
            Some(description) => (true, description),
            None => (false, None),
        };
        let row = sqlx::query(&format!(
            "update sensors set \
             name = coalesce($1, name), \
             measurement = coalesce($2, measurement), \
             location = coalesce($3, location), \
             description = case when $4 then $5 else description end \
             where sensor_id = $6 \
             returning {SENSOR_COLUMNS}"
        ))
        .bind(update.name)
        .bind(update.measurement)
        .bind(update.location)
        .bind(description_set)
        .bind(description)
        .bind(sensor_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(sensor_from_row).transpose()
    }

    async fn delete_sensor(&self, sensor_id: i64) -> Result<bool, StorageError> {
        let result = sqlx::query("delete from sensors where sensor_id = $1")
            .bind(sensor_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
