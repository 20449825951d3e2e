//! Postgres 读数存储实现

use crate::error::StorageError;
use crate::models::{NewReading, Page, ReadingRecord};
use crate::traits::ReadingStore;
use crate::validation::ensure_page;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

pub struct PgReadingStore {
    pub pool: PgPool,
}

impl PgReadingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn reading_from_row(row: &PgRow) -> Result<ReadingRecord, StorageError> {
    Ok(ReadingRecord {
        reading_id: row.try_get("reading_id")?,
        sensor_id: row.try_get("sensor_id")?,
        value: row.try_get("value")?,
        ts_ms: row.try_get("ts_ms")?,
    })
}

#[async_trait::async_trait]
impl ReadingStore for PgReadingStore {
    async fn count_readings(&self, sensor_id: i64) -> Result<i64, StorageError> {
        let count: i64 = sqlx::query_scalar("select count(*) from readings where sensor_id = $1")
            .bind(sensor_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn list_readings(
        &self,
        sensor_id: i64,
        page: Page,
    ) -> Result<Vec<ReadingRecord>, StorageError> {
        ensure_page(&page)?;
        let rows = sqlx::query(
            "select reading_id, sensor_id, value, ts_ms from readings \
             where sensor_id = $1 order by reading_id offset $2 limit $3",
        )
        .bind(sensor_id)
        .bind(page.skip)
        .bind(page.limit)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(reading_from_row).collect()
    }

    async fn create_reading(&self, record: NewReading) -> Result<ReadingRecord, StorageError> {
        let row = sqlx::query(
            "insert into readings (sensor_id, value, ts_ms) values ($1, $2, $3) \
             returning reading_id, sensor_id, value, ts_ms",
        )
        .bind(record.sensor_id)
        .bind(record.value)
        .bind(record.ts_ms)
        .fetch_one(&self.pool)
        .await?;
        reading_from_row(&row)
    }
}
