//! 追踪、请求 ID 生成与访问计数。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 访问计数快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub sensors_created: u64,
    pub sensors_updated: u64,
    pub sensors_deleted: u64,
    pub readings_appended: u64,
    pub not_found: u64,
    pub forbidden: u64,
}

/// 访问计数（进程内，重启归零）。
pub struct TelemetryMetrics {
    sensors_created: AtomicU64,
    sensors_updated: AtomicU64,
    sensors_deleted: AtomicU64,
    readings_appended: AtomicU64,
    not_found: AtomicU64,
    forbidden: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            sensors_created: AtomicU64::new(0),
            sensors_updated: AtomicU64::new(0),
            sensors_deleted: AtomicU64::new(0),
            readings_appended: AtomicU64::new(0),
            not_found: AtomicU64::new(0),
            forbidden: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            sensors_created: self.sensors_created.load(Ordering::Relaxed),
            sensors_updated: self.sensors_updated.load(Ordering::Relaxed),
            sensors_deleted: self.sensors_deleted.load(Ordering::Relaxed),
            readings_appended: self.readings_appended.load(Ordering::Relaxed),
            not_found: self.not_found.load(Ordering::Relaxed),
            forbidden: self.forbidden.load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录传感器创建次数。
pub fn record_sensor_created() {
    metrics().sensors_created.fetch_add(1, Ordering::Relaxed);
}

/// 记录传感器更新次数。
pub fn record_sensor_updated() {
    metrics().sensors_updated.fetch_add(1, Ordering::Relaxed);
}

/// 记录传感器删除次数。
pub fn record_sensor_deleted() {
    metrics().sensors_deleted.fetch_add(1, Ordering::Relaxed);
}

/// 记录读数写入次数。
pub fn record_reading_appended() {
    metrics().readings_appended.fetch_add(1, Ordering::Relaxed);
}

/// 记录资源不存在次数。
pub fn record_not_found() {
    metrics().not_found.fetch_add(1, Ordering::Relaxed);
}

/// 记录归属校验拒绝次数。
pub fn record_forbidden() {
    metrics().forbidden.fetch_add(1, Ordering::Relaxed);
}
