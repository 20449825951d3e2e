//! IoT 传感器 HTTP API：登录/刷新、传感器 CRUD、读数追加与分页、访问计数。
//!
//! 未配置 `IOT_DATABASE_URL` 时退化为内存存储，并内置 admin/admin123 超级用户。

mod handlers;
mod middleware;
mod routes;
mod utils;

use iot_access::{ReadingService, SensorService};
use iot_auth::{AuthService, Authenticator, JwtManager};
use iot_config::AppConfig;
use iot_storage::{
    InMemoryReadingStore, InMemorySensorStore, InMemoryUserStore, PgReadingStore, PgSensorStore,
    PgUserStore, ReadingStore, SensorStore, UserStore, connect_pool,
};
use iot_telemetry::init_tracing;
use std::sync::Arc;
use tracing::{info, warn};

/// handlers 共享的应用状态。
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authenticator>,
    pub sensors: Arc<SensorService>,
    pub readings: Arc<ReadingService>,
}

impl AppState {
    pub fn new(
        user_store: Arc<dyn UserStore>,
        sensor_store: Arc<dyn SensorStore>,
        reading_store: Arc<dyn ReadingStore>,
        jwt: JwtManager,
    ) -> Self {
        Self {
            auth: Arc::new(AuthService::new(user_store, jwt)),
            sensors: Arc::new(SensorService::new(sensor_store.clone())),
            readings: Arc::new(ReadingService::new(sensor_store, reading_store)),
        }
    }

    /// 全内存状态（本地演示与测试）。
    pub fn in_memory(jwt: JwtManager) -> Self {
        Self::new(
            Arc::new(InMemoryUserStore::with_default_admin()),
            Arc::new(InMemorySensorStore::new()),
            Arc::new(InMemoryReadingStore::new()),
            jwt,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let jwt = JwtManager::new(
        config.jwt_secret.clone(),
        config.jwt_access_ttl_seconds,
        config.jwt_refresh_ttl_seconds,
    );
    let state = match config.database_url.as_deref() {
        Some(database_url) => {
            // Postgres 存储（需先执行 migrations/0001_init.sql）
            let pool = connect_pool(database_url, config.db_max_connections).await?;
            info!(max_connections = config.db_max_connections, "postgres pool ready");
            AppState::new(
                Arc::new(PgUserStore::new(pool.clone())),
                Arc::new(PgSensorStore::new(pool.clone())),
                Arc::new(PgReadingStore::new(pool)),
                jwt,
            )
        }
        None => {
            warn!("IOT_DATABASE_URL not set, using in-memory stores");
            AppState::in_memory(jwt)
        }
    };

    let app = routes::create_app(state);
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    info!(addr = %config.http_addr, "iot-api listening");
    axum::serve(listener, app).await?;
    Ok(())
}
