//! # IoT Storage 模块
//!
//! 本模块提供统一的数据存储抽象层，支持多种存储后端实现。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：定义所有资源存储的异步 Trait 接口
//! 2. **数据模型层** (`models.rs`)：定义存储相关的数据结构
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：分页窗口校验
//! 5. **连接管理层** (`connection.rs`)：数据库连接池管理
//! 6. **实现层**：
//!    - `in_memory/`：内存存储实现（用于测试和演示）
//!    - `postgres/`：PostgreSQL 存储实现（生产环境使用）
//!
//! ## 职责边界
//!
//! 存储层只负责按过滤条件取数、计数和写入，不做任何归属判定。
//! "谁能访问哪个传感器" 由 `iot-access` 在调用存储之前决定。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use iot_storage::{InMemorySensorStore, NewSensor, Page, SensorFilter, SensorStore};
//!
//! let store = InMemorySensorStore::new();
//! store.create_sensor(NewSensor {
//!     name: "t1".to_string(),
//!     measurement: "temperature".to_string(),
//!     location: "lab".to_string(),
//!     description: None,
//!     owner_id: 2,
//! }).await?;
//! let total = store.count_sensors(SensorFilter::owned_by(2)).await?;
//! let items = store.list_sensors(SensorFilter::owned_by(2), Page::new(0, 100)).await?;
//! ```

pub mod connection;
pub mod error;
pub mod in_memory;
pub mod models;
pub mod postgres;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use models::*;
pub use traits::*;
pub use validation::*;

pub use in_memory::{InMemoryReadingStore, InMemorySensorStore, InMemoryUserStore};

pub use postgres::{PgReadingStore, PgSensorStore, PgUserStore};
