//! # PostgreSQL 存储实现模块
//!
//! 本模块提供所有存储接口的 PostgreSQL 实现，用于生产环境。
//!
//! ## 设计原则
//!
//! 1. **参数化查询**：所有 SQL 查询使用参数绑定，防止 SQL 注入攻击
//! 2. **稳定顺序**：列表查询统一 `order by` 主键，分页结果可重复
//! 3. **计数与分页分离**：`count(*)` 与 `offset/limit` 使用同一过滤条件
//! 4. **连接池管理**：使用连接池复用数据库连接
//!
//! ## 包含的实现
//!
//! - **UserStore** (`user.rs`)：用户存储，支持登录验证与 refresh token 轮换
//! - **SensorStore** (`sensor.rs`)：传感器存储，支持按所有者过滤
//! - **ReadingStore** (`reading.rs`)：读数存储，按传感器过滤
//!
//! ## 数据库模式要求
//!
//! 见仓库根目录 `migrations/0001_init.sql`：
//! - `users`：用户表（user_id, username, password_hash, is_active, is_superuser, refresh_jti）
//! - `sensors`：传感器表（sensor_id, name, measurement, location, description, owner_id）
//! - `readings`：读数表（reading_id, sensor_id, value, ts_ms）
//!
//! `readings.sensor_id` 声明了 `on delete cascade`，删除传感器时由数据库清理读数。
//!
//! ## 事务支持
//!
//! 当前实现不使用事务，并发更新遵循数据库的最后写入生效语义。

pub mod reading;
pub mod sensor;
pub mod user;

pub use reading::*;
pub use sensor::*;
pub use user::*;
