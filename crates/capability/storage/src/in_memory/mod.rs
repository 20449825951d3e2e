//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - UserStore: InMemoryUserStore
//! - SensorStore: InMemorySensorStore
//! - ReadingStore: InMemoryReadingStore
//!
//! 记录存放在 `BTreeMap` 中，按 ID 升序遍历即插入顺序。

pub mod reading;
pub mod sensor;
pub mod user;

pub use reading::*;
pub use sensor::*;
pub use user::*;
