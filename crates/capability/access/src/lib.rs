//! 归属作用域访问层。
//!
//! 决定谁可以读取、创建、修改、删除哪个资源，并以一致的方式计数与分页：
//!
//! - [`SensorService`]：传感器 CRUD，所有操作先查存在、再判归属、最后落库
//! - [`ReadingService`]：读数追加与分页，归属继承自所属传感器
//! - [`page`]：两者共用的 "先计数再取页" 逻辑
//! - [`validation`]：输入形状校验
//!
//! 服务本身无状态，不缓存实体；每次调用都重新从存储读取后再做归属判定。

mod error;
pub mod page;
mod reading;
mod sensor;
pub mod validation;

pub use error::AccessError;
pub use page::{DEFAULT_PAGE_LIMIT, Paged, collect_page, page_request};
pub use reading::{ReadingDraft, ReadingService};
pub use sensor::{SensorDraft, SensorPatch, SensorService};
