//! 中间件与请求级认证辅助。

mod auth;

pub use auth::*;
