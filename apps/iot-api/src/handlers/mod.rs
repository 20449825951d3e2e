//! Handlers 模块

pub mod auth;
pub mod metrics;
pub mod readings;
pub mod sensors;

pub use auth::*;
pub use metrics::*;
pub use readings::*;
pub use sensors::*;
