//! 应用运行配置加载。
//!
//! 所有配置来自 `IOT_*` 环境变量；二进制启动时先通过 dotenvy 加载 `.env`。

use std::env;

pub const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    /// 为空时使用内存存储（带内置管理员），仅适合本地演示。
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: u64,
    pub jwt_refresh_ttl_seconds: u64,
}

impl AppConfig {
    /// 从进程环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源读取配置，`lookup` 返回 `None` 视为未设置。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let source = Source { lookup };
        let jwt_secret = source
            .optional("IOT_JWT_SECRET")
            .ok_or_else(|| ConfigError::Missing("IOT_JWT_SECRET".to_string()))?;
        let jwt_access_ttl_seconds = source.required_parse::<u64>("IOT_JWT_ACCESS_TTL_SECONDS")?;
        let jwt_refresh_ttl_seconds =
            source.required_parse::<u64>("IOT_JWT_REFRESH_TTL_SECONDS")?;
        let http_addr = source
            .optional("IOT_HTTP_ADDR")
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string());
        let database_url = source.optional("IOT_DATABASE_URL");
        let db_max_connections =
            source.parse_with_default("IOT_DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid(
                "IOT_DB_MAX_CONNECTIONS".to_string(),
                "0".to_string(),
            ));
        }

        Ok(Self {
            http_addr,
            database_url,
            db_max_connections,
            jwt_secret,
            jwt_access_ttl_seconds,
            jwt_refresh_ttl_seconds,
        })
    }
}

struct Source<F> {
    lookup: F,
}

impl<F> Source<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// 空字符串按未设置处理。
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key).filter(|value| !value.trim().is_empty())
    }

    fn required_parse<T: std::str::FromStr>(&self, key: &str) -> Result<T, ConfigError> {
        let value = self
            .optional(key)
            .ok_or_else(|| ConfigError::Missing(key.to_string()))?;
        parse(key, value)
    }

    fn parse_with_default<T: std::str::FromStr>(
        &self,
        key: &str,
        default: T,
    ) -> Result<T, ConfigError> {
        match self.optional(key) {
            Some(value) => parse(key, value),
            None => Ok(default),
        }
    }
}

fn parse<T: std::str::FromStr>(key: &str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
