//! 稳定的 DTO 与 API 响应契约。

use serde::{Deserialize, Deserializer, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 登录请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// 登录响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
    pub user_id: i64,
    pub username: String,
    pub is_superuser: bool,
}

/// 刷新 token 请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    #[serde(alias = "refresh_token")]
    pub refresh_token: String,
}

/// 刷新 token 响应体。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires: u64,
}

/// 列表分页参数（`?skip=&limit=`）。
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// 简单消息响应（删除成功等）。
#[derive(Debug, Serialize)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// 传感器创建请求体。
///
/// 不含 owner 字段：所有者总是当前请求主体，请求体里多余的字段会被忽略。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSensorRequest {
    pub name: String,
    pub measurement: String,
    pub location: String,
    pub description: Option<String>,
}

/// 传感器更新请求体（部分更新）。
///
/// 字段缺省表示不修改；`description: null` 表示清空描述。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSensorRequest {
    pub name: Option<String>,
    pub measurement: Option<String>,
    pub location: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
}

/// 传感器返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorDto {
    pub id: i64,
    pub name: String,
    pub measurement: String,
    pub location: String,
    pub description: Option<String>,
    pub owner_id: i64,
}

/// 传感器分页返回结构，`count` 为忽略分页窗口后的总数。
#[derive(Debug, Serialize)]
pub struct SensorsDto {
    pub data: Vec<SensorDto>,
    pub count: i64,
}

/// 读数写入请求体。`tsMs` 缺省时取服务端当前时间。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingRequest {
    pub value: f64,
    pub ts_ms: Option<i64>,
}

/// 读数返回结构。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingDto {
    pub id: i64,
    pub sensor_id: i64,
    pub value: f64,
    pub ts_ms: i64,
}

/// 读数分页返回结构。
#[derive(Debug, Serialize)]
pub struct ReadingsDto {
    pub data: Vec<ReadingDto>,
    pub count: i64,
}

/// 访问计数快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub sensors_created: u64,
    pub sensors_updated: u64,
    pub sensors_deleted: u64,
    pub readings_appended: u64,
    pub not_found: u64,
    pub forbidden: u64,
}

/// 区分"字段缺省"与"字段显式为 null"：出现即为 `Some(..)`。
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
