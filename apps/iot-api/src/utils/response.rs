//! HTTP 响应辅助函数和 DTO 转换
//!
//! - 错误响应：auth_error, forbidden_error, bad_request_error, internal_auth_error, access_error
//! - DTO 转换：sensor_to_dto, reading_to_dto
//!
//! 所有错误都返回统一的 ApiResponse 格式，HTTP 状态码与错误码一一对应。

use api_contract::{ApiResponse, ReadingDto, SensorDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use iot_access::AccessError;
use iot_auth::AuthError;
use iot_storage::{ReadingRecord, SensorRecord};
use serde::Serialize;
use tracing::error;

/// 200 成功响应
pub fn ok<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(ApiResponse::success(data))).into_response()
}

fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> Response {
    (status, Json(ApiResponse::<()>::error(code, message))).into_response()
}

/// 认证失败（401）
pub fn auth_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::UNAUTHORIZED, "AUTH.UNAUTHORIZED", message)
}

/// 禁止访问（403）
pub fn forbidden_error() -> Response {
    error_response(
        StatusCode::FORBIDDEN,
        "AUTH.FORBIDDEN",
        AccessError::Forbidden.to_string(),
    )
}

/// 错误请求（400）
pub fn bad_request_error(message: impl Into<String>) -> Response {
    error_response(StatusCode::BAD_REQUEST, "INVALID.REQUEST", message)
}

/// 认证内部错误（500）
pub fn internal_auth_error(err: AuthError) -> Response {
    error!(error = %err, "auth failure");
    error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL.ERROR", err.to_string())
}

/// 访问层错误映射
pub fn access_error(err: AccessError) -> Response {
    match err {
        AccessError::NotFound(_) => {
            error_response(StatusCode::NOT_FOUND, "RESOURCE.NOT_FOUND", err.to_string())
        }
        AccessError::Forbidden => forbidden_error(),
        AccessError::Validation(message) => bad_request_error(message),
        AccessError::Storage(storage) => {
            error!(error = %storage, "storage failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL.ERROR",
                storage.to_string(),
            )
        }
    }
}

/// SensorRecord 转 SensorDto
pub fn sensor_to_dto(record: SensorRecord) -> SensorDto {
    SensorDto {
        id: record.sensor_id,
        name: record.name,
        measurement: record.measurement,
        location: record.location,
        description: record.description,
        owner_id: record.owner_id,
    }
}

/// ReadingRecord 转 ReadingDto
pub fn reading_to_dto(record: ReadingRecord) -> ReadingDto {
    ReadingDto {
        id: record.reading_id,
        sensor_id: record.sensor_id,
        value: record.value,
        ts_ms: record.ts_ms,
    }
}
