//! 传感器 CRUD handlers
//!
//! - GET /sensors?skip=&limit= - 列出当前主体可见的传感器（超级用户可见全部）
//! - POST /sensors - 创建传感器，所有者为当前主体
//! - GET /sensors/{id} - 获取传感器详情
//! - PUT /sensors/{id} - 部分更新传感器（所有者不可修改）
//! - DELETE /sensors/{id} - 删除传感器
//!
//! 所有接口需要 Bearer token；归属判定在 `iot-access` 中完成。

use crate::AppState;
use crate::middleware::require_principal;
use crate::utils::response::{access_error, ok};
use crate::utils::sensor_to_dto;
use api_contract::{
    CreateSensorRequest, MessageDto, PageQuery, SensorDto, SensorsDto, UpdateSensorRequest,
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use iot_access::{SensorDraft, SensorPatch, page_request};

#[derive(serde::Deserialize)]
pub struct SensorPath {
    sensor_id: i64,
}

/// 列出传感器，`count` 为忽略分页窗口后的总数
pub async fn list_sensors(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    let page = match page_request(query.skip, query.limit) {
        Ok(page) => page,
        Err(err) => return access_error(err),
    };
    match state.sensors.list(&principal, page).await {
        Ok(paged) => {
            let data: Vec<SensorDto> = paged.items.into_iter().map(sensor_to_dto).collect();
            ok(SensorsDto {
                data,
                count: paged.total,
            })
        }
        Err(err) => access_error(err),
    }
}

/// 创建传感器
pub async fn create_sensor(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateSensorRequest>,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    let draft = SensorDraft {
        name: req.name,
        measurement: req.measurement,
        location: req.location,
        description: req.description,
    };
    match state.sensors.create(&principal, draft).await {
        Ok(sensor) => ok(sensor_to_dto(sensor)),
        Err(err) => access_error(err),
    }
}

/// 获取传感器详情
pub async fn get_sensor(
    State(state): State<AppState>,
    Path(path): Path<SensorPath>,
    headers: HeaderMap,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    match state.sensors.get(&principal, path.sensor_id).await {
        Ok(sensor) => ok(sensor_to_dto(sensor)),
        Err(err) => access_error(err),
    }
}

/// 更新传感器
pub async fn update_sensor(
    State(state): State<AppState>,
    Path(path): Path<SensorPath>,
    headers: HeaderMap,
    Json(req): Json<UpdateSensorRequest>,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    let patch = SensorPatch {
        name: req.name,
        measurement: req.measurement,
        location: req.location,
        description: req.description,
    };
    match state.sensors.update(&principal, path.sensor_id, patch).await {
        Ok(sensor) => ok(sensor_to_dto(sensor)),
        Err(err) => access_error(err),
    }
}

/// 删除传感器
pub async fn delete_sensor(
    State(state): State<AppState>,
    Path(path): Path<SensorPath>,
    headers: HeaderMap,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    match state.sensors.delete(&principal, path.sensor_id).await {
        Ok(()) => ok(MessageDto::new("Sensor deleted successfully")),
        Err(err) => access_error(err),
    }
}
