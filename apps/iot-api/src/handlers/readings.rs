//! 读数 handlers
//!
//! - POST /readings/{sensor_id} - 为传感器追加读数
//! - GET /readings/{sensor_id}?skip=&limit= - 分页列出传感器读数
//!
//! 读数按所属传感器的归属判定访问权限。

use crate::AppState;
use crate::middleware::require_principal;
use crate::utils::reading_to_dto;
use crate::utils::response::{access_error, ok};
use api_contract::{CreateReadingRequest, PageQuery, ReadingDto, ReadingsDto};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
};
use iot_access::{ReadingDraft, page_request};

#[derive(serde::Deserialize)]
pub struct ReadingPath {
    sensor_id: i64,
}

/// 追加读数；请求体中的传感器 ID 一律以路径为准
pub async fn create_reading(
    State(state): State<AppState>,
    Path(path): Path<ReadingPath>,
    headers: HeaderMap,
    Json(req): Json<CreateReadingRequest>,
) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    let draft = ReadingDraft {
        value: req.value,
        ts_ms: req.ts_ms,
    };
    match state.readings.append(&principal, path.sensor_id, draft).await {
        Ok(reading) => ok(reading_to_dto(reading)),
        Err(err) => access_error(err),
    }
}

/// 分页列出读数
pub async fn list_readings(
    State(state): State<AppState>,
    Path(path): Path<ReadingPath>,
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
    match state.readings.list(&principal, path.sensor_id, page).await {
        Ok(paged) => {
            let data: Vec<ReadingDto> = paged.items.into_iter().map(reading_to_dto).collect();
            ok(ReadingsDto {
                data,
                count: paged.total,
            })
        }
        Err(err) => access_error(err),
    }
}
