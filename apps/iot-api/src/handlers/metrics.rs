//! 访问计数快照。
//!
//! - GET /metrics（仅超级用户）

use api_contract::MetricsSnapshotDto;
use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
};
use iot_telemetry::metrics;

use crate::AppState;
use crate::middleware::{require_principal, require_superuser};
use crate::utils::response::ok;

pub async fn get_metrics(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let principal = match require_principal(&state, &headers).await {
        Ok(principal) => principal,
        Err(response) => return response,
    };
    if let Err(response) = require_superuser(&principal) {
        return response;
    }

    let snapshot = metrics().snapshot();
    ok(MetricsSnapshotDto {
        sensors_created: snapshot.sensors_created,
        sensors_updated: snapshot.sensors_updated,
        sensors_deleted: snapshot.sensors_deleted,
        readings_appended: snapshot.readings_appended,
        not_found: snapshot.not_found,
        forbidden: snapshot.forbidden,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{bearer, read_json, test_state};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn metrics_is_superuser_only() {
        let state = test_state();

        let headers = bearer(&state, "alice").await;
        let response = get_metrics(State(state.clone()), headers).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let headers = bearer(&state, "admin").await;
        let response = get_metrics(State(state), headers).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert!(body["data"]["sensorsCreated"].is_u64());
    }

    #[tokio::test]
    async fn metrics_requires_token() {
        let response = get_metrics(State(test_state()), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
