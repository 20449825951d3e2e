//! 路由定义
//!
//! 所有端点同时挂载在 `/` 与 `/api` 下：
//! - 健康检查：/health
//! - 认证接口：/login, /refresh-token
//! - 传感器：/sensors, /sensors/:sensor_id
//! - 读数：/readings/:sensor_id
//! - 访问计数：/metrics（仅超级用户）

use crate::AppState;
use crate::handlers::*;
use crate::middleware::request_context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// 创建 API 路由（未绑定状态）。
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/login", post(login))
        .route("/refresh-token", post(refresh_token))
        .route("/sensors", get(list_sensors).post(create_sensor))
        .route(
            "/sensors/:sensor_id",
            get(get_sensor).put(update_sensor).delete(delete_sensor),
        )
        .route(
            "/readings/:sensor_id",
            get(list_readings).post(create_reading),
        )
        .route("/metrics", get(get_metrics))
}

/// 组装完整应用：双前缀路由、请求追踪 ID 与 HTTP trace 日志。
pub fn create_app(state: AppState) -> Router {
    let api = create_api_router();
    Router::new()
        .merge(api.clone())
        .nest("/api", api)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_context))
}

#[cfg(test)]
mod tests {
    use super::create_app;
    use crate::handlers::test_support::{read_json, test_state};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_is_served_under_both_prefixes() {
        for uri in ["/health", "/api/health"] {
            let app = create_app(test_state());
            let response = app
                .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(response.headers().contains_key("x-request-id"));
            assert!(response.headers().contains_key("x-trace-id"));
            let body = read_json(response).await;
            assert_eq!(body["ok"], true);
        }
    }

    #[tokio::test]
    async fn sensors_without_token_are_unauthorized() {
        let app = create_app(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/sensors")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn login_over_http() {
        let app = create_app(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"username":"admin","password":"admin123"}"#))
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["username"], "admin");
    }
}
