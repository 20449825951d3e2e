//! 认证相关 handlers
//!
//! ## 公开端点（无需认证）
//! - `GET /health` - 健康检查，返回 `{"ok": true}`
//! - `POST /login` - 用户名密码登录，返回 access/refresh token
//! - `POST /refresh-token` - 使用 refresh token 换取新 token 对（旧 refresh token 失效）
//!
//! `expires` 为 access token 过期时间（Unix 毫秒时间戳）。

use crate::AppState;
use crate::utils::response::{auth_error, internal_auth_error, ok};
use api_contract::{LoginRequest, LoginResponse, RefreshTokenRequest, RefreshTokenResponse};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use iot_auth::AuthError;
use tracing::info;

/// 健康检查端点，只反映进程存活。
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "ok": true }))
}

/// 登录接口
///
/// # Errors
///
/// - `401 UNAUTHORIZED`: 用户名或密码错误、账号已停用
/// - `500 INTERNAL SERVER ERROR`: 认证服务内部错误
pub async fn login(State(state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    match state.auth.login(&req.username, &req.password).await {
        Ok((user, tokens)) => {
            info!(user_id = user.user_id, "login succeeded");
            ok(LoginResponse {
                access_token: tokens.access_token,
                refresh_token: tokens.refresh_token,
                // 秒级转毫秒级
                expires: tokens.expires_at.saturating_mul(1000),
                user_id: user.user_id,
                username: user.username,
                is_superuser: user.is_superuser,
            })
        }
        Err(err @ (AuthError::InvalidCredentials | AuthError::InactiveUser)) => {
            auth_error(err.to_string())
        }
        Err(err) => internal_auth_error(err),
    }
}

/// 刷新 access token（refresh token rotation）。
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(req): Json<RefreshTokenRequest>,
) -> Response {
    match state.auth.refresh(&req.refresh_token).await {
        Ok(tokens) => ok(RefreshTokenResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            expires: tokens.expires_at.saturating_mul(1000),
        }),
        Err(err @ (AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::InactiveUser)) => {
            auth_error(err.to_string())
        }
        Err(err) => internal_auth_error(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::test_support::{read_json, test_state};
    use axum::http::StatusCode;

    fn credentials(username: &str, password: &str) -> Json<LoginRequest> {
        Json(LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    #[tokio::test]
    async fn login_returns_tokens() {
        let state = test_state();
        let response = login(State(state), credentials("admin", "admin123")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["userId"], 1);
        assert_eq!(body["data"]["isSuperuser"], true);
        assert!(body["data"]["accessToken"].as_str().is_some());
    }

    #[tokio::test]
    async fn login_rejects_wrong_password() {
        let state = test_state();
        let response = login(State(state), credentials("alice", "nope")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "AUTH.UNAUTHORIZED");
    }

    #[tokio::test]
    async fn refresh_rotates_and_rejects_replay() {
        let state = test_state();
        let (_, tokens) = state.auth.login("alice", "alice-pw").await.expect("login");
        let request = || {
            Json(RefreshTokenRequest {
                refresh_token: tokens.refresh_token.clone(),
            })
        };

        let response = refresh_token(State(state.clone()), request()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let replay = refresh_token(State(state), request()).await;
        assert_eq!(replay.status(), StatusCode::UNAUTHORIZED);
    }
}
