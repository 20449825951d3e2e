//! 认证中间件
//!
//! - request_context：注入 request_id/trace_id，并回写到响应头
//! - bearer_token：从 Authorization 头提取 Bearer token
//! - require_principal：校验 token 并按当前用户状态得到 Principal
//! - require_superuser：仅允许超级用户

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, header},
    middleware::Next,
    response::Response,
};
use domain::Principal;
use iot_auth::AuthError;
use iot_telemetry::new_request_ids;
use tracing::{Instrument, info_span};

use crate::AppState;
use crate::utils::response::{auth_error, forbidden_error, internal_auth_error};

/// 请求上下文中间件：注入 request_id/trace_id
pub async fn request_context(mut req: Request<Body>, next: Next) -> Response {
    let ids = new_request_ids();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    req.extensions_mut().insert(ids.clone());

    let span = info_span!(
        "request",
        request_id = %ids.request_id,
        trace_id = %ids.trace_id,
        method = %method,
        path = %path
    );

    let mut response = next.run(req).instrument(span).await;
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&ids.request_id) {
        headers.insert("x-request-id", value);
    }
    if let Ok(value) = HeaderValue::from_str(&ids.trace_id) {
        headers.insert("x-trace-id", value);
    }
    response
}

/// 从请求头中提取 Bearer token
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header_value = headers.get(header::AUTHORIZATION)?;
    let auth_str = header_value.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// 验证 token 并得到当前主体。缺失、无效、过期或账号停用均为 401。
pub async fn require_principal(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Principal, Response> {
    let Some(token) = bearer_token(headers) else {
        return Err(auth_error("missing bearer token"));
    };
    match state.auth.authenticate(token).await {
        Ok(principal) => Ok(principal),
        Err(err @ (AuthError::TokenInvalid | AuthError::TokenExpired | AuthError::InactiveUser)) => {
            Err(auth_error(err.to_string()))
        }
        Err(err) => Err(internal_auth_error(err)),
    }
}

/// 仅超级用户可通过。
pub fn require_superuser(principal: &Principal) -> Result<(), Response> {
    if principal.is_superuser {
        Ok(())
    } else {
        Err(forbidden_error())
    }
}
