//! 认证能力：登录、JWT 生成与校验、token → Principal。

mod jwt;
mod password;

use async_trait::async_trait;
use domain::Principal;
use iot_storage::{UserRecord, UserStore};
use std::sync::Arc;

pub use jwt::JwtManager;
pub use password::{PasswordCheck, hash_password, verify_password_and_maybe_upgrade};

/// 认证相关错误。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("token expired")]
    TokenExpired,
    #[error("token invalid")]
    TokenInvalid,
    #[error("inactive user")]
    InactiveUser,
    #[error("internal error: {0}")]
    Internal(String),
}

/// 登录/刷新返回的 token 结构。
pub struct AuthTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_jti: String,
    pub expires_at: u64,
}

/// 认证服务实现（基于 UserStore + JWT）。
pub struct AuthService {
    user_store: Arc<dyn UserStore>,
    jwt: JwtManager,
}

impl AuthService {
    pub fn new(user_store: Arc<dyn UserStore>, jwt: JwtManager) -> Self {
        Self { user_store, jwt }
    }

    /// 登录校验并签发 token。停用账号不能登录。
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        let user = self
            .user_store
            .find_by_username(username)
            .await
            .map_err(internal)?
            .ok_or(AuthError::InvalidCredentials)?;
        let check = verify_password_and_maybe_upgrade(&user.password, password)?;
        if !check.verified {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }
        if let Some(password_hash) = check.upgrade_hash {
            let updated = self
                .user_store
                .update_password_hash(user.user_id, &password_hash)
                .await
                .map_err(internal)?;
            if !updated {
                return Err(AuthError::Internal("password migration update failed".to_string()));
            }
        }
        let tokens = self.bind_tokens(&user.to_principal()).await?;
        Ok((user, tokens))
    }

    /// 校验 access token，并按当前用户状态重建 Principal。
    ///
    /// token 中的超级用户标记只作参考，以存储中的用户记录为准。
    pub async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        let claimed = self.jwt.decode_access(token)?;
        let user = self.active_user(claimed.user_id).await?;
        Ok(user.to_principal())
    }

    /// 使用 refresh token 换取新 token，旧 refresh token 随即失效。
    pub async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        let (claimed, jti) = self.jwt.decode_refresh_with_jti(token)?;
        let user = self.active_user(claimed.user_id).await?;
        let stored = self
            .user_store
            .get_refresh_jti(user.user_id)
            .await
            .map_err(internal)?;
        if stored.as_deref() != Some(jti.as_str()) {
            return Err(AuthError::TokenInvalid);
        }
        self.bind_tokens(&user.to_principal()).await
    }

    async fn active_user(&self, user_id: i64) -> Result<UserRecord, AuthError> {
        let user = self
            .user_store
            .find_by_id(user_id)
            .await
            .map_err(internal)?
            .ok_or(AuthError::TokenInvalid)?;
        if !user.is_active {
            return Err(AuthError::InactiveUser);
        }
        Ok(user)
    }

    async fn bind_tokens(&self, principal: &Principal) -> Result<AuthTokens, AuthError> {
        let tokens = self.jwt.issue_tokens(principal)?;
        let updated = self
            .user_store
            .set_refresh_jti(principal.user_id, Some(&tokens.refresh_jti))
            .await
            .map_err(internal)?;
        if !updated {
            return Err(AuthError::Internal("refresh token binding update failed".to_string()));
        }
        Ok(tokens)
    }
}

fn internal(err: iot_storage::StorageError) -> AuthError {
    AuthError::Internal(err.to_string())
}

/// 认证能力 trait，便于替换实现与测试。
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError>;
    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError>;
    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError>;
}

#[async_trait]
impl Authenticator for AuthService {
    async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<(UserRecord, AuthTokens), AuthError> {
        AuthService::login(self, username, password).await
    }

    async fn authenticate(&self, token: &str) -> Result<Principal, AuthError> {
        AuthService::authenticate(self, token).await
    }

    async fn refresh(&self, token: &str) -> Result<AuthTokens, AuthError> {
        AuthService::refresh(self, token).await
    }
}
