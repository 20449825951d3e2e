use crate::{AuthError, AuthTokens};
use domain::Principal;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// JWT 内部 claims。`sub` 为用户 ID 的十进制字符串。
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    is_superuser: bool,
    exp: usize,
    token_type: String,
    jti: Option<String>,
}

impl Claims {
    fn principal(&self) -> Result<Principal, AuthError> {
        let user_id = self.sub.parse::<i64>().map_err(|_| AuthError::TokenInvalid)?;
        Ok(Principal::new(user_id, self.is_superuser))
    }
}

/// JWT 生成与校验（HS256）。
pub struct JwtManager {
    secret: Vec<u8>,
    access_ttl_seconds: u64,
    refresh_ttl_seconds: u64,
}

impl JwtManager {
    pub fn new(secret: String, access_ttl_seconds: u64, refresh_ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into_bytes(),
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    /// 为主体签发 access/refresh token，refresh token 带新的 jti。
    pub fn issue_tokens(&self, principal: &Principal) -> Result<AuthTokens, AuthError> {
        let access_token =
            self.encode(principal, self.access_ttl_seconds, ACCESS_TOKEN_TYPE, None)?;
        let refresh_jti = Uuid::new_v4().to_string();
        let refresh_token = self.encode(
            principal,
            self.refresh_ttl_seconds,
            REFRESH_TOKEN_TYPE,
            Some(refresh_jti.clone()),
        )?;
        let expires_at = now_epoch_seconds() + self.access_ttl_seconds;
        Ok(AuthTokens {
            access_token,
            refresh_token,
            refresh_jti,
            expires_at,
        })
    }

    pub fn decode_access(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.decode_typed(token, ACCESS_TOKEN_TYPE)?;
        claims.principal()
    }

    pub fn decode_refresh(&self, token: &str) -> Result<Principal, AuthError> {
        let claims = self.decode_typed(token, REFRESH_TOKEN_TYPE)?;
        claims.principal()
    }

    pub fn decode_refresh_with_jti(&self, token: &str) -> Result<(Principal, String), AuthError> {
        let claims = self.decode_typed(token, REFRESH_TOKEN_TYPE)?;
        let principal = claims.principal()?;
        let jti = claims.jti.ok_or(AuthError::TokenInvalid)?;
        Ok((principal, jti))
    }

    fn encode(
        &self,
        principal: &Principal,
        ttl_seconds: u64,
        token_type: &str,
        jti: Option<String>,
    ) -> Result<String, AuthError> {
        let exp = (now_epoch_seconds() + ttl_seconds) as usize;
        let claims = Claims {
            sub: principal.user_id.to_string(),
            is_superuser: principal.is_superuser,
            exp,
            token_type: token_type.to_string(),
            jti,
        };
        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|err| AuthError::Internal(err.to_string()))
    }

    fn decode_typed(&self, token: &str, expected_type: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        let decoded = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(map_jwt_error)?;
        if decoded.claims.token_type != expected_type {
            return Err(AuthError::TokenInvalid);
        }
        Ok(decoded.claims)
    }
}

fn now_epoch_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// 将 jwt 库错误映射为业务错误。
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::TokenInvalid,
    }
}
