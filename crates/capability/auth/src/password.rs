//! 口令校验：argon2 哈希优先，兼容历史明文口令并在登录时升级。

use crate::AuthError;
use argon2::{
    Argon2,
    PasswordHash,
    PasswordHasher,
    PasswordVerifier,
    password_hash::SaltString,
};
use rand_core::OsRng;
use subtle::ConstantTimeEq;

const ARGON2_PREFIX: &str = "$argon2";

/// 口令校验结果；`upgrade_hash` 非空时调用方应回写新哈希。
#[derive(Debug)]
pub struct PasswordCheck {
    pub verified: bool,
    pub upgrade_hash: Option<String>,
}

impl PasswordCheck {
    fn rejected() -> Self {
        Self {
            verified: false,
            upgrade_hash: None,
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Internal(err.to_string()))
}

pub fn verify_password_and_maybe_upgrade(
    stored: &str,
    password: &str,
) -> Result<PasswordCheck, AuthError> {
    if stored.starts_with(ARGON2_PREFIX) {
        let parsed =
            PasswordHash::new(stored).map_err(|err| AuthError::Internal(err.to_string()))?;
        let verified = Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok();
        return Ok(PasswordCheck {
            verified,
            upgrade_hash: None,
        });
    }

    // 明文比较必须常量时间
    let matches: bool = stored.as_bytes().ct_eq(password.as_bytes()).into();
    if !matches {
        return Ok(PasswordCheck::rejected());
    }
    Ok(PasswordCheck {
        verified: true,
        upgrade_hash: Some(hash_password(password)?),
    })
}
