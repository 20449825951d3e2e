//! 输入验证辅助函数
//!
//! - normalize_required：必填字段，去除首尾空格后非空
//! - normalize_optional：可选字段，如提供则按必填规则校验
//! - ensure_max_len：长度上限
//! - ensure_finite：数值读数必须是有限数

use crate::AccessError;

/// 文本字段长度上限（字符数）。
pub const MAX_TEXT_LEN: usize = 255;

/// 验证必填字段，去除空格并检查非空
pub fn normalize_required(value: String, field: &str) -> Result<String, AccessError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AccessError::validation(format!("{field} required")));
    }
    ensure_max_len(trimmed, field)?;
    Ok(trimmed.to_string())
}

/// 验证可选字段，如果提供则去除空格并检查非空
pub fn normalize_optional(value: Option<String>, field: &str) -> Result<Option<String>, AccessError> {
    value.map(|value| normalize_required(value, field)).transpose()
}

/// 自由文本：只去除首尾空格并限制长度，允许为空
pub fn normalize_text(value: String, field: &str) -> Result<String, AccessError> {
    let trimmed = value.trim();
    ensure_max_len(trimmed, field)?;
    Ok(trimmed.to_string())
}

pub fn ensure_max_len(value: &str, field: &str) -> Result<(), AccessError> {
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(AccessError::validation(format!(
            "{field} must be at most {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

pub fn ensure_finite(value: f64, field: &str) -> Result<f64, AccessError> {
    if !value.is_finite() {
        return Err(AccessError::validation(format!("{field} must be a finite number")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(normalize_required("  t1 ".to_string(), "name").expect("ok"), "t1");
        let err = normalize_required("   ".to_string(), "name").expect_err("blank");
        assert_eq!(err.to_string(), "name required");
    }

    #[test]
    fn optional_passes_none() {
        assert!(normalize_optional(None, "name").expect("ok").is_none());
        assert!(normalize_optional(Some(" ".to_string()), "name").is_err());
    }

    #[test]
    fn text_may_be_empty_but_bounded() {
        assert_eq!(normalize_text(" ".to_string(), "location").expect("ok"), "");
        assert!(normalize_text("x".repeat(MAX_TEXT_LEN + 1), "location").is_err());
    }

    #[test]
    fn finite_only() {
        assert!(ensure_finite(1.5, "value").is_ok());
        assert!(ensure_finite(f64::NAN, "value").is_err());
        assert!(ensure_finite(f64::INFINITY, "value").is_err());
    }
}
