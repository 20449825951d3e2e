//! 验证辅助函数
//!
//! 存储实现共用的参数校验：
//! - ensure_page：分页窗口非负
//! - page_window：把分页窗口换算为内存切片区间

use crate::error::StorageError;
use crate::models::Page;
use std::ops::Range;

/// 验证分页窗口非负
pub fn ensure_page(page: &Page) -> Result<(), StorageError> {
    if page.skip < 0 || page.limit < 0 {
        return Err(StorageError::new("page window must be non-negative"));
    }
    Ok(())
}

/// 计算 `len` 个元素中分页窗口覆盖的下标区间。
///
/// `skip` 超出末尾时返回空区间。
pub fn page_window(page: &Page, len: usize) -> Result<Range<usize>, StorageError> {
    ensure_page(page)?;
    let start = usize::try_from(page.skip).unwrap_or(usize::MAX).min(len);
    let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
    let end = start.saturating_add(limit).min(len);
    Ok(start..end)
}
