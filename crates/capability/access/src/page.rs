//! 分页与计数。
//!
//! `total` 始终是忽略分页窗口后的全集数量，即使 `skip` 超出末尾、
//! 返回的页为空，客户端也能据此算出总页数。

use crate::AccessError;
use iot_storage::{Page, StorageError};
use std::future::Future;

/// 未指定 `limit` 时的默认页大小。
pub const DEFAULT_PAGE_LIMIT: i64 = 100;

/// 一页数据及其全集数量。
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// 由查询参数构造分页窗口：缺省 `skip = 0`、`limit = 100`，负数视为非法输入。
///
/// `limit` 不设上限，由调用方决定。
pub fn page_request(skip: Option<i64>, limit: Option<i64>) -> Result<Page, AccessError> {
    let skip = skip.unwrap_or(0);
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if skip < 0 {
        return Err(AccessError::validation("skip must be >= 0"));
    }
    if limit < 0 {
        return Err(AccessError::validation("limit must be >= 0"));
    }
    Ok(Page::new(skip, limit))
}

/// 先计数、再取页。
pub async fn collect_page<T, C, L>(count: C, list: L) -> Result<Paged<T>, AccessError>
where
    C: Future<Output = Result<i64, StorageError>>,
    L: Future<Output = Result<Vec<T>, StorageError>>,
{
    let total = count.await?;
    let items = list.await?;
    Ok(Paged { items, total })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        assert_eq!(page_request(None, None).expect("page"), Page::new(0, 100));
        assert_eq!(
            page_request(Some(5), Some(10)).expect("page"),
            Page::new(5, 10)
        );
    }

    #[test]
    fn page_allows_large_limit() {
        let page = page_request(None, Some(1_000_000)).expect("page");
        assert_eq!(page.limit, 1_000_000);
    }

    #[test]
    fn page_rejects_negative() {
        assert!(matches!(
            page_request(Some(-1), None),
            Err(AccessError::Validation(_))
        ));
        assert!(matches!(
            page_request(None, Some(-5)),
            Err(AccessError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn collect_page_keeps_total_for_empty_page() {
        let paged = collect_page(
            async { Ok::<_, StorageError>(5_i64) },
            async { Ok::<_, StorageError>(Vec::<i64>::new()) },
        )
        .await
        .expect("page");
        assert_eq!(paged.total, 5);
        assert!(paged.items.is_empty());
    }

    #[tokio::test]
    async fn collect_page_propagates_storage_error() {
        let err = collect_page(
            async { Err::<i64, _>(StorageError::new("db down")) },
            async { Ok::<_, StorageError>(vec![1_i64]) },
        )
        .await
        .expect_err("storage");
        assert!(matches!(err, AccessError::Storage(_)));
    }
}
