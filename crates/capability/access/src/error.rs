use iot_storage::StorageError;

/// 访问层错误。
///
/// `NotFound` 与 `Forbidden` 是预期内的业务结果，`Storage` 是基础设施故障，
/// 原样向上传递，不做恢复。
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("not enough permissions")]
    Forbidden,
    #[error("{0}")]
    Validation(String),
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl AccessError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
