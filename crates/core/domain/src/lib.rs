pub mod ownership;

pub use ownership::{Decision, Operation, authorize};

/// 请求主体：所有访问操作共享的身份上下文。
///
/// 由认证能力从 access token 解析得到，核心层只把它当作普通数据消费。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: i64,
    pub is_superuser: bool,
}

impl Principal {
    /// 构造显式身份的请求主体。
    pub fn new(user_id: i64, is_superuser: bool) -> Self {
        Self {
            user_id,
            is_superuser,
        }
    }

    /// 普通用户主体。
    pub fn user(user_id: i64) -> Self {
        Self::new(user_id, false)
    }

    /// 超级管理员主体。
    pub fn superuser(user_id: i64) -> Self {
        Self::new(user_id, true)
    }
}
