//! 归属判定策略。
//!
//! 纯函数，无 I/O：传感器直接使用自身的 `owner_id`，
//! 读数使用其所属传感器的 `owner_id`，两者走同一条规则。

use crate::Principal;

/// 操作类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// 判定结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny,
}

impl Decision {
    pub fn is_allowed(self) -> bool {
        matches!(self, Decision::Allow)
    }
}

/// 判定主体能否对归属于 `owner_id` 的资源执行 `operation`。
///
/// 超级管理员或资源所有者放行，其余一律拒绝；读写两类操作规则相同。
pub fn authorize(principal: &Principal, owner_id: i64, _operation: Operation) -> Decision {
    if principal.is_superuser || principal.user_id == owner_id {
        Decision::Allow
    } else {
        Decision::Deny
    }
}
