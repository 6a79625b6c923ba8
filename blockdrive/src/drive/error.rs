use crate::ledger::LedgerError;

/// Defines errors that can occur during drive operations.
//
// // 定义在网盘操作期间可能发生的错误。
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// No directory record exists under the key.
    //
    // // 该键下不存在目录记录。
    #[error("Directory '{0}' doesn't exist.")]
    NotFound(String),

    /// The actor has no user profile yet.
    //
    // // 该用户尚未初始化个人资料。
    #[error("User profile for '{0}' doesn't exist.")]
    ProfileNotFound(String),

    /// The actor lacks the role the operation requires.
    //
    // // 操作者缺少该操作所需的角色。
    #[error("illegal access")]
    Unauthorized,

    /// Self-subscription to a private directory by an outsider.
    //
    // // 非成员尝试订阅私有目录。
    #[error("Can't access private directory '{0}'.")]
    PrivateDirectory(String),

    /// A sibling directory already uses the name.
    //
    // // 同级目录名称冲突。
    #[error("Directory name conflict: {0}")]
    Conflict(String),

    /// A directory was reached again while walking down from itself.
    //
    // // 遍历子树时发现环。
    #[error("Cycle detected at directory '{0}'.")]
    CycleDetected(String),

    /// The ledger failed to read or write.
    //
    // // 账本读写失败。
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A record could not be encoded or decoded.
    //
    // // 记录编码或解码失败。
    #[error("Failed to encode or decode record: {0}")]
    Serialization(#[from] serde_json::Error),
}
