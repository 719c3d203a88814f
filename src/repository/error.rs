// ==========================================
// 商品目录批量导入系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 超时与其他失败同等处理（快照视为缺失或遗留，
//       由调用方透出），本层不做重试
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 快照相关错误 =====
    #[error("快照创建失败: {0}")]
    SnapshotFailure(String),

    // ===== 目录写入错误 =====
    #[error("目录写入失败: {0}")]
    WriteFailure(String),

    // ===== 外部服务错误 =====
    #[error("外部服务超时: {0}")]
    Timeout(String),

    #[error("外部服务不可用: {0}")]
    ConnectionError(String),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
