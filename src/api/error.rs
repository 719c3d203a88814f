// ==========================================
// 商品目录批量导入系统 - API层错误类型
// ==========================================
// 职责: 将各层错误转换为面向用户的错误消息
// 说明: 写入失败必须携带快照 ID（可解释性，供人工回滚）
// ==========================================

use crate::engine::ApplyError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 会话错误
    // ==========================================
    #[error("无导入会话: {0}")]
    NoActiveSession(String),

    // ==========================================
    // 导入错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportFailed(String),

    #[error("导出失败: {0}")]
    ExportFailed(String),

    // ==========================================
    // 应用错误
    // ==========================================
    #[error("应用被拒绝: {0}")]
    ApplyRejected(String),

    #[error("快照创建失败: {0}")]
    SnapshotError(String),

    #[error("目录写入失败（快照 {snapshot_id} 可用于人工回滚）: {message}")]
    WriteError {
        snapshot_id: String,
        message: String,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed(err.to_string())
    }
}

// ==========================================
// 从 ApplyError 转换
// 目的: 保留快照 ID 等可解释性信息
// ==========================================
impl From<ApplyError> for ApiError {
    fn from(err: ApplyError) -> Self {
        match err {
            ApplyError::ValidationGateRejected { error_count } => {
                ApiError::ApplyRejected(format!("存在 {} 个 Error 级校验问题", error_count))
            }
            ApplyError::SessionAlreadyApplied | ApplyError::ApplyInProgress => {
                ApiError::ApplyRejected(err.to_string())
            }
            ApplyError::SnapshotFailed(msg) => ApiError::SnapshotError(msg),
            ApplyError::WriteFailed {
                snapshot_id,
                message,
            } => ApiError::WriteError {
                snapshot_id,
                message,
            },
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
