// ==========================================
// 商品目录批量导入系统 - 导入会话模型
// ==========================================
// 职责: 绑定一次导入的规范化行与其校验结果
// 红线: 会话整体替换，不做合并；重新解析/校验即新会话
// ==========================================

use crate::domain::product::ProductRow;
use crate::domain::types::{ApplyState, FileFormat};
use crate::domain::validation::ValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// ImportSession - 导入会话
// ==========================================
// 用途: 应用编排器的工作对象。应用请求只对产生该
//       校验结果的会话有意义；换文件即换会话。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSession {
    pub session_id: String,            // 会话 ID（UUID）
    pub file_name: Option<String>,     // 源文件名（字节流导入时可缺省）
    pub format: FileFormat,            // 源文件格式
    pub rows: Vec<ProductRow>,         // 规范化商品行（会话内只读）
    pub validation: ValidationResult,  // 本会话的校验结果
    pub state: ApplyState,             // 应用状态机
    pub created_at: DateTime<Utc>,     // 会话创建时间
}

impl ImportSession {
    /// 创建新会话（初始状态 Idle）
    pub fn new(
        file_name: Option<String>,
        format: FileFormat,
        rows: Vec<ProductRow>,
        validation: ValidationResult,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            file_name,
            format,
            rows,
            validation,
            state: ApplyState::Idle,
            created_at: Utc::now(),
        }
    }
}

// ==========================================
// SnapshotContext - 快照上下文
// ==========================================
// 用途: 传递给外部快照协作方，标识本次应用的范围
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotContext {
    pub import_type: String,  // 导入类型标识
    pub product_count: usize, // 本次应用的商品数量
}

// ==========================================
// SnapshotHandle - 快照句柄
// ==========================================
// 用途: 外部协作方返回的回滚凭据；写入失败时必须
//       原样透出给用户，用于人工回滚
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHandle {
    pub snapshot_id: String,       // 快照 ID
    pub created_at: DateTime<Utc>, // 快照创建时间
}

// ==========================================
// ApplyReport - 应用成功报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    pub snapshot_id: String,               // 本次应用前创建的快照
    pub applied_rows: usize,               // 实际写入的商品行数
    pub elapsed_time: std::time::Duration, // 应用耗时
}
