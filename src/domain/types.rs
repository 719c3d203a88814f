// ==========================================
// 商品目录批量导入系统 - 共享枚举类型
// ==========================================
// 职责: 定义严重级别/文件格式/应用状态等基础枚举
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Severity - 校验问题严重级别
// ==========================================
// 红线: 只有 Error 阻断应用，Warning/Info 仅提示
// 该门控规则是固定业务规则，不允许配置化
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,   // 错误（阻断应用）
    Warning, // 警告（允许应用）
    Info,    // 提示（仅记录）
}

impl Severity {
    /// 是否阻断应用门控
    pub fn blocks_apply(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

// ==========================================
// FileFormat - 支持的文件格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Csv,  // 逗号分隔文本（RFC 4180 引号转义）
    Xlsx, // Excel 工作簿（仅首工作表）
}

impl FileFormat {
    /// 根据文件扩展名判定格式（小写比较）
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    /// 格式对应的标准扩展名
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }
}

// ==========================================
// ApplyState - 应用状态机
// ==========================================
// 状态流转: Idle → Applying → Applied | Failed
// Applied 为会话终态；Failed 允许用户显式重试
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyState {
    Idle,     // 尚未应用
    Applying, // 应用中（快照/写入进行中，不可中断）
    Applied,  // 应用成功（终态）
    Failed,   // 应用失败（快照或写入失败）
}
