// ==========================================
// 商品目录批量导入系统 - 校验结果模型
// ==========================================
// 职责: 定义校验问题/汇总统计/校验结果
// 红线: is_valid ⇔ 不存在 Error 级问题
// ==========================================

use crate::domain::types::Severity;
use serde::{Deserialize, Serialize};

// ==========================================
// ValidationIssue - 校验问题记录
// ==========================================
// 用途: 校验器输出，前端审计展示的主要产物
// 说明: row = 0 表示数据集级问题（非单行问题）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub row: usize,         // 表格行号（0 = 数据集级）
    pub field: String,      // 涉及字段
    pub message: String,    // 问题描述
    pub severity: Severity, // 严重级别
}

// ==========================================
// ValidationSummary - 校验汇总统计
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub errors: usize,           // Error 级问题数
    pub warnings: usize,         // Warning 级问题数
    pub infos: usize,            // Info 级问题数
    pub missing_seo_rows: usize, // 缺失 tags 的行数（SEO 完整性，不产生问题记录）
}

// ==========================================
// ValidationResult - 数据集校验结果
// ==========================================
// 用途: 一次校验产出一份完整结果，校验永不失败（总函数）
// 不变式:
// - valid_rows = total_rows - 存在必填字段缺失问题的行数
// - is_valid ⇔ issues 中不存在 Error 级问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub total_rows: usize,
    pub valid_rows: usize,

    // 全量问题列表（按规则顺序，输出确定性）
    pub issues: Vec<ValidationIssue>,

    // 三类问题的派生子集（前端便捷展示，非独立状态）
    pub duplicate_handles: Vec<ValidationIssue>,
    pub duplicate_titles: Vec<ValidationIssue>,
    pub keyword_conflicts: Vec<ValidationIssue>,

    // 汇总统计
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// 空数据集的校验结果（0 行即通过）
    pub fn empty() -> Self {
        Self {
            is_valid: true,
            total_rows: 0,
            valid_rows: 0,
            issues: Vec::new(),
            duplicate_handles: Vec::new(),
            duplicate_titles: Vec::new(),
            keyword_conflicts: Vec::new(),
            summary: ValidationSummary::default(),
        }
    }

    /// Error 级问题数量
    pub fn error_count(&self) -> usize {
        self.summary.errors
    }
}
