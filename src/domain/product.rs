// ==========================================
// 商品目录批量导入系统 - 商品领域模型
// ==========================================
// 职责: 定义原始表格与规范化商品行
// 红线: ProductRow 规范化后不可变，引擎层只读
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// RawTable - 原始表格
// ==========================================
// 用途: 文件解析器输出，规范化器输入
// 生命周期: 仅在导入流程内，不持久化
// 说明: CSV 与 Excel 解析器必须产出完全一致的结构，
//       规范化器对文件格式无感知
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTable {
    // 表头（已小写、去首尾空白、去引号）
    pub headers: Vec<String>,

    // 数据行（表头 → 单元格文本，已去首尾空白）
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    /// 数据行数量
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

// ==========================================
// ProductRow - 规范化商品行
// ==========================================
// 用途: 导入管道的工作单元（规范化 → 校验 → 应用/导出）
// 主键: handle（商户侧唯一标识），行身份 = (row_number, handle)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    // ===== 必填字段（缺失时为空字符串，由校验器报错）=====
    pub handle: String,      // 商品唯一标识
    pub title: String,       // 商品标题
    pub description: String, // 商品描述

    // ===== 可选字段（空值统一为 None）=====
    pub tags: Option<String>,     // 关键词列表（逗号连接）
    pub image: Option<String>,    // 图片 URI
    pub category: Option<String>, // 商品分类
    pub price: Option<String>,    // 价格（保留原始文本）
    pub sku: Option<String>,      // SKU 编码

    // ===== 元信息 =====
    // 表格行号: 数据行 0 起始索引 + 2（表头占第 1 行），
    // 与用户在电子表格软件中看到的行号一致
    pub row_number: usize,
}
