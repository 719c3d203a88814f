// ==========================================
// 商品目录批量导入系统 - 行规范化器实现
// ==========================================
// 职责: 原始行 → 规范化商品行（表头别名映射）
// 说明: 别名表让管道兼容不同来源系统的导出表头，
//       无需按来源单独配置
// ==========================================

use crate::domain::product::{ProductRow, RawTable};
use crate::importer::catalog_importer_trait::RowNormalizer as RowNormalizerTrait;
use std::collections::HashMap;

// ==========================================
// 字段别名表
// ==========================================
// (规范字段, 候选表头列表)，按序匹配，先到先得。
// 表头在解析阶段已统一小写，此处只写小写别名。
const FIELD_ALIASES: &[(&str, &[&str])] = &[
    ("handle", &["handle", "id", "product_handle"]),
    ("title", &["title", "name", "product_title"]),
    ("description", &["description", "body", "product_description"]),
    ("tags", &["tags", "keywords"]),
    ("image", &["image", "image_url", "images"]),
    ("category", &["category", "product_type", "type"]),
    ("price", &["price", "variant_price"]),
    ("sku", &["sku", "variant_sku"]),
];

pub struct RowNormalizer;

impl RowNormalizerTrait for RowNormalizer {
    /// 规范化整张表格（总函数，永不失败）
    ///
    /// 无法解析的字段: 必填字段置空字符串（交由校验器报错），
    /// 可选字段置 None
    fn normalize(&self, table: &RawTable) -> Vec<ProductRow> {
        // 按别名表对整张表解析一次列映射: 规范字段 → 实际表头
        let columns = self.resolve_columns(&table.headers);

        table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| {
                ProductRow {
                    handle: self.get_field(&columns, row, "handle"),
                    title: self.get_field(&columns, row, "title"),
                    description: self.get_field(&columns, row, "description"),
                    tags: self.get_optional(&columns, row, "tags"),
                    image: self.get_optional(&columns, row, "image"),
                    category: self.get_optional(&columns, row, "category"),
                    price: self.get_optional(&columns, row, "price"),
                    sku: self.get_optional(&columns, row, "sku"),
                    // 表格行号: 表头占第 1 行，数据从第 2 行开始
                    row_number: idx + 2,
                }
            })
            .collect()
    }
}

impl RowNormalizer {
    /// 解析列映射: 对每个规范字段，取第一个出现在表头中的别名
    fn resolve_columns(&self, headers: &[String]) -> HashMap<&'static str, String> {
        let mut columns = HashMap::new();
        for (field, aliases) in FIELD_ALIASES {
            for alias in *aliases {
                if headers.iter().any(|h| h == alias) {
                    columns.insert(*field, (*alias).to_string());
                    break;
                }
            }
        }
        columns
    }

    /// 提取必填字段（缺列/缺值 → 空字符串）
    fn get_field(
        &self,
        columns: &HashMap<&'static str, String>,
        row: &HashMap<String, String>,
        field: &str,
    ) -> String {
        columns
            .get(field)
            .and_then(|header| row.get(header))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }

    /// 提取可选字段（空值统一为 None）
    fn get_optional(
        &self,
        columns: &HashMap<&'static str, String>,
        row: &HashMap<String, String>,
        field: &str,
    ) -> Option<String> {
        let value = self.get_field(columns, row, field);
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    }
}
