// ==========================================
// 商品目录批量导入系统 - 数据集校验器实现
// ==========================================
// 职责: 必填字段 / SEO 完整性 / 重复检测 / 关键词集中度
// 红线: 校验是总函数，永不失败；只有 Error 阻断应用
// ==========================================

use crate::config::ValidationConfig;
use crate::domain::product::ProductRow;
use crate::domain::types::Severity;
use crate::domain::validation::{ValidationIssue, ValidationResult, ValidationSummary};
use crate::importer::catalog_importer_trait::CatalogValidator as CatalogValidatorTrait;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

pub struct CatalogValidator {
    config: ValidationConfig,
}

impl CatalogValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }
}

impl Default for CatalogValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

impl CatalogValidatorTrait for CatalogValidator {
    /// 对整个数据集执行多规则校验
    ///
    /// 各规则独立读取同一份输入，问题按规则顺序写入同一列表，
    /// 保证输出确定性:
    /// 1. 必填字段（Error）
    /// 2. SEO 完整性（Warning / 统计）
    /// 3. 重复 handle（Error）
    /// 4. 重复标题（Warning，标题仅为内容质量问题）
    /// 5. 关键词过度集中（Warning，数据集级）
    fn validate(&self, rows: &[ProductRow]) -> ValidationResult {
        let mut issues = Vec::new();

        // === 规则 1: 必填字段 ===
        let missing_required_rows = self.check_required_fields(rows, &mut issues);

        // === 规则 2: SEO 完整性 ===
        let missing_seo_rows = self.check_seo_completeness(rows, &mut issues);

        // === 规则 3: 重复 handle（精确匹配，Error）===
        // handle 冲突会静默覆盖已有商品，必须阻断
        let duplicate_handles = self.check_duplicate_handles(rows, &mut issues);

        // === 规则 4: 重复标题（忽略大小写，Warning）===
        let duplicate_titles = self.check_duplicate_titles(rows, &mut issues);

        // === 规则 5: 关键词过度集中（Warning）===
        let keyword_conflicts = self.check_keyword_conflicts(rows, &mut issues);

        // === 汇总 ===
        let errors = issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count();
        let warnings = issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count();
        let infos = issues
            .iter()
            .filter(|i| i.severity == Severity::Info)
            .count();

        ValidationResult {
            is_valid: errors == 0,
            total_rows: rows.len(),
            valid_rows: rows.len() - missing_required_rows.len(),
            issues,
            duplicate_handles,
            duplicate_titles,
            keyword_conflicts,
            summary: ValidationSummary {
                errors,
                warnings,
                infos,
                missing_seo_rows,
            },
        }
    }
}

impl CatalogValidator {
    /// 规则 1: handle/title/description 必须非空
    ///
    /// 每个违规行产生一条 Error，消息内列出该行全部缺失字段。
    /// 返回违规行号集合（用于 valid_rows 统计）。
    fn check_required_fields(
        &self,
        rows: &[ProductRow],
        issues: &mut Vec<ValidationIssue>,
    ) -> HashSet<usize> {
        let mut violation_rows = HashSet::new();

        for row in rows {
            let mut missing = Vec::new();
            if row.handle.is_empty() {
                missing.push("handle");
            }
            if row.title.is_empty() {
                missing.push("title");
            }
            if row.description.is_empty() {
                missing.push("description");
            }

            if !missing.is_empty() {
                violation_rows.insert(row.row_number);
                issues.push(ValidationIssue {
                    row: row.row_number,
                    field: missing.join(","),
                    message: format!("必填字段缺失: {}", missing.join(", ")),
                    severity: Severity::Error,
                });
            }
        }

        violation_rows
    }

    /// 规则 2: SEO 完整性
    ///
    /// - 缺失 tags 仅计入统计，不产生问题记录
    /// - 非空描述短于阈值产生 Warning（空描述已由规则 1 报 Error）
    fn check_seo_completeness(
        &self,
        rows: &[ProductRow],
        issues: &mut Vec<ValidationIssue>,
    ) -> usize {
        let mut missing_seo_rows = 0;

        for row in rows {
            if row.tags.is_none() {
                missing_seo_rows += 1;
            }

            let chars = row.description.chars().count();
            if chars > 0 && chars < self.config.min_description_chars {
                issues.push(ValidationIssue {
                    row: row.row_number,
                    field: "description".to_string(),
                    message: format!(
                        "描述过短（{} 字符，建议至少 {} 字符）",
                        chars, self.config.min_description_chars
                    ),
                    severity: Severity::Warning,
                });
            }
        }

        missing_seo_rows
    }

    /// 规则 3: 重复 handle（精确字符串分组）
    ///
    /// 每个重复组产生一条 Error，行号取首次出现行，
    /// 消息列出组内全部行号。空 handle 不参与分组（规则 1 已报错）。
    fn check_duplicate_handles(
        &self,
        rows: &[ProductRow],
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<ValidationIssue> {
        let groups = group_row_numbers(rows, |row| {
            if row.handle.is_empty() {
                None
            } else {
                Some(row.handle.clone())
            }
        });

        let mut subset = Vec::new();
        for (handle, row_numbers) in groups {
            if row_numbers.len() < 2 {
                continue;
            }
            let issue = ValidationIssue {
                row: row_numbers[0],
                field: "handle".to_string(),
                message: format!(
                    "重复 handle \"{}\"（行 {}），后写入的行会覆盖先写入的商品",
                    handle,
                    join_numbers(&row_numbers)
                ),
                severity: Severity::Error,
            };
            issues.push(issue.clone());
            subset.push(issue);
        }
        subset
    }

    /// 规则 4: 重复标题（忽略大小写 + 去首尾空白分组）
    ///
    /// 标题不是结构主键，重复仅是内容质量问题，降为 Warning。
    fn check_duplicate_titles(
        &self,
        rows: &[ProductRow],
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<ValidationIssue> {
        let groups = group_row_numbers(rows, |row| {
            let key = row.title.trim().to_lowercase();
            if key.is_empty() {
                None
            } else {
                Some(key)
            }
        });

        let mut subset = Vec::new();
        for (title, row_numbers) in groups {
            if row_numbers.len() < 2 {
                continue;
            }
            let issue = ValidationIssue {
                row: row_numbers[0],
                field: "title".to_string(),
                message: format!(
                    "重复标题 \"{}\"（行 {}）",
                    title,
                    join_numbers(&row_numbers)
                ),
                severity: Severity::Warning,
            };
            issues.push(issue.clone());
            subset.push(issue);
        }
        subset
    }

    /// 规则 5: 关键词过度集中
    ///
    /// tags 按逗号拆分、去空白、小写、行内去重后，
    /// 统计关键词 → 商品列表（标题为空时回退为 "行 N"）。
    /// 严格超过阈值的关键词产生一条数据集级 Warning（row = 0）。
    fn check_keyword_conflicts(
        &self,
        rows: &[ProductRow],
        issues: &mut Vec<ValidationIssue>,
    ) -> Vec<ValidationIssue> {
        // 关键词 → 商品标签列表（首次出现顺序）
        let mut order: Vec<String> = Vec::new();
        let mut products: HashMap<String, Vec<String>> = HashMap::new();

        for row in rows {
            let Some(tags) = &row.tags else { continue };

            let label = if row.title.is_empty() {
                format!("行 {}", row.row_number)
            } else {
                row.title.clone()
            };

            // 行内去重: 同一行重复写的关键词只算一次
            let mut seen_in_row = HashSet::new();
            for raw_keyword in tags.split(',') {
                let keyword = raw_keyword.trim().to_lowercase();
                if keyword.is_empty() || !seen_in_row.insert(keyword.clone()) {
                    continue;
                }

                match products.entry(keyword) {
                    Entry::Occupied(mut e) => e.get_mut().push(label.clone()),
                    Entry::Vacant(e) => {
                        order.push(e.key().clone());
                        e.insert(vec![label.clone()]);
                    }
                }
            }
        }

        let mut subset = Vec::new();
        for keyword in order {
            let Some(product_list) = products.get(&keyword) else {
                continue;
            };
            if product_list.len() <= self.config.keyword_conflict_threshold {
                continue;
            }
            let issue = ValidationIssue {
                row: 0, // 数据集级问题
                field: "tags".to_string(),
                message: format!(
                    "关键词 \"{}\" 被 {} 个商品共用（{}），存在站内排名蚕食风险",
                    keyword,
                    product_list.len(),
                    product_list.join(", ")
                ),
                severity: Severity::Warning,
            };
            issues.push(issue.clone());
            subset.push(issue);
        }
        subset
    }
}

// ==========================================
// 分组辅助函数
// ==========================================

/// 按 key 函数对行分组，返回 (key, 行号列表)，
/// 组按 key 首次出现顺序排列（输出确定性）
fn group_row_numbers<F>(rows: &[ProductRow], key_fn: F) -> Vec<(String, Vec<usize>)>
where
    F: Fn(&ProductRow) -> Option<String>,
{
    let mut order: Vec<String> = Vec::new();
    let mut map: HashMap<String, Vec<usize>> = HashMap::new();

    for row in rows {
        let Some(key) = key_fn(row) else { continue };
        match map.entry(key) {
            Entry::Occupied(mut e) => e.get_mut().push(row.row_number),
            Entry::Vacant(e) => {
                order.push(e.key().clone());
                e.insert(vec![row.row_number]);
            }
        }
    }

    order
        .into_iter()
        .map(|key| {
            let numbers = map.remove(&key).unwrap_or_default();
            (key, numbers)
        })
        .collect()
}

/// 行号列表 → "2, 4" 形式文本
fn join_numbers(numbers: &[usize]) -> String {
    numbers
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
