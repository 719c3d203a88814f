// ==========================================
// 商品目录批量导入系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 规范化 → 校验 → (门控)应用 / 导出
// ==========================================

use crate::domain::product::{ProductRow, RawTable};
use crate::domain::session::ImportSession;
use crate::domain::types::FileFormat;
use crate::domain::validation::ValidationResult;
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 将原始字节流解析为 RawTable
    ///
    /// # 参数
    /// - bytes: 文件原始字节
    ///
    /// # 返回
    /// - Ok(RawTable): 表头 + 数据行（两种格式产出完全一致的结构）
    /// - Err: 字节流结构不可读，或无任何有效内容
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// RowNormalizer Trait
// ==========================================
// 用途: 行规范化接口（阶段 1）
// 实现者: RowNormalizerImpl
pub trait RowNormalizer: Send + Sync {
    /// 将 RawTable 映射为规范化商品行
    ///
    /// # 参数
    /// - table: 原始表格
    ///
    /// # 返回
    /// - Vec<ProductRow>: 规范化结果（总函数，永不失败；
    ///   无法解析的字段置为空字符串/None）
    fn normalize(&self, table: &RawTable) -> Vec<ProductRow>;
}

// ==========================================
// CatalogValidator Trait
// ==========================================
// 用途: 数据集校验接口（阶段 2）
// 实现者: CatalogValidatorImpl
pub trait CatalogValidator: Send + Sync {
    /// 对整个数据集执行多规则校验
    ///
    /// # 参数
    /// - rows: 全部规范化商品行
    ///
    /// # 返回
    /// - ValidationResult: 完整校验结果（总函数，永不失败；
    ///   即使 is_valid = false 也返回全部问题明细）
    fn validate(&self, rows: &[ProductRow]) -> ValidationResult;
}

// ==========================================
// CatalogExporter Trait
// ==========================================
// 用途: 导出序列化接口（解析的结构逆操作）
// 实现者: CatalogExporterImpl
pub trait CatalogExporter: Send + Sync {
    /// 将规范化商品行序列化为目标格式字节流
    ///
    /// # 参数
    /// - rows: 商品行（不要求通过校验，导出与校验结果无关）
    /// - format: 目标格式
    ///
    /// # 返回
    /// - Ok(Vec<u8>): 序列化字节流（固定 8 列结构）
    /// - Err: 序列化失败
    fn serialize(&self, rows: &[ProductRow], format: FileFormat) -> ImportResult<Vec<u8>>;
}

// ==========================================
// CatalogImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: CatalogImporterImpl
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// 从文件导入商品数据
    ///
    /// # 参数
    /// - file_path: 数据文件路径（.csv / .xlsx，按扩展名判定格式）
    ///
    /// # 返回
    /// - Ok(ImportSession): 新导入会话（含规范化行与校验结果）
    /// - Err: 文件读取/解析错误
    ///
    /// # 导入流程（3 个阶段）
    /// 1. 文件读取与解析（阻塞线程池内执行）
    /// 2. 行规范化（表头别名映射）
    /// 3. 数据集校验（多规则，汇总统计）
    async fn import_from_path(&self, file_path: &Path) -> ImportResult<ImportSession>;

    /// 从内存字节流导入商品数据
    ///
    /// # 参数
    /// - bytes: 文件原始字节
    /// - format: 已判定的文件格式
    /// - file_name: 源文件名（用于会话审计展示，可缺省）
    async fn import_from_bytes(
        &self,
        bytes: Vec<u8>,
        format: FileFormat,
        file_name: Option<String>,
    ) -> ImportResult<ImportSession>;

    /// 导出商品行（与校验结果无关，失败数据也可导出修正）
    fn export_rows(&self, rows: &[ProductRow], format: FileFormat) -> ImportResult<Vec<u8>>;
}
