// ==========================================
// 商品目录批量导入系统 - 导入层
// ==========================================
// 职责: 外部文件数据 → 规范化商品行 → 校验结果
// 支持: CSV, Excel
// ==========================================

// 模块声明
pub mod catalog_exporter;
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod catalog_validator;
pub mod error;
pub mod file_parser;
pub mod row_normalizer;

// 重导出核心类型
pub use catalog_exporter::CatalogExporter as CatalogExporterImpl;
pub use catalog_importer_impl::CatalogImporterImpl;
pub use catalog_validator::CatalogValidator as CatalogValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use row_normalizer::RowNormalizer as RowNormalizerImpl;

// 重导出 Trait 接口
pub use catalog_importer_trait::{
    CatalogExporter, CatalogImporter, CatalogValidator, FileParser, RowNormalizer,
};
