// ==========================================
// 商品目录批量导入系统 - 导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到导入会话
// 流程: 解析 → 规范化 → 校验 → 构建会话
// 说明: 会话整体替换语义——每次导入产出全新会话，
//       旧会话及其在途结果由调用方丢弃
// ==========================================

use crate::config::ValidationConfig;
use crate::domain::session::ImportSession;
use crate::domain::types::FileFormat;
use crate::importer::catalog_exporter::CatalogExporter as CatalogExporterImpl;
use crate::importer::catalog_importer_trait::{
    CatalogExporter, CatalogImporter, CatalogValidator, RowNormalizer,
};
use crate::importer::catalog_validator::CatalogValidator as CatalogValidatorImpl;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::row_normalizer::RowNormalizer as RowNormalizerImpl;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

// ==========================================
// CatalogImporterImpl - 导入器实现
// ==========================================
pub struct CatalogImporterImpl {
    // 导入组件
    normalizer: Box<dyn RowNormalizer>,
    validator: Box<dyn CatalogValidator>,
    exporter: Box<dyn CatalogExporter>,
}

impl CatalogImporterImpl {
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - normalizer: 行规范化器
    /// - validator: 数据集校验器
    /// - exporter: 导出序列化器
    pub fn new(
        normalizer: Box<dyn RowNormalizer>,
        validator: Box<dyn CatalogValidator>,
        exporter: Box<dyn CatalogExporter>,
    ) -> Self {
        Self {
            normalizer,
            validator,
            exporter,
        }
    }

    /// 使用默认组件创建导入器
    pub fn with_defaults(config: ValidationConfig) -> Self {
        Self::new(
            Box::new(RowNormalizerImpl),
            Box::new(CatalogValidatorImpl::new(config)),
            Box::new(CatalogExporterImpl),
        )
    }
}

impl Default for CatalogImporterImpl {
    fn default() -> Self {
        Self::with_defaults(ValidationConfig::default())
    }
}

#[async_trait::async_trait]
impl CatalogImporter for CatalogImporterImpl {
    /// 从文件导入商品数据
    async fn import_from_path(&self, file_path: &Path) -> ImportResult<ImportSession> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 按扩展名判定格式
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let format =
            FileFormat::from_extension(&ext).ok_or(ImportError::UnsupportedFormat(ext))?;

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from);

        let bytes = tokio::fs::read(file_path).await?;
        self.import_from_bytes(bytes, format, file_name).await
    }

    /// 从内存字节流导入商品数据
    #[instrument(skip(self, bytes), fields(format = ?format))]
    async fn import_from_bytes(
        &self,
        bytes: Vec<u8>,
        format: FileFormat,
        file_name: Option<String>,
    ) -> ImportResult<ImportSession> {
        let start_time = Instant::now();
        info!(
            file_name = file_name.as_deref().unwrap_or("<bytes>"),
            size = bytes.len(),
            "开始导入商品数据"
        );

        // === 阶段 1: 文件解析 ===
        // 解析是唯一延迟敏感的阶段，放入阻塞线程池执行，
        // 调用方线程保持可响应
        debug!("阶段 1: 文件解析");
        let table = tokio::task::spawn_blocking(move || {
            UniversalFileParser.parse_bytes(&bytes, format)
        })
        .await
        .map_err(|e| ImportError::InternalError(format!("解析任务中断: {}", e)))??;

        info!(
            total_rows = table.rows.len(),
            headers = table.headers.len(),
            "文件解析完成"
        );

        // === 阶段 2: 行规范化 ===
        debug!("阶段 2: 行规范化");
        let rows = self.normalizer.normalize(&table);
        debug!(count = rows.len(), "行规范化完成");

        // === 阶段 3: 数据集校验 ===
        debug!("阶段 3: 数据集校验");
        let validation = self.validator.validate(&rows);
        info!(
            is_valid = validation.is_valid,
            errors = validation.summary.errors,
            warnings = validation.summary.warnings,
            valid_rows = validation.valid_rows,
            "数据集校验完成"
        );

        // === 阶段 4: 构建会话 ===
        let session = ImportSession::new(file_name, format, rows, validation);
        info!(
            session_id = %session.session_id,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入会话已创建"
        );

        Ok(session)
    }

    /// 导出商品行（与校验结果无关）
    fn export_rows(&self, rows: &[crate::domain::product::ProductRow], format: FileFormat) -> ImportResult<Vec<u8>> {
        self.exporter.serialize(rows, format)
    }
}
