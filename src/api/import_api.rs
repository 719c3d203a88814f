// ==========================================
// 商品目录导入API
// ==========================================
// 职责: 封装 解析/校验/导出/应用 供展示层调用
// 说明: 持有"当前会话"——加载新文件即整体替换旧会话，
//       旧会话的任何在途结果随之作废
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ValidationConfig;
use crate::domain::session::ImportSession;
use crate::domain::types::{ApplyState, FileFormat};
use crate::domain::validation::{ValidationIssue, ValidationSummary};
use crate::engine::ApplyOrchestrator;
use crate::importer::{CatalogImporter, CatalogImporterImpl};
use crate::repository::CatalogRepository;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 会话摘要响应（加载/校验后返回给展示层）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionApiResponse {
    /// 会话 ID
    pub session_id: String,
    /// 源文件名
    pub file_name: Option<String>,
    /// 总数据行数
    pub total_rows: usize,
    /// 无必填字段缺失的行数
    pub valid_rows: usize,
    /// 是否可进入应用（无 Error 级问题）
    pub is_valid: bool,
    /// 汇总统计
    pub summary: ValidationSummary,
    /// 全量问题明细（前端审计列表）
    pub issues: Vec<ValidationIssue>,
}

/// 应用成功响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyApiResponse {
    /// 会话 ID
    pub session_id: String,
    /// 应用前创建的快照 ID
    pub snapshot_id: String,
    /// 实际写入的商品行数
    pub applied_rows: usize,
    /// 应用耗时（毫秒）
    pub elapsed_ms: u64,
}

/// 导入API
pub struct ImportApi<R>
where
    R: CatalogRepository,
{
    importer: CatalogImporterImpl,
    orchestrator: ApplyOrchestrator<R>,
    session: Option<ImportSession>,
}

impl<R> ImportApi<R>
where
    R: CatalogRepository,
{
    /// 创建新的ImportApi实例（默认校验阈值）
    pub fn new(repo: R) -> Self {
        Self::with_config(repo, ValidationConfig::default())
    }

    /// 创建新的ImportApi实例（自定义校验阈值）
    pub fn with_config(repo: R, config: ValidationConfig) -> Self {
        Self {
            importer: CatalogImporterImpl::with_defaults(config),
            orchestrator: ApplyOrchestrator::new(repo),
            session: None,
        }
    }

    /// 从文件加载并校验商品数据（替换当前会话）
    ///
    /// # 参数
    /// - file_path: 数据文件路径（.csv / .xlsx）
    ///
    /// # 返回
    /// - Ok(SessionApiResponse): 新会话摘要
    /// - Err(ApiError): 文件读取/解析错误（当前会话保持不变）
    pub async fn load_from_path(&mut self, file_path: &Path) -> ApiResult<SessionApiResponse> {
        let session = self.importer.import_from_path(file_path).await?;
        Ok(self.replace_session(session))
    }

    /// 从字节流加载并校验商品数据（替换当前会话）
    pub async fn load_from_bytes(
        &mut self,
        bytes: Vec<u8>,
        format: FileFormat,
        file_name: Option<String>,
    ) -> ApiResult<SessionApiResponse> {
        let session = self
            .importer
            .import_from_bytes(bytes, format, file_name)
            .await?;
        Ok(self.replace_session(session))
    }

    /// 当前会话（只读）
    pub fn session(&self) -> Option<&ImportSession> {
        self.session.as_ref()
    }

    /// 将当前会话应用到在线目录
    ///
    /// # 返回
    /// - Ok(ApplyApiResponse): 应用成功
    /// - Err(ApiError): 门控拒绝或快照/写入失败
    ///   （失败后会话进入 Failed，可由用户显式重试）
    pub async fn apply(&mut self) -> ApiResult<ApplyApiResponse> {
        let session = self
            .session
            .as_mut()
            .ok_or_else(|| ApiError::NoActiveSession("请先加载数据文件".to_string()))?;

        let report = self.orchestrator.apply(session).await?;

        Ok(ApplyApiResponse {
            session_id: session.session_id.clone(),
            snapshot_id: report.snapshot_id,
            applied_rows: report.applied_rows,
            elapsed_ms: report.elapsed_time.as_millis() as u64,
        })
    }

    /// 导出当前会话的商品行
    ///
    /// # 说明
    /// 导出不依赖校验结果——校验失败的数据也可导出，
    /// 供用户在外部工具中修正后重新导入
    pub fn export(&self, format: FileFormat) -> ApiResult<Vec<u8>> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| ApiError::NoActiveSession("请先加载数据文件".to_string()))?;

        self.importer
            .export_rows(&session.rows, format)
            .map_err(|e| ApiError::ExportFailed(e.to_string()))
    }

    /// 替换当前会话并生成摘要响应
    fn replace_session(&mut self, session: ImportSession) -> SessionApiResponse {
        let response = SessionApiResponse {
            session_id: session.session_id.clone(),
            file_name: session.file_name.clone(),
            total_rows: session.validation.total_rows,
            valid_rows: session.validation.valid_rows,
            is_valid: session.validation.is_valid,
            summary: session.validation.summary.clone(),
            issues: session.validation.issues.clone(),
        };
        self.session = Some(session);
        response
    }
}

// 辅助查询
impl<R> ImportApi<R>
where
    R: CatalogRepository,
{
    /// 当前会话的应用状态（无会话时为 None）
    pub fn apply_state(&self) -> Option<ApplyState> {
        self.session.as_ref().map(|s| s.state)
    }
}
