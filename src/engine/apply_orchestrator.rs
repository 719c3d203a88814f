// ==========================================
// 商品目录批量导入系统 - 应用编排器
// ==========================================
// 职责: 门控 → 快照 → 目录写入 的状态机编排
// 红线: 校验不通过时本地拒绝，不触碰任何外部协作方；
//       快照是写入的前置条件而非尽力而为的副作用；
//       快照成功后不存在取消路径
// ==========================================

use crate::domain::session::{ApplyReport, ImportSession, SnapshotContext};
use crate::domain::types::ApplyState;
use crate::repository::CatalogRepository;
use std::time::Instant;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

// 快照上下文中的导入类型标识
const IMPORT_TYPE: &str = "bulk_product_import";

// ==========================================
// ApplyError - 应用阶段错误类型
// ==========================================
// 所有失败均为本次尝试的终态，不做自动重试；
// 重试/重新上传由用户显式发起
#[derive(Error, Debug)]
pub enum ApplyError {
    #[error("校验未通过，拒绝应用: {error_count} 个 Error 级问题")]
    ValidationGateRejected { error_count: usize },

    #[error("会话已应用完成，禁止重复应用")]
    SessionAlreadyApplied,

    #[error("会话正在应用中，禁止并发应用")]
    ApplyInProgress,

    #[error("快照创建失败，目录写入未执行: {0}")]
    SnapshotFailed(String),

    #[error("目录写入失败（快照 {snapshot_id} 已创建，可用于人工回滚）: {message}")]
    WriteFailed {
        snapshot_id: String,
        message: String,
    },
}

// ==========================================
// ApplyOrchestrator - 应用编排器
// ==========================================
// 状态机: Idle|Failed → Applying → Applied | Failed
pub struct ApplyOrchestrator<R>
where
    R: CatalogRepository,
{
    // 外部目录/快照协作方
    repo: R,
}

impl<R> ApplyOrchestrator<R>
where
    R: CatalogRepository,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - repo: 目录仓储（快照 + 批量写入）
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 将会话数据应用到在线目录
    ///
    /// # 参数
    /// - session: 导入会话（状态机随应用推进）
    ///
    /// # 返回
    /// - Ok(ApplyReport): 应用成功（快照 ID + 写入行数）
    /// - Err(ApplyError): 门控拒绝或快照/写入失败
    ///
    /// # 执行顺序
    /// 1. 状态检查（Applied 终态 / Applying 互斥）
    /// 2. 门控检查（仅 Error 级问题阻断，本地判定）
    /// 3. 创建快照（失败即终止，写入不会发生）
    /// 4. 批量写入（失败时快照 ID 随错误透出）
    #[instrument(skip(self, session), fields(session_id = %session.session_id))]
    pub async fn apply(&self, session: &mut ImportSession) -> Result<ApplyReport, ApplyError> {
        // === 步骤 1: 状态检查 ===
        match session.state {
            ApplyState::Applied => return Err(ApplyError::SessionAlreadyApplied),
            ApplyState::Applying => return Err(ApplyError::ApplyInProgress),
            ApplyState::Idle | ApplyState::Failed => {}
        }

        // === 步骤 2: 门控检查（本地判定，不触碰协作方）===
        if !session.validation.is_valid {
            let error_count = session.validation.error_count();
            warn!(error_count, "校验未通过，本地拒绝应用");
            return Err(ApplyError::ValidationGateRejected { error_count });
        }

        let start_time = Instant::now();
        session.state = ApplyState::Applying;
        info!(rows = session.rows.len(), "进入应用流程");

        // === 步骤 3: 创建回滚快照（写入的前置条件）===
        let context = SnapshotContext {
            import_type: IMPORT_TYPE.to_string(),
            product_count: session.rows.len(),
        };
        let snapshot = match self.repo.create_snapshot(context).await {
            Ok(handle) => handle,
            Err(e) => {
                session.state = ApplyState::Failed;
                error!(error = %e, "快照创建失败，目录写入未执行");
                return Err(ApplyError::SnapshotFailed(e.to_string()));
            }
        };
        info!(snapshot_id = %snapshot.snapshot_id, "快照创建完成");

        // === 步骤 4: 批量写入目录 ===
        let applied_rows = match self.repo.apply_catalog_write(&session.rows).await {
            Ok(count) => count,
            Err(e) => {
                session.state = ApplyState::Failed;
                // 目录可能处于过渡状态，快照 ID 必须透出供人工回滚
                error!(
                    snapshot_id = %snapshot.snapshot_id,
                    error = %e,
                    "目录写入失败，快照保留"
                );
                return Err(ApplyError::WriteFailed {
                    snapshot_id: snapshot.snapshot_id.clone(),
                    message: e.to_string(),
                });
            }
        };

        // === 步骤 5: 终态 ===
        session.state = ApplyState::Applied;
        let elapsed_time = start_time.elapsed();
        info!(
            snapshot_id = %snapshot.snapshot_id,
            applied_rows,
            elapsed_ms = elapsed_time.as_millis() as u64,
            "应用完成"
        );

        Ok(ApplyReport {
            snapshot_id: snapshot.snapshot_id,
            applied_rows,
            elapsed_time,
        })
    }
}
