// ==========================================
// 商品目录批量导入系统 - 目录仓储 Trait
// ==========================================
// 职责: 定义应用阶段消费的两个外部操作（不包含实现）
// 红线: 每次应用尝试两个操作各至多调用一次，
//       且快照必须先于写入完成
// ==========================================

use crate::domain::product::ProductRow;
use crate::domain::session::{SnapshotContext, SnapshotHandle};
use crate::repository::error::RepositoryError;
use async_trait::async_trait;

// ==========================================
// CatalogRepository Trait
// ==========================================
// 用途: 在线商品目录与回滚快照的外部协作方
// 实现者: 宿主系统（本库测试使用 Mock 实现）
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// 创建应用前回滚快照
    ///
    /// # 参数
    /// - context: 快照上下文（导入类型、商品数量）
    ///
    /// # 返回
    /// - Ok(SnapshotHandle): 快照句柄（人工回滚凭据）
    /// - Err: 快照创建失败（应用流程必须就此终止）
    ///
    /// # 契约
    /// - 必须捕获足以完整恢复应用前目录状态的数据
    /// - 每次应用尝试恰好调用一次，且先于任何写入
    async fn create_snapshot(
        &self,
        context: SnapshotContext,
    ) -> Result<SnapshotHandle, RepositoryError>;

    /// 批量写入商品目录
    ///
    /// # 参数
    /// - rows: 本会话全部规范化商品行
    ///
    /// # 返回
    /// - Ok(usize): 实际写入的行数
    /// - Err: 写入失败（目录可能处于过渡状态，快照可用于人工回滚）
    ///
    /// # 契约
    /// - 按 handle 批量 upsert
    /// - 每次应用尝试恰好调用一次，且仅在快照成功之后
    /// - 写入在协作方边界应尽量保持全有或全无
    async fn apply_catalog_write(&self, rows: &[ProductRow]) -> Result<usize, RepositoryError>;
}
