// ==========================================
// 商品目录批量导入系统 - 引擎层
// ==========================================
// 职责: 业务规则引擎（应用编排）
// ==========================================

pub mod apply_orchestrator;

pub use apply_orchestrator::{ApplyError, ApplyOrchestrator};
