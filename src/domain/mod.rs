// ==========================================
// 商品目录批量导入系统 - 领域层
// ==========================================
// 职责: 定义导入管道全程共享的实体与类型
// ==========================================

// 模块声明
pub mod product;
pub mod session;
pub mod types;
pub mod validation;

// 重导出核心类型
pub use product::{ProductRow, RawTable};
pub use session::{ApplyReport, ImportSession, SnapshotContext, SnapshotHandle};
pub use types::{ApplyState, FileFormat, Severity};
pub use validation::{ValidationIssue, ValidationResult, ValidationSummary};
