// ==========================================
// 商品目录批量导入系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio
// 系统定位: 批量商品数据的解析/校验/安全应用管道
// 红线: 先快照后写入，校验不通过禁止落库
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 外部目录/快照协作方契约
pub mod repository;

// 引擎层 - 应用编排
pub mod engine;

// 导入层 - 文件解析/规范化/校验/导出
pub mod importer;

// 配置层 - 校验阈值
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 面向展示层的业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ApplyState, FileFormat, Severity};

// 领域实体
pub use domain::{
    ApplyReport, ImportSession, ProductRow, RawTable, SnapshotContext, SnapshotHandle,
    ValidationIssue, ValidationResult, ValidationSummary,
};

// 引擎
pub use engine::{ApplyError, ApplyOrchestrator};

// 导入层
pub use importer::{CatalogImporter, CatalogImporterImpl, ImportError, ImportResult};

// 仓储契约
pub use repository::{CatalogRepository, RepositoryError};

// API
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "商品目录批量导入系统";
