// ==========================================
// 商品目录批量导入系统 - API 层
// ==========================================
// 职责: 面向展示层的业务接口（纯数据输入输出）
// ==========================================

pub mod error;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use import_api::{ApplyApiResponse, ImportApi, SessionApiResponse};
