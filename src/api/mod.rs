// ==========================================
// 记录管理服务 - API 层
// ==========================================
// 职责: 暴露给外部控制器层的业务接口
// ==========================================

pub mod error;
pub mod student_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use student_api::StudentApi;
