// ==========================================
// 记录管理服务 - 领域模型层
// ==========================================
// 职责: 定义领域实体与批量管道值对象
// 红线: 不含数据访问逻辑,不含管道编排逻辑
// ==========================================

pub mod import;
pub mod student;

// 重导出核心类型
pub use import::{
    BatchDeleteRequest, BatchDeleteResult, BulkInsertOutcome, ImportReport, ImportRow,
    ImportStage, RowValidationError, ValidationReason, NO_VALID_ROWS_MESSAGE,
};
pub use student::{MutationOutcome, NewStudent, StudentRecord};
