// ==========================================
// 记录管理服务 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 批量导入与批量删除核心,
//           HTTP 控制器/认证/单条 CRUD 路由由外部宿主承载
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与管道值对象
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - 上传文件摄取/验证/落库管道
pub mod importer;

// 配置层 - 存储配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体与值对象
pub use domain::{
    BatchDeleteRequest, BatchDeleteResult, BulkInsertOutcome, ImportReport, ImportRow,
    ImportStage, MutationOutcome, NewStudent, RowValidationError, StudentRecord,
    ValidationReason, NO_VALID_ROWS_MESSAGE,
};

// 导入管道
pub use importer::{
    FileIngestor, ImportError, StudentImporter, StudentImporterImpl, StudentRowValidator,
    MAX_IMPORT_ROWS,
};

// 仓储
pub use repository::{
    RepositoryError, StudentBatchStore, StudentRepositoryImpl, StudentStore,
};

// API
pub use api::{ApiError, StudentApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Databridge 记录管理服务";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
