// ==========================================
// 记录管理服务 - 数据仓储层
// ==========================================
// 职责: 提供数据访问接口,屏蔽数据库细节
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod student_repo;
pub mod student_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use student_repo::{StudentBatchStore, StudentStore};
pub use student_repo_impl::StudentRepositoryImpl;
