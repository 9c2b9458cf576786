// ==========================================
// 记录管理服务 - 配置层
// ==========================================
// 职责: 存储句柄配置（数据库路径）
// 约定: 环境变量优先,回退到系统用户数据目录
// ==========================================

pub mod store_config;

// 重导出核心配置
pub use store_config::{StoreConfig, DB_PATH_ENV};
