// ==========================================
// 记录管理服务 - 存储配置
// ==========================================
// 职责: 解析数据库路径,按显式依赖注入传给各组件,
//       不使用全局共享连接串
// ==========================================

use std::path::PathBuf;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "DATABRIDGE_DB_PATH";

// ==========================================
// StoreConfig - 存储句柄配置
// ==========================================
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub db_path: String,
}

impl StoreConfig {
    /// 从环境变量解析配置
    ///
    /// # 解析顺序
    /// 1. DATABRIDGE_DB_PATH 显式指定（便于调试/测试/CI）
    /// 2. 用户数据目录 <data_dir>/databridge/databridge.db
    /// 3. 兜底: 当前目录 ./databridge.db
    pub fn from_env() -> Self {
        let db_path = std::env::var(DB_PATH_ENV)
            .ok()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(default_db_path);

        Self { db_path }
    }
}

/// 默认数据库路径
fn default_db_path() -> String {
    let mut path = PathBuf::from("./databridge.db");

    if let Some(data_dir) = dirs::data_dir() {
        path = data_dir.join("databridge");
        path.push("databridge.db");
    }

    path.to_string_lossy().to_string()
}
