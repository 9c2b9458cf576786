// ==========================================
// 记录管理服务 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 分级: 文件/行数错误为致命,行级验证错误不在此处
//       （行级错误走 RowValidationError,不中断批次）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型（全部为批次级致命错误）
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    #[error("文件无数据行")]
    EmptyFile,

    #[error("数据行数超过上限: 最多允许 {limit} 行")]
    RowLimitExceeded { limit: usize },

    #[error("Excel 解析失败: {0}")]
    SpreadsheetParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 存储错误（写入阶段整体失败）=====
    #[error("批量写入失败: {0}")]
    Store(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
