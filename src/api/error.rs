// ==========================================
// 记录管理服务 - API层错误类型
// ==========================================
// 职责: 定义边界错误类型,把内层技术错误翻译为
//       外部控制器可直接映射为 HTTP 结局的带标签变体
// 约束: 禁止用消息文本做控制信号,匹配一律走变体
// ==========================================

use crate::domain::import::ValidationReason;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求边界错误（→ bad request）
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 批量删除请求不含任何 id（前置条件失败,区别于"零行命中"）
    #[error("no ids provided")]
    EmptyIdSet,

    /// 上传扩展名不受支持
    #[error("文件格式不支持: {0}（仅支持 .xlsx/.csv）")]
    UnsupportedFormat(String),

    /// 上传内容无数据行
    #[error("文件无数据行")]
    EmptyFile,

    /// 数据行数超过单次上传上限
    #[error("数据行数超过上限: 最多允许 {limit} 行")]
    RowLimitExceeded { limit: usize },

    /// 单条写入请求字段未通过验证
    #[error("数据验证失败: {0}")]
    ValidationFailed(ValidationReason),

    // ==========================================
    // 业务结局（→ conflict / not found）
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("唯一约束违反: {0}")]
    Conflict(String),

    // ==========================================
    // 数据访问错误（→ internal server error）
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::Conflict(msg),
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::LockError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// 目的: 摄取阶段的致命错误映射为请求边界错误,
//       写入阶段的存储错误映射为服务端错误
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::UnsupportedFormat(ext) => ApiError::UnsupportedFormat(ext),
            ImportError::EmptyFile => ApiError::EmptyFile,
            ImportError::RowLimitExceeded { limit } => ApiError::RowLimitExceeded { limit },
            ImportError::SpreadsheetParseError(msg) | ImportError::CsvParseError(msg) => {
                ApiError::InvalidInput(msg)
            }
            ImportError::Store(repo_err) => ApiError::from(repo_err),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(err) => ApiError::InternalError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
