// ==========================================
// 记录管理服务 - 批量管道值对象
// ==========================================
// 用途: 导入/批量删除管道各阶段之间传递的数据结构
// 流程: FileIngestor → RowValidator → BatchWriter → ResultAggregator
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// 空批次的固定响应消息（§ 批量写入契约）
pub const NO_VALID_ROWS_MESSAGE: &str = "No valid rows found to process";

// ==========================================
// ImportRow - 原始候选行
// ==========================================
// 用途: 文件解析产物,仅在验证阶段存活
// 约定: row_number 为文件物理行号,表头为第 1 行,
//       数据行从 2 起单调递增,用于错误归属
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    pub row_number: usize,
    pub raw_fields: Vec<String>,
}

// ==========================================
// ValidationReason - 行级验证失败原因
// ==========================================
// 对外文案属于响应契约的一部分,不可改动
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationReason {
    /// 必填字段为空、纯空白或为 null 哨兵值
    EmptyOrNull,
    /// 名称类字段含非法字符或不以字母开头
    InvalidCharacters,
    /// 数值字段无法解析为整数,携带原始文本
    InvalidNumeric { literal: String },
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::EmptyOrNull => write!(f, "empty or null values"),
            ValidationReason::InvalidCharacters => write!(f, "invalid characters"),
            ValidationReason::InvalidNumeric { literal } => {
                write!(f, "invalid numeric value '{}'", literal)
            }
        }
    }
}

// ==========================================
// RowValidationError - 行级验证错误
// ==========================================
// 用途: 按行号归属的可恢复错误,不中断批次
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValidationError {
    pub row_number: usize,
    pub reason: ValidationReason,
}

impl RowValidationError {
    /// 生成报告行文案,如 "Row 3: invalid characters"
    pub fn report_line(&self) -> String {
        format!("Row {}: {}", self.row_number, self.reason)
    }
}

// ==========================================
// BulkInsertOutcome - 批量写入的存储响应
// ==========================================
// 约定: inserted + duplicates = 本次提交的记录数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkInsertOutcome {
    pub inserted: usize,   // 实际落库行数
    pub duplicates: usize, // 被自然键唯一约束拒绝的行数
    pub message: String,   // 存储层响应消息,逐字上抛
}

// ==========================================
// ImportReport - 导入汇总报告
// ==========================================
// 不变式: total_rows_received = successfully_inserted + skipped
//         skipped = validation_errors.len() + 存储层重复数
// 构造后不可变,由 ResultAggregator 一次性生成
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub message: String,
    pub total_rows_received: usize,
    pub successfully_inserted: usize,
    pub skipped: usize,
    pub validation_errors: Vec<String>,
}

// ==========================================
// BatchDeleteRequest - 批量删除请求
// ==========================================
// 约定: id 已去重（保留首次出现顺序）,正整数校验在 api 边界完成
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchDeleteRequest {
    ids: Vec<i64>,
}

impl BatchDeleteRequest {
    /// 构造请求并去重（保序）
    pub fn new(ids: Vec<i64>) -> Self {
        let mut seen = HashSet::new();
        let mut deduped = ids;
        deduped.retain(|id| seen.insert(*id));
        Self { ids: deduped }
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ==========================================
// BatchDeleteResult - 批量删除结果
// ==========================================
// 不变式: deleted_rows + missing_ids.len() = 请求 id 数（去重后）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchDeleteResult {
    pub deleted_rows: usize,
    pub missing_ids: Vec<i64>,
}

// ==========================================
// ImportStage - 导入管道状态机
// ==========================================
// 状态严格线性推进: Parsing → Validating → Writing → Aggregated
// 任一阶段致命失败直接进入 Failed,不回退、不重试
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    Parsing,
    Validating,
    Writing,
    Aggregated,
    Failed,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ImportStage::Parsing => "PARSING",
            ImportStage::Validating => "VALIDATING",
            ImportStage::Writing => "WRITING",
            ImportStage::Aggregated => "AGGREGATED",
            ImportStage::Failed => "FAILED",
        };
        write!(f, "{}", s)
    }
}
