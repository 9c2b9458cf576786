// ==========================================
// 记录管理服务 - 结果聚合器
// ==========================================
// 职责: 合并验证阶段与写入阶段的结果,一次性构造 ImportReport
// 红线: 纯函数,不做 I/O,不修改输入
// ==========================================

use crate::domain::import::{
    BulkInsertOutcome, ImportReport, RowValidationError, NO_VALID_ROWS_MESSAGE,
};

/// 聚合导入结果
///
/// # 参数
/// - total_rows_received: 摄取阶段产出的数据行总数
/// - outcome: 存储响应（None = 没有有效行,未发生写入）
/// - validation_errors: 行级错误,已按行号非降序排列
///
/// # 不变式
/// - skipped = 存储层重复数 + 验证错误数
/// - total_rows_received = successfully_inserted + skipped
/// - message: 发生写入时逐字取自存储响应,否则为固定消息
pub fn aggregate_import(
    total_rows_received: usize,
    outcome: Option<&BulkInsertOutcome>,
    validation_errors: &[RowValidationError],
) -> ImportReport {
    let (inserted, store_skipped, message) = match outcome {
        Some(o) => (o.inserted, o.duplicates, o.message.clone()),
        None => (0, 0, NO_VALID_ROWS_MESSAGE.to_string()),
    };

    ImportReport {
        message,
        total_rows_received,
        successfully_inserted: inserted,
        skipped: store_skipped + validation_errors.len(),
        validation_errors: validation_errors
            .iter()
            .map(RowValidationError::report_line)
            .collect(),
    }
}
