// ==========================================
// 记录管理服务 - 学生数据导入器
// ==========================================
// 职责: 整合导入管道,从上传字节流到汇总报告
// 流程: 摄取 → 行级验证 → 批量写入 → 聚合
// 状态机: Parsing → Validating → Writing → Aggregated
//         任一阶段致命失败 → Failed（直接返回 Err,不产出报告）
// ==========================================

use crate::domain::import::{ImportReport, ImportStage, RowValidationError};
use crate::domain::student::NewStudent;
use crate::importer::aggregator::aggregate_import;
use crate::importer::error::ImportResult;
use crate::importer::file_ingestor::FileIngestor;
use crate::importer::row_validator::StudentRowValidator;
use crate::repository::student_repo::StudentBatchStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

// ==========================================
// StudentImporter Trait
// ==========================================
// 用途: 上传边界调用的导入入口
// 实现者: StudentImporterImpl
#[async_trait]
pub trait StudentImporter: Send + Sync {
    /// 从上传的字节流导入学生数据
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - extension: 声明的扩展名（由调用边界从文件名提取）
    ///
    /// # 返回
    /// - Ok(ImportReport): 完整一致的汇总报告（可能零成功）
    /// - Err(ImportError): 批次级致命错误,无任何行落库
    async fn import_students(&self, bytes: &[u8], extension: &str)
        -> ImportResult<ImportReport>;
}

// ==========================================
// StudentImporterImpl - 导入管道编排
// ==========================================
// 每次调用是一条独立的同步管道,调用之间不共享可变状态;
// 唯一共享资源是底层存储,跨行一致性由其事务保证
pub struct StudentImporterImpl<R>
where
    R: StudentBatchStore,
{
    repo: Arc<R>,
    validator: StudentRowValidator,
}

impl<R> StudentImporterImpl<R>
where
    R: StudentBatchStore,
{
    /// 创建新的导入器实例
    ///
    /// # 参数
    /// - repo: 批量写入仓储
    pub fn new(repo: Arc<R>) -> Self {
        Self {
            repo,
            validator: StudentRowValidator::new(),
        }
    }
}

#[async_trait]
impl<R> StudentImporter for StudentImporterImpl<R>
where
    R: StudentBatchStore,
{
    #[instrument(skip(self, bytes), fields(batch_id))]
    async fn import_students(
        &self,
        bytes: &[u8],
        extension: &str,
    ) -> ImportResult<ImportReport> {
        let start_time = std::time::Instant::now();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(
            batch_id = %batch_id,
            extension = %extension,
            size = bytes.len(),
            "开始导入学生数据"
        );

        // === 阶段 1: 摄取 ===
        debug!(stage = %ImportStage::Parsing, "打开上传文件");
        let stream = FileIngestor::open(bytes, extension).map_err(|e| {
            error!(stage = %ImportStage::Failed, error = %e, "文件摄取失败");
            e
        })?;

        // === 阶段 2: 行级验证 ===
        // 行级错误只记录不中断;流中出现的致命错误（限行/解析）整批作废
        debug!(stage = %ImportStage::Validating, "逐行验证");
        let mut valid_students: Vec<NewStudent> = Vec::new();
        let mut validation_errors: Vec<RowValidationError> = Vec::new();
        let mut total_rows = 0usize;

        for item in stream {
            let row = item.map_err(|e| {
                error!(stage = %ImportStage::Failed, error = %e, "批次中止");
                e
            })?;

            total_rows += 1;
            match self.validator.validate(row) {
                Ok(student) => valid_students.push(student),
                Err(row_error) => validation_errors.push(row_error),
            }
        }

        if total_rows == 0 {
            // CSV 惰性流: 仅表头的文件在此处暴露
            error!(stage = %ImportStage::Failed, "文件无数据行");
            return Err(crate::importer::error::ImportError::EmptyFile);
        }

        info!(
            total_rows = total_rows,
            valid = valid_students.len(),
            rejected = validation_errors.len(),
            "行级验证完成"
        );

        // === 阶段 3: 批量写入 ===
        // 有效集为空时跳过存储往返,由聚合器给出固定消息
        let outcome = if valid_students.is_empty() {
            debug!(stage = %ImportStage::Writing, "无有效行,跳过写入");
            None
        } else {
            debug!(
                stage = %ImportStage::Writing,
                count = valid_students.len(),
                "提交批量写入事务"
            );
            let outcome = self.repo.bulk_insert_students(valid_students).await.map_err(|e| {
                error!(stage = %ImportStage::Failed, error = %e, "写入阶段失败,整批作废");
                e
            })?;
            Some(outcome)
        };

        // === 阶段 4: 聚合 ===
        debug!(stage = %ImportStage::Aggregated, "构造汇总报告");
        let report = aggregate_import(total_rows, outcome.as_ref(), &validation_errors);

        info!(
            batch_id = %batch_id,
            inserted = report.successfully_inserted,
            skipped = report.skipped,
            elapsed_ms = start_time.elapsed().as_millis() as i64,
            "导入完成"
        );

        Ok(report)
    }
}
