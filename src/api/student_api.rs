// ==========================================
// 记录管理服务 - 学生API
// ==========================================
// 职责: 封装学生表的上传导入、批量删除与单条 CRUD,
//       供外部 HTTP 控制器层调用
// 红线: 本层只做请求边界校验与错误翻译,不含存储细节
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::import::{BatchDeleteRequest, BatchDeleteResult, ImportReport};
use crate::domain::student::{MutationOutcome, NewStudent, StudentRecord};
use crate::importer::row_validator::validate_new_student;
use crate::importer::{StudentImporter, StudentImporterImpl};
use crate::repository::{StudentBatchStore, StudentRepositoryImpl, StudentStore};
use std::path::Path;
use std::sync::Arc;

/// 从声明的文件名提取扩展名（小写,无点号）
fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

// ==========================================
// StudentApi
// ==========================================
pub struct StudentApi {
    db_path: String,
}

impl StudentApi {
    /// 创建新的StudentApi实例
    pub fn new(db_path: String) -> Self {
        Self { db_path }
    }

    fn create_repo(&self) -> ApiResult<StudentRepositoryImpl> {
        StudentRepositoryImpl::new(&self.db_path).map_err(ApiError::from)
    }

    /// 上传导入学生数据
    ///
    /// # 参数
    /// - file_name: 声明的文件名（用于扩展名判定）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportReport): 完整一致的汇总报告（可能零成功）
    /// - Err(ApiError): 批次级失败,无任何行落库
    ///   （UnsupportedFormat/EmptyFile/RowLimitExceeded → bad request,
    ///     存储失败 → internal server error）
    pub async fn upload_students(
        &self,
        file_name: &str,
        bytes: &[u8],
    ) -> ApiResult<ImportReport> {
        let repo = Arc::new(self.create_repo()?);
        let importer = StudentImporterImpl::new(repo);

        let report = importer
            .import_students(bytes, &extension_of(file_name))
            .await?;

        Ok(report)
    }

    /// 批量删除学生记录
    ///
    /// # 参数
    /// - ids: 请求的 id 数组（正整数;重复项在此处去重）
    ///
    /// # 返回
    /// - Ok(BatchDeleteResult): deleted_rows + missing_ids
    /// - Err(EmptyIdSet): 请求不含任何 id（前置条件失败）
    /// - Err(InvalidInput): 含非正数 id
    pub async fn delete_students_batch(&self, ids: Vec<i64>) -> ApiResult<BatchDeleteResult> {
        if ids.is_empty() {
            return Err(ApiError::EmptyIdSet);
        }
        if let Some(bad) = ids.iter().find(|id| **id <= 0) {
            return Err(ApiError::InvalidInput(format!(
                "学生 id 必须为正整数: {}",
                bad
            )));
        }

        let request = BatchDeleteRequest::new(ids);
        let repo = self.create_repo()?;
        let result = repo.bulk_delete_students(&request).await?;

        tracing::info!(
            requested = request.len(),
            deleted = result.deleted_rows,
            missing = result.missing_ids.len(),
            "批量删除完成"
        );

        Ok(result)
    }

    /// 注册单条学生记录
    ///
    /// # 返回
    /// - Ok(StudentRecord): 含生成的主键
    /// - Err(ValidationFailed): 字段未通过行级同款规则
    /// - Err(Conflict): 自然键已存在
    pub async fn register_student(&self, student: NewStudent) -> ApiResult<StudentRecord> {
        validate_new_student(&student).map_err(ApiError::ValidationFailed)?;

        let trimmed = NewStudent {
            student_name: student.student_name.trim().to_string(),
            age: student.age,
            dept_name: student.dept_name.trim().to_string(),
        };

        let repo = self.create_repo()?;
        let record = repo.insert_student(trimmed).await?;
        Ok(record)
    }

    /// 查询全部学生记录
    pub async fn list_students(&self) -> ApiResult<Vec<StudentRecord>> {
        let repo = self.create_repo()?;
        Ok(repo.list_students().await?)
    }

    /// 按主键查询单条记录
    ///
    /// # 返回
    /// - Ok(StudentRecord)
    /// - Err(NotFound): 目标不存在
    pub async fn get_student(&self, student_id: i64) -> ApiResult<StudentRecord> {
        let repo = self.create_repo()?;
        repo.get_student_by_id(student_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Student(id={})不存在", student_id)))
    }

    /// 按主键更新单条记录
    pub async fn update_student(
        &self,
        student_id: i64,
        student: NewStudent,
    ) -> ApiResult<MutationOutcome> {
        validate_new_student(&student).map_err(ApiError::ValidationFailed)?;

        let trimmed = NewStudent {
            student_name: student.student_name.trim().to_string(),
            age: student.age,
            dept_name: student.dept_name.trim().to_string(),
        };

        let repo = self.create_repo()?;
        Ok(repo.update_student(student_id, trimmed).await?)
    }

    /// 按主键删除单条记录
    pub async fn remove_student(&self, student_id: i64) -> ApiResult<MutationOutcome> {
        let repo = self.create_repo()?;
        Ok(repo.delete_student(student_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("students.xlsx"), "xlsx");
        assert_eq!(extension_of("students.CSV"), "csv");
        assert_eq!(extension_of("students"), "");
        assert_eq!(extension_of("a.b.csv"), "csv");
    }
}
