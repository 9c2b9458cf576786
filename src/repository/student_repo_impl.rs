// ==========================================
// 记录管理服务 - 学生 Repository 实现
// ==========================================
// 职责: 实现学生表数据访问（使用 rusqlite）
// 红线: Repository 不含验证规则,只做数据 CRUD
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::import::{
    BatchDeleteRequest, BatchDeleteResult, BulkInsertOutcome, NO_VALID_ROWS_MESSAGE,
};
use crate::domain::student::{MutationOutcome, NewStudent, StudentRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::student_repo::{StudentBatchStore, StudentStore};
use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

// ==========================================
// StudentRepositoryImpl
// ==========================================
pub struct StudentRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl StudentRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径（表结构须已存在,本层不做迁移）
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中批量插入学生记录
    ///
    /// INSERT OR IGNORE: 重复判定完全委托给
    /// UNIQUE(student_name, dept_name) 约束,被拒绝的行 changes=0
    fn bulk_insert_students_tx(
        tx: &Transaction,
        students: &[NewStudent],
    ) -> RepositoryResult<usize> {
        let mut stmt = tx.prepare(
            r#"
            INSERT OR IGNORE INTO student (student_name, age, dept_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )?;

        let now = Utc::now();
        let mut inserted = 0;
        for student in students {
            inserted += stmt.execute(params![
                student.student_name,
                student.age,
                student.dept_name,
                now,
            ])?;
        }

        Ok(inserted)
    }

    /// 在事务中批量删除并回收未命中 id
    ///
    /// 同一事务内先取命中集,再做集合式删除,
    /// missing_ids 保持请求顺序
    fn bulk_delete_students_tx(
        tx: &Transaction,
        ids: &[i64],
    ) -> RepositoryResult<(usize, Vec<i64>)> {
        let placeholders = vec!["?"; ids.len()].join(", ");

        let select_sql = format!(
            "SELECT student_id FROM student WHERE student_id IN ({})",
            placeholders
        );
        let mut stmt = tx.prepare(&select_sql)?;
        let existing = stmt
            .query_map(params_from_iter(ids.iter()), |row| row.get::<_, i64>(0))?
            .collect::<Result<HashSet<i64>, _>>()?;

        let delete_sql = format!(
            "DELETE FROM student WHERE student_id IN ({})",
            placeholders
        );
        let deleted = tx.execute(&delete_sql, params_from_iter(ids.iter()))?;

        let missing_ids = ids
            .iter()
            .filter(|id| !existing.contains(id))
            .copied()
            .collect();

        Ok((deleted, missing_ids))
    }

    fn map_student_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<StudentRecord> {
        Ok(StudentRecord {
            student_id: row.get(0)?,
            student_name: row.get(1)?,
            age: row.get(2)?,
            dept_name: row.get(3)?,
            created_at: row.get(4)?,
        })
    }
}

#[async_trait]
impl StudentBatchStore for StudentRepositoryImpl {
    async fn bulk_insert_students(
        &self,
        students: Vec<NewStudent>,
    ) -> RepositoryResult<BulkInsertOutcome> {
        if students.is_empty() {
            return Ok(BulkInsertOutcome {
                inserted: 0,
                duplicates: 0,
                message: NO_VALID_ROWS_MESSAGE.to_string(),
            });
        }

        let total = students.len();
        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let inserted = Self::bulk_insert_students_tx(&tx, &students)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let duplicates = total - inserted;
        tracing::debug!(
            inserted = inserted,
            duplicates = duplicates,
            "批量插入事务已提交"
        );

        Ok(BulkInsertOutcome {
            inserted,
            duplicates,
            message: format!(
                "{} rows inserted, {} duplicate rows skipped",
                inserted, duplicates
            ),
        })
    }

    async fn bulk_delete_students(
        &self,
        request: &BatchDeleteRequest,
    ) -> RepositoryResult<BatchDeleteResult> {
        // 空集合在 api 边界已被拒绝,这里保持幂等的空返回
        if request.is_empty() {
            return Ok(BatchDeleteResult {
                deleted_rows: 0,
                missing_ids: Vec::new(),
            });
        }

        let mut conn = self.lock_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let (deleted_rows, missing_ids) = Self::bulk_delete_students_tx(&tx, request.ids())?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        tracing::debug!(
            deleted = deleted_rows,
            missing = missing_ids.len(),
            "批量删除事务已提交"
        );

        Ok(BatchDeleteResult {
            deleted_rows,
            missing_ids,
        })
    }
}

#[async_trait]
impl StudentStore for StudentRepositoryImpl {
    async fn insert_student(&self, student: NewStudent) -> RepositoryResult<StudentRecord> {
        let conn = self.lock_conn()?;
        let created_at = Utc::now();

        conn.execute(
            r#"
            INSERT INTO student (student_name, age, dept_name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![student.student_name, student.age, student.dept_name, created_at],
        )?;

        Ok(StudentRecord {
            student_id: conn.last_insert_rowid(),
            student_name: student.student_name,
            age: student.age,
            dept_name: student.dept_name,
            created_at,
        })
    }

    async fn list_students(&self) -> RepositoryResult<Vec<StudentRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT student_id, student_name, age, dept_name, created_at
            FROM student
            ORDER BY student_id
            "#,
        )?;

        let records = stmt
            .query_map([], |row| Self::map_student_row(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    async fn get_student_by_id(
        &self,
        student_id: i64,
    ) -> RepositoryResult<Option<StudentRecord>> {
        let conn = self.lock_conn()?;
        let record = conn
            .query_row(
                r#"
                SELECT student_id, student_name, age, dept_name, created_at
                FROM student
                WHERE student_id = ?1
                "#,
                params![student_id],
                |row| Self::map_student_row(row),
            )
            .optional()?;

        Ok(record)
    }

    async fn update_student(
        &self,
        student_id: i64,
        student: NewStudent,
    ) -> RepositoryResult<MutationOutcome> {
        let conn = self.lock_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE student
            SET student_name = ?1, age = ?2, dept_name = ?3
            WHERE student_id = ?4
            "#,
            params![student.student_name, student.age, student.dept_name, student_id],
        )?;

        Ok(MutationOutcome::from_affected_rows(affected))
    }

    async fn delete_student(&self, student_id: i64) -> RepositoryResult<MutationOutcome> {
        let conn = self.lock_conn()?;
        let affected = conn.execute(
            "DELETE FROM student WHERE student_id = ?1",
            params![student_id],
        )?;

        Ok(MutationOutcome::from_affected_rows(affected))
    }
}
