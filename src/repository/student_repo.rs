// ==========================================
// 记录管理服务 - 学生 Repository Trait
// ==========================================
// 职责: 定义学生表数据访问接口（不包含业务逻辑）
// 红线: Repository 不含验证规则,只做数据 CRUD
// ==========================================

use crate::domain::import::{BatchDeleteRequest, BatchDeleteResult, BulkInsertOutcome};
use crate::domain::student::{MutationOutcome, NewStudent, StudentRecord};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// StudentBatchStore Trait
// ==========================================
// 用途: 批量写入/批量删除（BatchWriter 能力接口）
// 实现者: StudentRepositoryImpl（使用 rusqlite）
// 约束: 每个操作恰好一个事务,整体提交或整体失败
#[async_trait]
pub trait StudentBatchStore: Send + Sync {
    /// 批量插入学生记录（单事务,集合式写入）
    ///
    /// # 参数
    /// - students: 已通过行级验证的记录集合（0..=1000 条）
    ///
    /// # 返回
    /// - Ok(BulkInsertOutcome): inserted / duplicates / message
    ///   重复判定完全委托给存储层自然键唯一约束
    ///   （UNIQUE(student_name, dept_name) + INSERT OR IGNORE）
    /// - Err: 数据库错误（整个事务回滚,不存在部分写入）
    ///
    /// # 空集合
    /// 直接返回 inserted=0 与固定消息,不触发任何数据库往返
    async fn bulk_insert_students(
        &self,
        students: Vec<NewStudent>,
    ) -> RepositoryResult<BulkInsertOutcome>;

    /// 批量删除学生记录并回报未命中的 id（单事务）
    ///
    /// # 参数
    /// - request: 已去重的 id 集合
    ///
    /// # 返回
    /// - Ok(BatchDeleteResult): deleted_rows + missing_ids
    ///   missing_ids 保持请求中的出现顺序
    /// - Err: 数据库错误（整个事务回滚）
    async fn bulk_delete_students(
        &self,
        request: &BatchDeleteRequest,
    ) -> RepositoryResult<BatchDeleteResult>;
}

// ==========================================
// StudentStore Trait
// ==========================================
// 用途: 单条记录 CRUD（由外部控制器层经 api 调用）
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// 插入单条学生记录
    ///
    /// # 返回
    /// - Ok(StudentRecord): 含生成的主键
    /// - Err(UniqueConstraintViolation): 自然键已存在
    async fn insert_student(&self, student: NewStudent) -> RepositoryResult<StudentRecord>;

    /// 查询全部学生记录（按主键升序）
    async fn list_students(&self) -> RepositoryResult<Vec<StudentRecord>>;

    /// 按主键查询单条记录
    async fn get_student_by_id(&self, student_id: i64)
        -> RepositoryResult<Option<StudentRecord>>;

    /// 按主键更新单条记录
    ///
    /// # 返回
    /// - Ok(MutationOutcome::Applied): 更新生效
    /// - Ok(MutationOutcome::NotFound): 目标不存在
    async fn update_student(
        &self,
        student_id: i64,
        student: NewStudent,
    ) -> RepositoryResult<MutationOutcome>;

    /// 按主键删除单条记录
    async fn delete_student(&self, student_id: i64) -> RepositoryResult<MutationOutcome>;
}
