// ==========================================
// 记录管理服务 - 学生领域模型
// ==========================================
// 用途: student 表实体与写入载体
// 对齐: student 表 (student_id / student_name / age / dept_name / created_at)
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// StudentRecord - 学生主数据
// ==========================================
// 用途: 查询接口返回的持久化实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    // ===== 主键 =====
    pub student_id: i64, // 自增主键

    // ===== 基础信息 =====
    pub student_name: String, // 姓名（自然键字段①）
    pub age: i32,             // 年龄
    pub dept_name: String,    // 院系（自然键字段②）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

// ==========================================
// NewStudent - 已验证的待写入记录
// ==========================================
// 用途: RowValidator 的输出,批量/单条写入的输入
// 生命周期: 归属于单个批次,写入后即丢弃
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub student_name: String, // 已裁剪
    pub age: i32,             // 已解析
    pub dept_name: String,    // 已裁剪
}

// ==========================================
// MutationOutcome - 单条变更结果
// ==========================================
// 用途: 更新/删除按影响行数返回带标签的结果,
//       取代以消息文本作为控制信号的做法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationOutcome {
    /// 变更已生效（影响行数 > 0）
    Applied,
    /// 目标记录不存在（影响行数 = 0）
    NotFound,
}

impl MutationOutcome {
    pub fn from_affected_rows(affected: usize) -> Self {
        if affected > 0 {
            MutationOutcome::Applied
        } else {
            MutationOutcome::NotFound
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutation_outcome_from_affected_rows() {
        assert_eq!(
            MutationOutcome::from_affected_rows(1),
            MutationOutcome::Applied
        );
        assert_eq!(
            MutationOutcome::from_affected_rows(0),
            MutationOutcome::NotFound
        );
    }
}
