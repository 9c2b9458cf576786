// ==========================================
// 记录管理服务 - 行级验证器
// ==========================================
// 职责: 单行 ImportRow → NewStudent 或 RowValidationError
// 红线: 永不因坏行中断批次;每个坏行恰好产出一个错误
// 约定: 学生表固定位置列 → 列1 姓名 / 列2 年龄 / 列3 院系
// ==========================================

use crate::domain::import::{ImportRow, RowValidationError, ValidationReason};
use crate::domain::student::NewStudent;

/// 空值哨兵字面量（大小写不敏感,裁剪后比较）
pub const NULL_TOKEN: &str = "null";

// ==========================================
// 字段规则
// ==========================================

/// 字段类别（决定该列的形状规则）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 人名: 以字母开头,仅允许字母与空格
    PersonName,
    /// 类别名: 以字母开头,仅允许字母
    CategoryName,
    /// 整数字段
    Integer,
}

/// 单列的位置规格
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
}

/// 学生表的固定列布局（位置映射,不做表头名匹配）
pub const STUDENT_COLUMNS: [FieldSpec; 3] = [
    FieldSpec {
        label: "student_name",
        kind: FieldKind::PersonName,
    },
    FieldSpec {
        label: "age",
        kind: FieldKind::Integer,
    },
    FieldSpec {
        label: "dept_name",
        kind: FieldKind::CategoryName,
    },
];

fn is_person_name(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphabetic() || c == ' ')
}

fn is_category_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_empty_or_null(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case(NULL_TOKEN)
}

// ==========================================
// StudentRowValidator
// ==========================================
// 验证无跨行状态,行之间互不影响
pub struct StudentRowValidator;

impl StudentRowValidator {
    pub fn new() -> Self {
        Self
    }

    /// 验证单行
    ///
    /// # 规则顺序（首个违规即返回）
    /// 1. 必填检查: 任一列缺失、裁剪后为空或等于 null 哨兵
    /// 2. 逐列检查（位置序）: 姓名形状 → 年龄整数 → 院系形状
    ///
    /// # 返回
    /// - Ok(NewStudent): 字段已裁剪、已类型化
    /// - Err(RowValidationError): 携带行号,调用方记入报告
    pub fn validate(&self, row: ImportRow) -> Result<NewStudent, RowValidationError> {
        let fields: Vec<&str> = STUDENT_COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, _)| row.raw_fields.get(idx).map(|s| s.trim()).unwrap_or(""))
            .collect();

        // === 规则 1: 必填检查 ===
        if fields.iter().any(|value| is_empty_or_null(value)) {
            return Err(RowValidationError {
                row_number: row.row_number,
                reason: ValidationReason::EmptyOrNull,
            });
        }

        // === 规则 2: 逐列形状/类型检查 ===
        let mut age: Option<i32> = None;
        for (spec, value) in STUDENT_COLUMNS.iter().zip(fields.iter()) {
            match spec.kind {
                FieldKind::PersonName => {
                    if !is_person_name(value) {
                        return Err(RowValidationError {
                            row_number: row.row_number,
                            reason: ValidationReason::InvalidCharacters,
                        });
                    }
                }
                FieldKind::CategoryName => {
                    if !is_category_name(value) {
                        return Err(RowValidationError {
                            row_number: row.row_number,
                            reason: ValidationReason::InvalidCharacters,
                        });
                    }
                }
                FieldKind::Integer => match value.parse::<i32>() {
                    Ok(parsed) => age = Some(parsed),
                    Err(_) => {
                        return Err(RowValidationError {
                            row_number: row.row_number,
                            reason: ValidationReason::InvalidNumeric {
                                literal: value.to_string(),
                            },
                        });
                    }
                },
            }
        }

        Ok(NewStudent {
            student_name: fields[0].to_string(),
            // 必填与整数检查已通过,此处必有值
            age: age.unwrap_or_default(),
            dept_name: fields[2].to_string(),
        })
    }
}

impl Default for StudentRowValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 校验单条写入请求（api 边界复用同一套字段规则）
pub fn validate_new_student(student: &NewStudent) -> Result<(), ValidationReason> {
    let name = student.student_name.trim();
    let dept = student.dept_name.trim();

    if is_empty_or_null(name) || is_empty_or_null(dept) {
        return Err(ValidationReason::EmptyOrNull);
    }
    if !is_person_name(name) {
        return Err(ValidationReason::InvalidCharacters);
    }
    if !is_category_name(dept) {
        return Err(ValidationReason::InvalidCharacters);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(number: usize, fields: &[&str]) -> ImportRow {
        ImportRow {
            row_number: number,
            raw_fields: fields.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_row() {
        let validator = StudentRowValidator::new();
        let result = validator.validate(row(2, &[" Alice ", "30", "Eng"]));
        assert_eq!(
            result.unwrap(),
            NewStudent {
                student_name: "Alice".to_string(),
                age: 30,
                dept_name: "Eng".to_string(),
            }
        );
    }

    #[test]
    fn test_person_name_allows_spaces() {
        let validator = StudentRowValidator::new();
        assert!(validator
            .validate(row(2, &["Mary Jane", "22", "Sales"]))
            .is_ok());
    }

    #[test]
    fn test_empty_field_rejected() {
        let validator = StudentRowValidator::new();
        let err = validator.validate(row(4, &["Carol", "", "Ops"])).unwrap_err();
        assert_eq!(err.row_number, 4);
        assert_eq!(err.reason, ValidationReason::EmptyOrNull);
    }

    #[test]
    fn test_whitespace_only_field_rejected() {
        let validator = StudentRowValidator::new();
        let err = validator
            .validate(row(5, &["Carol", "20", "   "]))
            .unwrap_err();
        assert_eq!(err.reason, ValidationReason::EmptyOrNull);
    }

    #[test]
    fn test_null_token_rejected_case_insensitive() {
        let validator = StudentRowValidator::new();
        for token in ["null", "NULL", "Null"] {
            let err = validator
                .validate(row(3, &["Dave", token, "Eng"]))
                .unwrap_err();
            assert_eq!(err.reason, ValidationReason::EmptyOrNull);
        }
    }

    #[test]
    fn test_missing_column_rejected_as_empty() {
        let validator = StudentRowValidator::new();
        let err = validator.validate(row(2, &["Alice", "30"])).unwrap_err();
        assert_eq!(err.reason, ValidationReason::EmptyOrNull);
    }

    #[test]
    fn test_name_starting_with_digit_rejected() {
        let validator = StudentRowValidator::new();
        let err = validator
            .validate(row(3, &["1Bob", "25", "Sales"]))
            .unwrap_err();
        assert_eq!(err.reason, ValidationReason::InvalidCharacters);
    }

    #[test]
    fn test_category_with_space_rejected() {
        let validator = StudentRowValidator::new();
        let err = validator
            .validate(row(2, &["Bob", "25", "Computer Science"]))
            .unwrap_err();
        assert_eq!(err.reason, ValidationReason::InvalidCharacters);
    }

    #[test]
    fn test_non_numeric_age_carries_literal() {
        let validator = StudentRowValidator::new();
        let err = validator
            .validate(row(7, &["Bob", "abc", "Sales"]))
            .unwrap_err();
        assert_eq!(
            err.reason,
            ValidationReason::InvalidNumeric {
                literal: "abc".to_string()
            }
        );
        assert_eq!(err.report_line(), "Row 7: invalid numeric value 'abc'");
    }

    #[test]
    fn test_exactly_one_error_per_row() {
        // 姓名与年龄同时违规 → 仅报位置序最靠前的一条
        let validator = StudentRowValidator::new();
        let err = validator
            .validate(row(2, &["9Bob", "abc", "Sales"]))
            .unwrap_err();
        assert_eq!(err.reason, ValidationReason::InvalidCharacters);
    }

    #[test]
    fn test_validate_new_student_reuses_rules() {
        let valid = NewStudent {
            student_name: "Alice".to_string(),
            age: 30,
            dept_name: "Eng".to_string(),
        };
        assert!(validate_new_student(&valid).is_ok());

        let bad_name = NewStudent {
            student_name: "1Alice".to_string(),
            age: 30,
            dept_name: "Eng".to_string(),
        };
        assert_eq!(
            validate_new_student(&bad_name).unwrap_err(),
            ValidationReason::InvalidCharacters
        );
    }
}
