//! 完整性错误翻译
//!
//! 将数据库唯一约束冲突信息翻译为可读的提示。规则表按顺序匹配，第一个命中的规则生效。
//! 每条规则同时匹配约束名（PostgreSQL / MySQL）与 `表.列` 签名（SQLite / MySQL 8），
//! 因此三种后端会得到相同的提示。

use once_cell::sync::Lazy;
use regex::Regex;
use sea_orm::{DbErr, RuntimeErr, SqlErr};

/// 无法识别约束时的默认提示
pub const FALLBACK_MESSAGE: &str =
    "This record already exists or violates a database constraint. Please check your data.";

/// PostgreSQL DETAIL 片段：`Key (column)=(value)`
static KEY_VALUE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Key \(([^)]*)\)=\((.*?)\)").expect("Invalid key-value regex"));

/// 一条翻译规则
pub struct ConstraintRule {
    /// 任一子串命中即视为匹配
    pub matchers: &'static [&'static str],
    /// 需要从 `Key (column)=(value)` 中提取值的列名
    pub value_column: Option<&'static str>,
    /// 提示模板，`{value}` 会被替换为提取到的值
    pub template: &'static str,
}

pub static CONSTRAINT_RULES: &[ConstraintRule] = &[
    // 学生表
    ConstraintRule {
        matchers: &["students_registration_key", "students.registration"],
        value_column: Some("registration"),
        template: "Registration number '{value}' already exists in our records.",
    },
    ConstraintRule {
        matchers: &["students_user_id_key", "students.user_id"],
        value_column: None,
        template: "This user is already assigned to another student profile.",
    },
    // 用户表
    ConstraintRule {
        matchers: &["users_username_key", "users.username"],
        value_column: Some("username"),
        template: "The username '{value}' is already registered.",
    },
    ConstraintRule {
        matchers: &["users_email_key", "users.email"],
        value_column: Some("email"),
        template: "The email address '{value}' is already registered.",
    },
    // 教师表
    ConstraintRule {
        matchers: &["teachers_user_id_key", "teachers.user_id"],
        value_column: None,
        template: "This user is already assigned to another teacher profile.",
    },
    // 院系表
    ConstraintRule {
        matchers: &[
            "departments_department_name_key",
            "departments.department_name",
        ],
        value_column: Some("department_name"),
        template: "A department named '{value}' already exists.",
    },
    // 学期表
    ConstraintRule {
        matchers: &["semesters_semester_name_key", "semesters.semester_name"],
        value_column: Some("semester_name"),
        template: "Semester name '{value}' already exists.",
    },
    ConstraintRule {
        matchers: &["semesters_semester_number_key", "semesters.semester_number"],
        value_column: Some("semester_number"),
        template: "Semester number '{value}' is already assigned.",
    },
    // 课程表
    ConstraintRule {
        matchers: &["subjects_subject_code_key", "subjects.subject_code"],
        value_column: Some("subject_code"),
        template: "A subject with code '{value}' already exists.",
    },
    // 开课表
    ConstraintRule {
        matchers: &[
            "unique_subject_offering",
            "subject_offerings.department_id, subject_offerings.subject_id, subject_offerings.teacher_id",
        ],
        value_column: None,
        template: "This teacher is already assigned to this subject in the selected department.",
    },
    // 未分配教师的开课
    ConstraintRule {
        matchers: &[
            "unique_unassigned_subject_offering",
            "subject_offerings.department_id, subject_offerings.subject_id",
        ],
        value_column: None,
        template: "This subject is already offered without a teacher in the selected department.",
    },
    // 成绩表
    ConstraintRule {
        matchers: &[
            "unique_mark_record",
            "marks.student_id, marks.subject_id, marks.semester_id",
        ],
        value_column: None,
        template: "A mark entry already exists for this student in the selected subject and semester.",
    },
];

/// 从原始信息中提取指定列的值，提取失败返回空串
fn extract_key_value(error_msg: &str, column: &str) -> String {
    KEY_VALUE_RE
        .captures_iter(error_msg)
        .find(|caps| caps.get(1).map(|m| m.as_str()) == Some(column))
        .and_then(|caps| caps.get(2))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

impl ConstraintRule {
    fn matches(&self, error_msg: &str) -> bool {
        self.matchers.iter().any(|m| error_msg.contains(m))
    }

    fn render(&self, error_msg: &str) -> String {
        match self.value_column {
            Some(column) => self
                .template
                .replace("{value}", &extract_key_value(error_msg, column)),
            None => self.template.to_string(),
        }
    }
}

/// 将数据库原始错误信息翻译为可读提示（纯函数，永不失败）
pub fn parse_integrity_error(error_msg: &str) -> String {
    CONSTRAINT_RULES
        .iter()
        .find(|rule| rule.matches(error_msg))
        .map(|rule| rule.render(error_msg))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// 如果是约束冲突，返回完整的原始错误信息（PostgreSQL 会附带 DETAIL）
pub fn constraint_violation_message(err: &DbErr) -> Option<String> {
    let message = match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg))
        | Some(SqlErr::ForeignKeyConstraintViolation(msg)) => msg,
        _ => return None,
    };

    match postgres_detail(err) {
        Some(detail) => Some(format!("{message}\nDETAIL:  {detail}")),
        None => Some(message),
    }
}

fn postgres_detail(err: &DbErr) -> Option<String> {
    use sea_orm::sqlx::postgres::PgDatabaseError;

    match err {
        DbErr::Exec(RuntimeErr::SqlxError(e)) | DbErr::Query(RuntimeErr::SqlxError(e)) => e
            .as_database_error()
            .and_then(|db_err| db_err.try_downcast_ref::<PgDatabaseError>())
            .and_then(|pg| pg.detail())
            .map(|d| d.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_postgres_registration_with_value() {
        let raw = "duplicate key value violates unique constraint \"students_registration_key\"\n\
                   DETAIL:  Key (registration)=(12345) already exists.";
        assert_eq!(
            parse_integrity_error(raw),
            "Registration number '12345' already exists in our records."
        );
    }

    #[test]
    fn test_postgres_username_with_value() {
        let raw = "duplicate key value violates unique constraint \"users_username_key\"\n\
                   DETAIL:  Key (username)=(alice) already exists.";
        assert_eq!(
            parse_integrity_error(raw),
            "The username 'alice' is already registered."
        );
    }

    #[test]
    fn test_sqlite_signature_matches() {
        assert_eq!(
            parse_integrity_error(
                "UNIQUE constraint failed: marks.student_id, marks.subject_id, marks.semester_id"
            ),
            "A mark entry already exists for this student in the selected subject and semester."
        );
        assert_eq!(
            parse_integrity_error("UNIQUE constraint failed: teachers.user_id"),
            "This user is already assigned to another teacher profile."
        );
    }

    #[test]
    fn test_unassigned_offering_signature_does_not_shadow_full_triple() {
        assert_eq!(
            parse_integrity_error(
                "UNIQUE constraint failed: subject_offerings.department_id, subject_offerings.subject_id"
            ),
            "This subject is already offered without a teacher in the selected department."
        );
        assert_eq!(
            parse_integrity_error(
                "UNIQUE constraint failed: subject_offerings.department_id, \
                 subject_offerings.subject_id, subject_offerings.teacher_id"
            ),
            "This teacher is already assigned to this subject in the selected department."
        );
        assert!(
            parse_integrity_error(
                "duplicate key value violates unique constraint \"unique_unassigned_subject_offering\""
            )
            .starts_with("This subject is already offered without a teacher")
        );
    }

    #[test]
    fn test_mysql_key_name_matches() {
        let raw = "Duplicate entry '1-1-1' for key 'marks.unique_mark_record'";
        assert!(parse_integrity_error(raw).starts_with("A mark entry already exists"));
    }

    #[test]
    fn test_unknown_constraint_falls_back() {
        assert_eq!(
            parse_integrity_error("violates constraint \"something_else\""),
            FALLBACK_MESSAGE
        );
        assert_eq!(parse_integrity_error(""), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_malformed_key_fragment_gives_empty_value() {
        let raw = "duplicate key value violates unique constraint \"subjects_subject_code_key\"\n\
                   DETAIL:  Key subject_code=CSE-101 already exists.";
        assert_eq!(
            parse_integrity_error(raw),
            "A subject with code '' already exists."
        );
    }

    #[test]
    fn test_key_fragment_for_other_column_is_ignored() {
        let raw = "duplicate key value violates unique constraint \"users_email_key\"\n\
                   DETAIL:  Key (username)=(bob) already exists.";
        assert_eq!(
            parse_integrity_error(raw),
            "The email address '' is already registered."
        );
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // 同时包含两个约束签名时，按表顺序取第一条
        let raw = "students.registration / users.username";
        assert!(parse_integrity_error(raw).starts_with("Registration number"));
    }
}
