//! 输入校验
//!
//! 所有函数返回 [`RecordsError::Validation`]，HTTP 层统一映射为 400。

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{RecordsError, Result};
use crate::models::marks::entities::MarkScores;

/// 期末考试满分
pub const FINAL_EXAM_MAX: f64 = 80.0;
/// 平时成绩（作业 + 小测 + 期中）满分
pub const INCOURSE_MAX: f64 = 60.0;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static SUBJECT_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3,5}-\d{3,6}$").expect("Invalid subject code regex"));

pub fn validate_username(username: &str) -> Result<()> {
    if username.len() < 3 || username.len() > 32 {
        return Err(RecordsError::validation(
            "Username length must be between 3 and 32 characters",
        ));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(RecordsError::validation(
            "Username must contain only letters, numbers, dots, underscores or hyphens",
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<()> {
    if !EMAIL_RE.is_match(email) {
        return Err(RecordsError::validation("Email format is invalid"));
    }
    Ok(())
}

/// 密码策略：至少 8 位，同时包含字母和数字
pub fn validate_password(password: &str) -> Result<()> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push("Password must contain at least one letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    let weak_passwords = ["password1", "12345678a", "qwerty123", "admin123"];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(RecordsError::validation(errors.join("; ")))
    }
}

/// 名称类字段：去除首尾空白并转小写，不能为空
pub fn normalize_name(field: &str, value: &str) -> Result<String> {
    let normalized = value.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(RecordsError::validation(format!("{field} cannot be empty")));
    }
    Ok(normalized)
}

/// 非空文本字段（保留大小写）
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordsError::validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

/// 课程代码统一为大写，格式如 `CSE-101`
pub fn normalize_subject_code(code: &str) -> Result<String> {
    let code = code.trim().to_uppercase();
    if !SUBJECT_CODE_RE.is_match(&code) {
        return Err(RecordsError::validation(
            "Subject code must look like 'CSE-101' (3-5 letters, a hyphen, 3-6 digits)",
        ));
    }
    Ok(code)
}

pub fn validate_credits(credits: f64) -> Result<()> {
    if !credits.is_finite() || credits <= 0.0 {
        return Err(RecordsError::validation("Credits must be greater than 0"));
    }
    Ok(())
}

pub fn validate_semester_number(number: i32) -> Result<()> {
    if number < 1 {
        return Err(RecordsError::validation(
            "Semester number must be at least 1",
        ));
    }
    Ok(())
}

/// 成绩分数校验（对合并后的完整分数进行）
pub fn validate_scores(scores: &MarkScores) -> Result<()> {
    let fields = [
        ("assignment_mark", scores.assignment),
        ("class_test_mark", scores.class_test),
        ("midterm_mark", scores.midterm),
        ("final_exam_mark", scores.final_exam),
    ];

    for (name, value) in fields {
        if let Some(v) = value
            && (!v.is_finite() || v < 0.0)
        {
            return Err(RecordsError::validation(format!(
                "{name} must be a non-negative number"
            )));
        }
    }

    if scores.final_exam.unwrap_or(0.0) > FINAL_EXAM_MAX {
        return Err(RecordsError::validation(format!(
            "final_exam_mark cannot exceed {FINAL_EXAM_MAX}"
        )));
    }

    let incourse = scores.assignment.unwrap_or(0.0)
        + scores.class_test.unwrap_or(0.0)
        + scores.midterm.unwrap_or(0.0);
    if incourse > INCOURSE_MAX {
        return Err(RecordsError::validation(format!(
            "assignment, class test and midterm marks together cannot exceed {INCOURSE_MAX}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(a: f64, c: f64, m: f64, f: f64) -> MarkScores {
        MarkScores {
            assignment: Some(a),
            class_test: Some(c),
            midterm: Some(m),
            final_exam: Some(f),
        }
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("secure2024").is_ok());
        assert!(validate_password("short1").is_err());
        assert!(validate_password("onlyletters").is_err());
        assert!(validate_password("Admin123").is_err());
    }

    #[test]
    fn test_username_and_email() {
        assert!(validate_username("john.doe").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username("bad name").is_err());
        assert!(validate_email("a@b.edu").is_ok());
        assert!(validate_email("not-an-email").is_err());
    }

    #[test]
    fn test_subject_code_normalized() {
        assert_eq!(normalize_subject_code(" cse-101 ").unwrap(), "CSE-101");
        assert_eq!(normalize_subject_code("MATH-202300").unwrap(), "MATH-202300");
        assert!(normalize_subject_code("CS-101").is_err());
        assert!(normalize_subject_code("CSE101").is_err());
        assert!(normalize_subject_code("CSE-12").is_err());
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(
            normalize_name("department_name", "  Computer Science ").unwrap(),
            "computer science"
        );
        assert!(normalize_name("department_name", "   ").is_err());
    }

    #[test]
    fn test_score_limits() {
        assert!(validate_scores(&scores(20.0, 20.0, 20.0, 80.0)).is_ok());
        assert!(validate_scores(&MarkScores::default()).is_ok());
        assert!(validate_scores(&scores(20.0, 20.0, 20.1, 0.0)).is_err());
        assert!(validate_scores(&scores(0.0, 0.0, 0.0, 80.5)).is_err());
        assert!(validate_scores(&scores(-1.0, 0.0, 0.0, 0.0)).is_err());
        assert!(validate_scores(&scores(f64::NAN, 0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_credits_and_semester_number() {
        assert!(validate_credits(3.0).is_ok());
        assert!(validate_credits(0.0).is_err());
        assert!(validate_semester_number(1).is_ok());
        assert!(validate_semester_number(0).is_err());
    }
}
