//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。
//! 数据库唯一约束 / 外键约束冲突会经过 [`crate::utils::integrity`] 翻译为
//! [`DomainIntegrityError`]，同时保留原始错误信息供审计日志使用。

use std::fmt;

/// 领域完整性错误：面向用户的可读信息 + 数据库原始错误
#[derive(Debug, Clone, PartialEq)]
pub struct DomainIntegrityError {
    pub error_message: String,
    pub raw_error: String,
}

impl DomainIntegrityError {
    pub fn new(error_message: impl Into<String>, raw_error: impl Into<String>) -> Self {
        Self {
            error_message: error_message.into(),
            raw_error: raw_error.into(),
        }
    }

    /// 从数据库原始错误信息构造（自动翻译）
    pub fn from_raw(raw_error: impl Into<String>) -> Self {
        let raw_error = raw_error.into();
        let error_message = crate::utils::integrity::parse_integrity_error(&raw_error);
        Self {
            error_message,
            raw_error,
        }
    }
}

impl fmt::Display for DomainIntegrityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error_message)
    }
}

/// 错误分类，HTTP 层据此选择状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Conflict,
    NotFound,
    Forbidden,
    Validation,
    Authentication,
    Unexpected,
}

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义（外加固定的 `Integrity` 变体）
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - kind() 方法 - 返回错误分类
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_records_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $kind:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum RecordsError {
            $($variant(String),)*
            Integrity(DomainIntegrityError),
        }

        impl RecordsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $code,)*
                    RecordsError::Integrity(_) => "E012",
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(RecordsError::$variant(_) => $type_name,)*
                    RecordsError::Integrity(_) => "Integrity Constraint Violation",
                }
            }

            /// 获取错误分类
            pub fn kind(&self) -> ErrorKind {
                match self {
                    $(RecordsError::$variant(_) => ErrorKind::$kind,)*
                    RecordsError::Integrity(_) => ErrorKind::Conflict,
                }
            }

            /// 获取错误详情（面向用户）
            pub fn message(&self) -> &str {
                match self {
                    $(RecordsError::$variant(msg) => msg,)*
                    RecordsError::Integrity(e) => &e.error_message,
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl RecordsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        RecordsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_records_errors! {
    DatabaseConfig("E001", "Database Configuration Error", Unexpected),
    DatabaseConnection("E002", "Database Connection Error", Unexpected),
    DatabaseOperation("E003", "Database Operation Error", Unexpected),
    Validation("E004", "Validation Error", Validation),
    NotFound("E005", "Resource Not Found", NotFound),
    Conflict("E006", "Conflict", Conflict),
    Forbidden("E007", "Forbidden", Forbidden),
    Authentication("E008", "Authentication Error", Authentication),
    Serialization("E009", "Serialization Error", Unexpected),
    DateParse("E010", "Date Parse Error", Validation),
    CacheConnection("E011", "Cache Connection Error", Unexpected),
}

impl RecordsError {
    /// 数据库原始错误（仅 Integrity 变体携带）
    pub fn raw_error(&self) -> Option<&str> {
        match self {
            RecordsError::Integrity(e) => Some(&e.raw_error),
            _ => None,
        }
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for RecordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for RecordsError {}

impl From<DomainIntegrityError> for RecordsError {
    fn from(err: DomainIntegrityError) -> Self {
        RecordsError::Integrity(err)
    }
}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for RecordsError {
    fn from(err: sea_orm::DbErr) -> Self {
        match crate::utils::integrity::constraint_violation_message(&err) {
            Some(raw) => RecordsError::Integrity(DomainIntegrityError::from_raw(raw)),
            None => RecordsError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RecordsError {
    fn from(err: serde_json::Error) -> Self {
        RecordsError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for RecordsError {
    fn from(err: chrono::ParseError) -> Self {
        RecordsError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RecordsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(RecordsError::database_config("test").code(), "E001");
        assert_eq!(RecordsError::validation("test").code(), "E004");
        assert_eq!(RecordsError::conflict("test").code(), "E006");
        assert_eq!(RecordsError::authentication("test").code(), "E008");
        assert_eq!(
            RecordsError::from(DomainIntegrityError::new("dup", "raw")).code(),
            "E012"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(RecordsError::not_found("x").kind(), ErrorKind::NotFound);
        assert_eq!(RecordsError::forbidden("x").kind(), ErrorKind::Forbidden);
        assert_eq!(RecordsError::conflict("x").kind(), ErrorKind::Conflict);
        assert_eq!(
            RecordsError::database_operation("x").kind(),
            ErrorKind::Unexpected
        );
        assert_eq!(
            RecordsError::from(DomainIntegrityError::new("dup", "raw")).kind(),
            ErrorKind::Conflict
        );
    }

    #[test]
    fn test_integrity_keeps_raw_error_out_of_message() {
        let err = RecordsError::from(DomainIntegrityError::new(
            "A department named 'cse' already exists.",
            "duplicate key value violates unique constraint \"departments_department_name_key\"",
        ));
        assert_eq!(err.message(), "A department named 'cse' already exists.");
        assert!(err.raw_error().unwrap().contains("departments_department_name_key"));
        assert!(!err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_from_raw_translates() {
        let err = DomainIntegrityError::from_raw("UNIQUE constraint failed: subjects.subject_code");
        assert_eq!(err.error_message, "A subject with code '' already exists.");
        assert_eq!(err.raw_error, "UNIQUE constraint failed: subjects.subject_code");
    }

    #[test]
    fn test_format_simple() {
        let err = RecordsError::validation("Invalid score");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid score"));
    }
}
