pub mod audit;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod departments;
pub mod marks;
pub mod semesters;
pub mod students;
pub mod subject_offerings;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery, normalize_page};

use serde::{Deserialize, Serialize};

/// 业务错误码（出现在响应体的 `code` 字段）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1005,
    Conflict = 1009,
    ValidationFailed = 1010,
    IntegrityViolation = 1011,

    // 认证
    AuthFailed = 2000,
    UserInactive = 2001,

    // 用户
    UserNotFound = 2100,

    // 院系 / 学期 / 课程
    DepartmentNotFound = 3000,
    SemesterNotFound = 3100,
    SubjectNotFound = 3200,

    // 学生 / 教师
    StudentNotFound = 4000,
    TeacherNotFound = 4100,

    // 开课
    SubjectOfferingNotFound = 5000,

    // 成绩
    MarkNotFound = 6000,
}

/// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
