use super::entities::Student;
use crate::models::{common::PaginatedResponse, users::entities::User};
use serde::Serialize;

pub type StudentListResponse = PaginatedResponse<Student>;

/// 学生档案及其登录账号
#[derive(Debug, Serialize)]
pub struct StudentDetailResponse {
    #[serde(flatten)]
    pub student: Student,
    pub user: Option<User>,
}
