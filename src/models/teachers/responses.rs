use super::entities::Teacher;
use crate::models::{common::PaginatedResponse, users::entities::User};
use serde::Serialize;

pub type TeacherListResponse = PaginatedResponse<Teacher>;

/// 教师档案及其登录账号
#[derive(Debug, Serialize)]
pub struct TeacherDetailResponse {
    #[serde(flatten)]
    pub teacher: Teacher,
    pub user: Option<User>,
}
