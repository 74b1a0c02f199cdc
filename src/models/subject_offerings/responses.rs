use super::entities::SubjectOffering;
use crate::models::{common::PaginatedResponse, subjects::entities::Subject};
use serde::Serialize;

pub type SubjectOfferingListResponse = PaginatedResponse<SubjectOffering>;

/// 某院系某学期开设的课程
#[derive(Debug, Clone, Serialize)]
pub struct OfferedSubject {
    pub offering_id: i64,
    pub teacher_id: Option<i64>,
    pub subject: Subject,
}
