use super::entities::Semester;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SemesterListResponse {
    pub items: Vec<Semester>,
}
