use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSubjectRequest {
    pub subject_title: String,
    pub subject_code: String,
    pub credits: f64,
    pub semester_id: i64,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateSubjectRequest {
    pub subject_title: Option<String>,
    pub subject_code: Option<String>,
    pub credits: Option<f64>,
    pub semester_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubjectListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub semester_id: Option<i64>,
    pub search: Option<String>,
}
