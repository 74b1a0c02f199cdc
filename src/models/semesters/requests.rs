use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSemesterRequest {
    pub semester_name: String,
    pub semester_number: i32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateSemesterRequest {
    pub semester_name: Option<String>,
    pub semester_number: Option<i32>,
}
