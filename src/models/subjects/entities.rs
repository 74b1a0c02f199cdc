use serde::{Deserialize, Serialize};

// 课程
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub subject_title: String,
    pub subject_code: String,
    pub credits: f64,
    pub semester_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
