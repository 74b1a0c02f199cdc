use serde::{Deserialize, Serialize};

/// 开课：某教师在某院系讲授某课程（teacher_id 为空表示尚未分配教师）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectOffering {
    pub id: i64,
    pub department_id: i64,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
