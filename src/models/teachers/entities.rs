use serde::{Deserialize, Serialize};

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Teacher {
    pub id: i64,
    pub name: String,
    pub department_id: Option<i64>,
    pub user_id: i64,
    pub present_address: String,
    pub permanent_address: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub mobile_number: String,
    pub photo_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
