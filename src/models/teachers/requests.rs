use serde::{Deserialize, Serialize};

/// 创建教师（同时创建登录账号）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateTeacherRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub department_id: Option<i64>,
    #[serde(default)]
    pub present_address: String,
    #[serde(default)]
    pub permanent_address: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub photo_url: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateTeacherRequest {
    pub name: Option<String>,
    pub department_id: Option<i64>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub mobile_number: Option<String>,
    pub photo_url: Option<String>,
}

impl UpdateTeacherRequest {
    pub fn is_empty(&self) -> bool {
        !self.touches_profile_fields()
            && self.present_address.is_none()
            && self.permanent_address.is_none()
            && self.date_of_birth.is_none()
            && self.mobile_number.is_none()
            && self.photo_url.is_none()
    }

    /// 教师本人不能修改的字段
    pub fn touches_profile_fields(&self) -> bool {
        self.name.is_some() || self.department_id.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub search: Option<String>,
}
