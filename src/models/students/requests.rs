use serde::{Deserialize, Serialize};

/// 创建学生（同时创建登录账号）
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateStudentRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub name: String,
    pub registration: String,
    pub session: String,
    pub department_id: i64,
    pub semester_id: i64,
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

/// 学生档案部分更新；只有出现的字段会被写入
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub registration: Option<String>,
    pub session: Option<String>,
    pub department_id: Option<i64>,
    pub semester_id: Option<i64>,
    pub present_address: Option<String>,
    pub permanent_address: Option<String>,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub mobile_number: Option<String>,
    pub photo_url: Option<String>,
}

impl UpdateStudentRequest {
    pub fn is_empty(&self) -> bool {
        !self.touches_academic_fields()
            && self.present_address.is_none()
            && self.permanent_address.is_none()
            && self.date_of_birth.is_none()
            && self.mobile_number.is_none()
            && self.photo_url.is_none()
    }

    /// 学生本人不能修改的字段
    pub fn touches_academic_fields(&self) -> bool {
        self.name.is_some()
            || self.registration.is_some()
            || self.session.is_some()
            || self.department_id.is_some()
            || self.semester_id.is_some()
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub semester_id: Option<i64>,
    pub session: Option<String>,
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_only_update() {
        let update: UpdateStudentRequest =
            serde_json::from_str(r#"{"mobile_number": "0123", "present_address": "Dhaka"}"#)
                .unwrap();
        assert!(!update.is_empty());
        assert!(!update.touches_academic_fields());

        let update: UpdateStudentRequest =
            serde_json::from_str(r#"{"registration": "2020-1"}"#).unwrap();
        assert!(update.touches_academic_fields());

        assert!(UpdateStudentRequest::default().is_empty());
    }
}
