use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateSubjectOfferingRequest {
    pub department_id: i64,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
}

/// 开课部分更新
///
/// `teacher_id` 区分三种情况：字段缺省（不修改）、`null`（取消分配）、具体 id。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateSubjectOfferingRequest {
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub teacher_id: Option<Option<i64>>,
}

impl UpdateSubjectOfferingRequest {
    pub fn is_empty(&self) -> bool {
        self.department_id.is_none() && self.subject_id.is_none() && self.teacher_id.is_none()
    }
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubjectOfferingListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub subject_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OfferedSubjectsQuery {
    pub semester_id: i64,
    pub department_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_id_absent_null_and_value() {
        let absent: UpdateSubjectOfferingRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.teacher_id, None);
        assert!(absent.is_empty());

        let cleared: UpdateSubjectOfferingRequest =
            serde_json::from_str(r#"{"teacher_id": null}"#).unwrap();
        assert_eq!(cleared.teacher_id, Some(None));

        let assigned: UpdateSubjectOfferingRequest =
            serde_json::from_str(r#"{"teacher_id": 4}"#).unwrap();
        assert_eq!(assigned.teacher_id, Some(Some(4)));
    }
}
