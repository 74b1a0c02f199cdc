use super::entities::{MarkScores, ResultStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateMarkRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub semester_id: i64,
    pub assignment_mark: Option<f64>,
    pub class_test_mark: Option<f64>,
    pub midterm_mark: Option<f64>,
    pub final_exam_mark: Option<f64>,
    pub result_status: Option<ResultStatus>,
}

impl CreateMarkRequest {
    pub fn scores(&self) -> MarkScores {
        MarkScores {
            assignment: self.assignment_mark,
            class_test: self.class_test_mark,
            midterm: self.midterm_mark,
            final_exam: self.final_exam_mark,
        }
    }
}

/// 写入数据库的新成绩（总分与绩点已计算）
#[derive(Debug, Clone)]
pub struct NewMark {
    pub student_id: i64,
    pub subject_id: i64,
    pub semester_id: i64,
    pub scores: MarkScores,
    pub total_mark: f64,
    pub gpa: f64,
    pub result_status: ResultStatus,
}

/// 成绩部分更新；字段缺省表示不修改
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateMarkRequest {
    pub assignment_mark: Option<f64>,
    pub class_test_mark: Option<f64>,
    pub midterm_mark: Option<f64>,
    pub final_exam_mark: Option<f64>,
    pub result_status: Option<ResultStatus>,
    pub result_challenge_payment_status: Option<bool>,
}

impl UpdateMarkRequest {
    pub fn has_score_changes(&self) -> bool {
        self.assignment_mark.is_some()
            || self.class_test_mark.is_some()
            || self.midterm_mark.is_some()
            || self.final_exam_mark.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_score_changes()
            && self.result_status.is_none()
            && self.result_challenge_payment_status.is_none()
    }

    /// 只包含 result_status 字段
    pub fn is_status_only(&self) -> bool {
        self.result_status.is_some()
            && !self.has_score_changes()
            && self.result_challenge_payment_status.is_none()
    }

    /// 与已有分数合并后的结果
    pub fn merged_scores(&self, current: MarkScores) -> MarkScores {
        MarkScores {
            assignment: self.assignment_mark.or(current.assignment),
            class_test: self.class_test_mark.or(current.class_test),
            midterm: self.midterm_mark.or(current.midterm),
            final_exam: self.final_exam_mark.or(current.final_exam),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StudentMarksQuery {
    pub semester_id: Option<i64>,
    pub subject_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResultsQuery {
    pub department_id: i64,
    pub semester_id: i64,
    pub session: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_only_detection() {
        let req: UpdateMarkRequest =
            serde_json::from_str(r#"{"result_status": "challenged"}"#).unwrap();
        assert!(req.is_status_only());

        let req: UpdateMarkRequest =
            serde_json::from_str(r#"{"result_status": "challenged", "final_exam_mark": 50}"#)
                .unwrap();
        assert!(!req.is_status_only());
        assert!(req.has_score_changes());
    }

    #[test]
    fn test_unknown_fields_rejected() {
        assert!(serde_json::from_str::<UpdateMarkRequest>(r#"{"total_mark": 100}"#).is_err());
    }

    #[test]
    fn test_merged_scores_keep_existing_values() {
        let req = UpdateMarkRequest {
            final_exam_mark: Some(70.0),
            ..Default::default()
        };
        let merged = req.merged_scores(MarkScores {
            assignment: Some(10.0),
            class_test: None,
            midterm: Some(15.0),
            final_exam: Some(40.0),
        });
        assert_eq!(merged.assignment, Some(10.0));
        assert_eq!(merged.class_test, None);
        assert_eq!(merged.final_exam, Some(70.0));
    }
}
