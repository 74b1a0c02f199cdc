use serde::{Deserialize, Serialize};

// 成绩发布状态
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    #[default]
    Unpublished, // 未发布
    Published,  // 已发布
    Challenged, // 学生申请复核
    Resolved,   // 复核完成
}

impl ResultStatus {
    pub const UNPUBLISHED: &'static str = "unpublished";
    pub const PUBLISHED: &'static str = "published";
    pub const CHALLENGED: &'static str = "challenged";
    pub const RESOLVED: &'static str = "resolved";
}

impl<'de> Deserialize<'de> for ResultStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<ResultStatus>().map_err(|_| {
            serde::de::Error::custom(format!(
                "Invalid result status: '{s}'. Supported: unpublished, published, challenged, resolved"
            ))
        })
    }
}

impl std::fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultStatus::Unpublished => write!(f, "{}", ResultStatus::UNPUBLISHED),
            ResultStatus::Published => write!(f, "{}", ResultStatus::PUBLISHED),
            ResultStatus::Challenged => write!(f, "{}", ResultStatus::CHALLENGED),
            ResultStatus::Resolved => write!(f, "{}", ResultStatus::RESOLVED),
        }
    }
}

impl std::str::FromStr for ResultStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ResultStatus::UNPUBLISHED => Ok(ResultStatus::Unpublished),
            ResultStatus::PUBLISHED => Ok(ResultStatus::Published),
            ResultStatus::CHALLENGED => Ok(ResultStatus::Challenged),
            ResultStatus::RESOLVED => Ok(ResultStatus::Resolved),
            _ => Err(format!("Invalid result status: {s}")),
        }
    }
}

/// 一名学生在某学期某课程的成绩
///
/// `total_mark` 与 `gpa` 由四项原始分数推导，任一原始分数变化都必须重新计算。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Mark {
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub semester_id: i64,
    pub assignment_mark: Option<f64>,
    pub class_test_mark: Option<f64>,
    pub midterm_mark: Option<f64>,
    pub final_exam_mark: Option<f64>,
    pub total_mark: f64,
    pub gpa: f64,
    pub result_status: ResultStatus,
    /// None：未申请复核；Some(false)：待缴费；Some(true)：已缴费
    pub result_challenge_payment_status: Option<bool>,
    pub challenged_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 四项原始分数
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkScores {
    pub assignment: Option<f64>,
    pub class_test: Option<f64>,
    pub midterm: Option<f64>,
    pub final_exam: Option<f64>,
}

impl Mark {
    pub fn scores(&self) -> MarkScores {
        MarkScores {
            assignment: self.assignment_mark,
            class_test: self.class_test_mark,
            midterm: self.midterm_mark,
            final_exam: self.final_exam_mark,
        }
    }
}
