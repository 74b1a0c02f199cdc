//! 成绩实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "marks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub semester_id: i64,
    #[sea_orm(column_type = "Double", nullable)]
    pub assignment_mark: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub class_test_mark: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub midterm_mark: Option<f64>,
    #[sea_orm(column_type = "Double", nullable)]
    pub final_exam_mark: Option<f64>,
    #[sea_orm(column_type = "Double")]
    pub total_mark: f64,
    #[sea_orm(column_type = "Double")]
    pub gpa: f64,
    pub result_status: String,
    pub result_challenge_payment_status: Option<bool>,
    pub challenged_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
    #[sea_orm(
        belongs_to = "super::semesters::Entity",
        from = "Column::SemesterId",
        to = "super::semesters::Column::Id"
    )]
    Semester,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::semesters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Semester.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_mark(self) -> crate::models::marks::entities::Mark {
        use crate::models::marks::entities::{Mark, ResultStatus};

        Mark {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            semester_id: self.semester_id,
            assignment_mark: self.assignment_mark,
            class_test_mark: self.class_test_mark,
            midterm_mark: self.midterm_mark,
            final_exam_mark: self.final_exam_mark,
            total_mark: self.total_mark,
            gpa: self.gpa,
            result_status: self
                .result_status
                .parse::<ResultStatus>()
                .unwrap_or_default(),
            result_challenge_payment_status: self.result_challenge_payment_status,
            challenged_at: self.challenged_at.map(super::to_datetime),
            created_at: super::to_datetime(self.created_at),
            updated_at: super::to_datetime(self.updated_at),
        }
    }
}
