use super::SeaOrmStorage;
use crate::entity::marks::{ActiveModel, Column, Entity as Marks, Relation};
use crate::entity::students::Column as StudentColumn;
use crate::errors::{RecordsError, Result};
use crate::models::marks::{
    entities::Mark,
    requests::{NewMark, ResultsQuery, StudentMarksQuery},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

pub const MSG_MARK_CHANGED: &str =
    "This mark was changed by another request. Please reload it and try again.";

fn nullable_eq<V: Into<sea_orm::Value>>(column: Column, value: Option<V>) -> Condition {
    match value {
        Some(v) => Condition::all().add(column.eq(v)),
        None => Condition::all().add(column.is_null()),
    }
}

// 读取时的快照：状态、缴费、复核时间、四项分数与更新时间都未变化
fn unchanged_since(expected: &Mark) -> Condition {
    Condition::all()
        .add(Column::Id.eq(expected.id))
        .add(Column::ResultStatus.eq(expected.result_status.to_string()))
        .add(nullable_eq(
            Column::ResultChallengePaymentStatus,
            expected.result_challenge_payment_status,
        ))
        .add(nullable_eq(
            Column::ChallengedAt,
            expected.challenged_at.map(|t| t.timestamp()),
        ))
        .add(nullable_eq(Column::AssignmentMark, expected.assignment_mark))
        .add(nullable_eq(Column::ClassTestMark, expected.class_test_mark))
        .add(nullable_eq(Column::MidtermMark, expected.midterm_mark))
        .add(nullable_eq(Column::FinalExamMark, expected.final_exam_mark))
        .add(Column::UpdatedAt.eq(expected.updated_at.timestamp()))
}

impl SeaOrmStorage {
    pub async fn create_mark_impl(&self, mark: NewMark) -> Result<Mark> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            student_id: Set(mark.student_id),
            subject_id: Set(mark.subject_id),
            semester_id: Set(mark.semester_id),
            assignment_mark: Set(mark.scores.assignment),
            class_test_mark: Set(mark.scores.class_test),
            midterm_mark: Set(mark.scores.midterm),
            final_exam_mark: Set(mark.scores.final_exam),
            total_mark: Set(mark.total_mark),
            gpa: Set(mark.gpa),
            result_status: Set(mark.result_status.to_string()),
            result_challenge_payment_status: Set(None),
            challenged_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into_mark())
    }

    pub async fn get_mark_by_id_impl(&self, id: i64) -> Result<Option<Mark>> {
        let result = Marks::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("Failed to query mark: {e}")))?;

        Ok(result.map(|m| m.into_mark()))
    }

    pub async fn find_mark_impl(
        &self,
        student_id: i64,
        subject_id: i64,
        semester_id: i64,
    ) -> Result<Option<Mark>> {
        let result = Marks::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::SubjectId.eq(subject_id))
            .filter(Column::SemesterId.eq(semester_id))
            .one(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("Failed to query mark: {e}")))?;

        Ok(result.map(|m| m.into_mark()))
    }

    /// 写回状态机计算后的成绩（身份字段不变）
    ///
    /// 只有当前行仍与 `expected` 一致时才写入；读取之后被其他请求修改过则返回冲突。
    pub async fn save_mark_impl(&self, expected: &Mark, mark: Mark) -> Result<Mark> {
        let txn = self.db.begin().await?;

        let changes = ActiveModel {
            assignment_mark: Set(mark.assignment_mark),
            class_test_mark: Set(mark.class_test_mark),
            midterm_mark: Set(mark.midterm_mark),
            final_exam_mark: Set(mark.final_exam_mark),
            total_mark: Set(mark.total_mark),
            gpa: Set(mark.gpa),
            result_status: Set(mark.result_status.to_string()),
            result_challenge_payment_status: Set(mark.result_challenge_payment_status),
            challenged_at: Set(mark.challenged_at.map(|t| t.timestamp())),
            updated_at: Set(mark.updated_at.timestamp()),
            ..Default::default()
        };

        let result = Marks::update_many()
            .set(changes)
            .filter(unchanged_since(expected))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            let exists = Marks::find_by_id(expected.id).one(&txn).await?.is_some();
            return Err(if exists {
                RecordsError::conflict(MSG_MARK_CHANGED)
            } else {
                RecordsError::not_found("Mark not found.")
            });
        }

        let Some(updated) = Marks::find_by_id(expected.id).one(&txn).await? else {
            return Err(RecordsError::not_found("Mark not found."));
        };
        txn.commit().await?;

        Ok(updated.into_mark())
    }

    pub async fn delete_mark_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = Marks::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_marks_for_student_impl(
        &self,
        student_id: i64,
        query: StudentMarksQuery,
    ) -> Result<Vec<Mark>> {
        let mut select = Marks::find().filter(Column::StudentId.eq(student_id));

        if let Some(semester_id) = query.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        let items = select
            .order_by_asc(Column::SemesterId)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("Failed to list marks: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_mark()).collect())
    }

    pub async fn list_marks_for_subject_impl(&self, subject_id: i64) -> Result<Vec<Mark>> {
        let items = Marks::find()
            .filter(Column::SubjectId.eq(subject_id))
            .order_by_asc(Column::SemesterId)
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(|e| RecordsError::database_operation(format!("Failed to list marks: {e}")))?;

        Ok(items.into_iter().map(|m| m.into_mark()).collect())
    }

    /// 某院系某届学生在指定学期的成绩
    pub async fn list_department_results_impl(&self, query: ResultsQuery) -> Result<Vec<Mark>> {
        let items = Marks::find()
            .join(JoinType::InnerJoin, Relation::Student.def())
            .filter(StudentColumn::DepartmentId.eq(query.department_id))
            .filter(StudentColumn::Session.eq(query.session.trim()))
            .filter(Column::SemesterId.eq(query.semester_id))
            .order_by_asc(Column::StudentId)
            .order_by_asc(Column::SubjectId)
            .all(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to list results: {e}"))
            })?;

        Ok(items.into_iter().map(|m| m.into_mark()).collect())
    }
}
