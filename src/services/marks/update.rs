use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};

use super::{MarkService, is_student_self, teaches_subject, workflow};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{entities::Mark, requests::UpdateMarkRequest},
    users::entities::{Actor, UserRole},
};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;

const ACTION: &str = "UPDATE MARK";

pub const MSG_NOT_SUBJECT_TEACHER: &str =
    "You are not authorized to update marks for this subject.";
pub const MSG_NOT_OWN_RESULT: &str = "You can only challenge your own result.";

/// 更新成绩
///
/// 顺序：成绩存在 -> 资源归属（教师授课 / 学生本人）-> 状态机 -> 条件写入。
/// 读取之后成绩被其他请求修改过时返回冲突，不会覆盖对方的结果。
pub async fn execute_update(
    storage: &dyn Storage,
    actor: Actor,
    mark_id: i64,
    update_data: &UpdateMarkRequest,
    now: DateTime<Utc>,
) -> Result<Mark> {
    let current = storage
        .get_mark_by_id(mark_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Mark not found."))?;

    match actor.role {
        UserRole::SuperAdmin | UserRole::Admin => {}
        UserRole::Teacher => {
            if !teaches_subject(storage, actor, current.subject_id).await? {
                return Err(RecordsError::forbidden(MSG_NOT_SUBJECT_TEACHER));
            }
        }
        UserRole::Student => {
            if !is_student_self(storage, actor, current.student_id).await? {
                return Err(RecordsError::forbidden(MSG_NOT_OWN_RESULT));
            }
        }
    }

    let next = workflow::plan_update(actor.role, &current, update_data, now)?;
    storage.save_mark(&current, next).await
}

pub async fn update_mark(
    service: &MarkService,
    mark_id: i64,
    update_data: UpdateMarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_update(storage.as_ref(), actor, mark_id, &update_data, Utc::now()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(mark) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark updated successfully")))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::MarkNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::marks::{
        entities::{MarkScores, ResultStatus},
        requests::NewMark,
    };
    use crate::services::test_support::{Fixture, fixture};
    use crate::storage::sea_orm_storage::MSG_MARK_CHANGED;

    async fn published_mark(f: &Fixture) -> Mark {
        f.storage
            .create_mark(NewMark {
                student_id: f.student.id,
                subject_id: f.subject.id,
                semester_id: f.semester_id,
                scores: MarkScores {
                    assignment: Some(10.0),
                    class_test: Some(10.0),
                    midterm: Some(10.0),
                    final_exam: Some(40.0),
                },
                total_mark: 50.0,
                gpa: 2.5,
                result_status: ResultStatus::Published,
            })
            .await
            .unwrap()
    }

    fn challenge() -> UpdateMarkRequest {
        UpdateMarkRequest {
            result_status: Some(ResultStatus::Challenged),
            ..Default::default()
        }
    }

    fn regrade(final_exam: f64) -> UpdateMarkRequest {
        UpdateMarkRequest {
            final_exam_mark: Some(final_exam),
            ..Default::default()
        }
    }

    fn confirm_payment() -> UpdateMarkRequest {
        UpdateMarkRequest {
            result_challenge_payment_status: Some(true),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_owning_student_challenges_once() {
        let f = fixture().await;
        let mark = published_mark(&f).await;

        let challenged = execute_update(&f.storage, f.student_actor(), mark.id, &challenge(), Utc::now())
            .await
            .unwrap();
        assert_eq!(challenged.result_status, ResultStatus::Challenged);
        assert_eq!(challenged.result_challenge_payment_status, Some(false));
        assert!(challenged.challenged_at.is_some());

        let stored = f.storage.get_mark_by_id(mark.id).await.unwrap().unwrap();
        assert_eq!(stored.result_status, ResultStatus::Challenged);

        let err = execute_update(&f.storage, f.student_actor(), mark.id, &challenge(), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_other_student_cannot_challenge() {
        let f = fixture().await;
        let mark = published_mark(&f).await;
        let other = f.add_student("carol", "2020-0002").await;

        let err = execute_update(
            &f.storage,
            Actor::new(other.user_id, UserRole::Student),
            mark.id,
            &challenge(),
            Utc::now(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), MSG_NOT_OWN_RESULT);
    }

    #[tokio::test]
    async fn test_regrade_locked_until_admin_confirms_payment() {
        let f = fixture().await;
        f.assign_teacher().await;
        let mark = published_mark(&f).await;
        execute_update(&f.storage, f.student_actor(), mark.id, &challenge(), Utc::now())
            .await
            .unwrap();

        let err = execute_update(&f.storage, f.teacher_actor(), mark.id, &regrade(60.0), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), workflow::MSG_LOCKED_WHILE_UNPAID);

        // 教师不能确认缴费
        let err = execute_update(&f.storage, f.teacher_actor(), mark.id, &confirm_payment(), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        execute_update(&f.storage, f.admin, mark.id, &confirm_payment(), Utc::now())
            .await
            .unwrap();

        let resolved = execute_update(&f.storage, f.teacher_actor(), mark.id, &regrade(60.0), Utc::now())
            .await
            .unwrap();
        assert_eq!(resolved.result_status, ResultStatus::Resolved);
        assert_eq!(resolved.final_exam_mark, Some(60.0));
        assert_eq!(resolved.total_mark, 70.0);
        assert_eq!(resolved.gpa, 3.5);
    }

    #[tokio::test]
    async fn test_unassigned_teacher_rejected_before_state_checks() {
        let f = fixture().await;
        let mark = published_mark(&f).await;

        // 即便请求本身非法（教师申请复核），也先报授课权限
        let err = execute_update(&f.storage, f.teacher_actor(), mark.id, &challenge(), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), MSG_NOT_SUBJECT_TEACHER);
    }

    #[tokio::test]
    async fn test_stale_regrade_does_not_erase_concurrent_challenge() {
        let f = fixture().await;
        f.assign_teacher().await;
        let mark = published_mark(&f).await;

        // 教师读取后计算改分结果，尚未写入
        let stale = f.storage.get_mark_by_id(mark.id).await.unwrap().unwrap();
        let teacher_plan =
            workflow::plan_update(UserRole::Teacher, &stale, &regrade(70.0), Utc::now()).unwrap();

        // 期间学生申请复核成功
        let challenged = execute_update(&f.storage, f.student_actor(), mark.id, &challenge(), Utc::now())
            .await
            .unwrap();
        assert_eq!(challenged.result_status, ResultStatus::Challenged);

        let err = f.storage.save_mark(&stale, teacher_plan).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), MSG_MARK_CHANGED);

        let stored = f.storage.get_mark_by_id(mark.id).await.unwrap().unwrap();
        assert_eq!(stored.result_status, ResultStatus::Challenged);
        assert_eq!(stored.result_challenge_payment_status, Some(false));
        assert!(stored.challenged_at.is_some());
        assert_eq!(stored.final_exam_mark, Some(40.0));

        // 重新读取后按当前状态处理：未缴费前仍然锁定
        let err = execute_update(&f.storage, f.teacher_actor(), mark.id, &regrade(70.0), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.message(), workflow::MSG_LOCKED_WHILE_UNPAID);
    }

    #[tokio::test]
    async fn test_save_against_deleted_mark_is_not_found() {
        let f = fixture().await;
        let mark = published_mark(&f).await;
        let next = workflow::plan_update(UserRole::Admin, &mark, &regrade(50.0), Utc::now()).unwrap();

        f.storage.delete_mark(mark.id).await.unwrap();
        let err = f.storage.save_mark(&mark, next).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_mark_is_not_found_before_forbidden() {
        let f = fixture().await;
        let err = execute_update(&f.storage, f.teacher_actor(), 4242, &regrade(10.0), Utc::now())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
