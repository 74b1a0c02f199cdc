use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, grading, teaches_subject};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{
        entities::{Mark, ResultStatus},
        requests::{CreateMarkRequest, NewMark},
    },
    users::entities::{Actor, UserRole},
};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;
use crate::utils::validate::validate_scores;

const ACTION: &str = "CREATE MARK";

pub const MSG_MARK_EXISTS: &str = "A mark already exists for this student, subject and semester.";
pub const MSG_NOT_SUBJECT_TEACHER: &str =
    "You are not authorized to create a mark for this subject.";

/// 创建成绩
///
/// 校验顺序：重复 -> 引用存在 -> 教师授课权限。
pub async fn execute_create(
    storage: &dyn Storage,
    actor: Actor,
    mark_data: &CreateMarkRequest,
) -> Result<Mark> {
    // 输入格式
    let result_status = mark_data.result_status.unwrap_or_default();
    if !matches!(
        result_status,
        ResultStatus::Unpublished | ResultStatus::Published
    ) {
        return Err(RecordsError::validation(
            "A new mark can only be unpublished or published",
        ));
    }
    let scores = mark_data.scores();
    validate_scores(&scores)?;

    // 1. 重复
    if storage
        .find_mark(
            mark_data.student_id,
            mark_data.subject_id,
            mark_data.semester_id,
        )
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict(MSG_MARK_EXISTS));
    }

    // 2. 引用存在
    if storage.get_student_by_id(mark_data.student_id).await?.is_none() {
        return Err(RecordsError::not_found("Student not found."));
    }
    if storage.get_subject_by_id(mark_data.subject_id).await?.is_none() {
        return Err(RecordsError::not_found("Subject not found."));
    }
    if storage
        .get_semester_by_id(mark_data.semester_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Semester not found."));
    }

    // 3. 授课权限（管理员跳过）
    match actor.role {
        UserRole::SuperAdmin | UserRole::Admin => {}
        UserRole::Teacher => {
            if !teaches_subject(storage, actor, mark_data.subject_id).await? {
                return Err(RecordsError::forbidden(MSG_NOT_SUBJECT_TEACHER));
            }
        }
        UserRole::Student => return Err(RecordsError::forbidden("Students cannot create marks.")),
    }

    let outcome = grading::compute(scores);
    storage
        .create_mark(NewMark {
            student_id: mark_data.student_id,
            subject_id: mark_data.subject_id,
            semester_id: mark_data.semester_id,
            scores,
            total_mark: outcome.total,
            gpa: outcome.gpa,
            result_status,
        })
        .await
}

pub async fn create_mark(
    service: &MarkService,
    mark_data: CreateMarkRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_create(storage.as_ref(), actor, &mark_data).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(mark) => {
            audit_success(request, ACTION, &mark_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(mark, "Mark created successfully")))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::NotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::services::test_support::fixture;

    fn request_for(student_id: i64, subject_id: i64, semester_id: i64) -> CreateMarkRequest {
        CreateMarkRequest {
            student_id,
            subject_id,
            semester_id,
            assignment_mark: Some(15.0),
            class_test_mark: Some(15.0),
            midterm_mark: Some(15.0),
            final_exam_mark: Some(60.0),
            result_status: None,
        }
    }

    #[tokio::test]
    async fn test_create_computes_total_and_defaults_to_unpublished() {
        let f = fixture().await;
        let mark = execute_create(
            &f.storage,
            f.admin,
            &request_for(f.student.id, f.subject.id, f.semester_id),
        )
        .await
        .unwrap();

        assert_eq!(mark.total_mark, 75.0);
        assert_eq!(mark.gpa, 3.75);
        assert_eq!(mark.result_status, ResultStatus::Unpublished);
        assert_eq!(mark.result_challenge_payment_status, None);
    }

    #[tokio::test]
    async fn test_second_mark_for_same_triple_is_conflict() {
        let f = fixture().await;
        let req = request_for(f.student.id, f.subject.id, f.semester_id);
        execute_create(&f.storage, f.admin, &req).await.unwrap();

        let err = execute_create(&f.storage, f.admin, &req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), MSG_MARK_EXISTS);
    }

    #[tokio::test]
    async fn test_teacher_without_offering_is_forbidden_admin_is_not() {
        let f = fixture().await;
        let req = request_for(f.student.id, f.subject.id, f.semester_id);

        let err = execute_create(&f.storage, f.teacher_actor(), &req)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), MSG_NOT_SUBJECT_TEACHER);

        assert!(execute_create(&f.storage, f.admin, &req).await.is_ok());
    }

    #[tokio::test]
    async fn test_teacher_with_offering_may_create() {
        let f = fixture().await;
        f.assign_teacher().await;

        let mark = execute_create(
            &f.storage,
            f.teacher_actor(),
            &request_for(f.student.id, f.subject.id, f.semester_id),
        )
        .await
        .unwrap();
        assert_eq!(mark.subject_id, f.subject.id);
    }

    #[tokio::test]
    async fn test_missing_references_are_not_found() {
        let f = fixture().await;

        let err = execute_create(&f.storage, f.admin, &request_for(999, f.subject.id, f.semester_id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Student not found.");

        let err = execute_create(&f.storage, f.admin, &request_for(f.student.id, 999, f.semester_id))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Subject not found.");
    }

    #[tokio::test]
    async fn test_duplicate_takes_precedence_over_authorization() {
        let f = fixture().await;
        let req = request_for(f.student.id, f.subject.id, f.semester_id);
        execute_create(&f.storage, f.admin, &req).await.unwrap();

        let err = execute_create(&f.storage, f.teacher_actor(), &req)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_scores_out_of_range_rejected() {
        let f = fixture().await;
        let mut req = request_for(f.student.id, f.subject.id, f.semester_id);
        req.final_exam_mark = Some(81.0);

        let err = execute_create(&f.storage, f.admin, &req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_creation_status_limited_to_unpublished_or_published() {
        let f = fixture().await;
        let mut req = request_for(f.student.id, f.subject.id, f.semester_id);
        req.result_status = Some(ResultStatus::Challenged);

        let err = execute_create(&f.storage, f.admin, &req).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        req.result_status = Some(ResultStatus::Published);
        let mark = execute_create(&f.storage, f.admin, &req).await.unwrap();
        assert_eq!(mark.result_status, ResultStatus::Published);
    }

    #[tokio::test]
    async fn test_late_duplicate_insert_is_translated() {
        let f = fixture().await;
        let new_mark = NewMark {
            student_id: f.student.id,
            subject_id: f.subject.id,
            semester_id: f.semester_id,
            scores: Default::default(),
            total_mark: 0.0,
            gpa: 0.0,
            result_status: ResultStatus::Unpublished,
        };
        f.storage.create_mark(new_mark.clone()).await.unwrap();

        // 跳过预检查直接写入，模拟并发请求
        let err = f.storage.create_mark(new_mark).await.unwrap_err();
        assert!(matches!(err, RecordsError::Integrity(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert!(err.message().starts_with("A mark entry already exists"));
        assert!(err.raw_error().unwrap().contains("marks.student_id"));

        // 回滚后连接可继续使用
        assert!(f.storage.ping().await.is_ok());
    }
}
