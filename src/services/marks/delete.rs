use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, teaches_subject};
use crate::errors::{RecordsError, Result};
use crate::models::{ApiResponse, ErrorCode, users::entities::Actor};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;

const ACTION: &str = "DELETE MARK";

/// 管理员或讲授该课程的教师可删除
pub async fn execute_delete(storage: &dyn Storage, actor: Actor, mark_id: i64) -> Result<()> {
    let mark = storage
        .get_mark_by_id(mark_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Mark not found."))?;

    if !actor.role.is_admin() && !teaches_subject(storage, actor, mark.subject_id).await? {
        return Err(RecordsError::forbidden(
            "You are not authorized to delete marks for this subject.",
        ));
    }

    if !storage.delete_mark(mark_id).await? {
        return Err(RecordsError::not_found("Mark not found."));
    }
    Ok(())
}

pub async fn delete_mark(
    service: &MarkService,
    mark_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_delete(storage.as_ref(), actor, mark_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            audit_success(request, ACTION, &serde_json::json!({ "mark_id": mark_id }));
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Mark deleted successfully")))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::MarkNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::marks::{entities::ResultStatus, requests::NewMark};
    use crate::services::test_support::fixture;

    #[tokio::test]
    async fn test_only_admin_or_subject_teacher_deletes() {
        let f = fixture().await;
        let mark = f
            .storage
            .create_mark(NewMark {
                student_id: f.student.id,
                subject_id: f.subject.id,
                semester_id: f.semester_id,
                scores: Default::default(),
                total_mark: 0.0,
                gpa: 0.0,
                result_status: ResultStatus::Unpublished,
            })
            .await
            .unwrap();

        let err = execute_delete(&f.storage, f.teacher_actor(), mark.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        f.assign_teacher().await;
        execute_delete(&f.storage, f.teacher_actor(), mark.id)
            .await
            .unwrap();
        assert!(f.storage.get_mark_by_id(mark.id).await.unwrap().is_none());

        let err = execute_delete(&f.storage, f.admin, mark.id).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
