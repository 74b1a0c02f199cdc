use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response, users::invalidate_user_cache};

const ACTION: &str = "DELETE STUDENT";

/// 删除学生档案及其账号，成绩随之级联删除
pub async fn delete_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.delete_student(student_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(RecordsError::not_found("Student not found.")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            invalidate_user_cache(request).await;
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "student_id": student_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Student deleted successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::StudentNotFound)),
    }
}
