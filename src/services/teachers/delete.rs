use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response, users::invalidate_user_cache};

const ACTION: &str = "DELETE TEACHER";

/// 删除教师档案及其账号；其开课记录的教师置空
pub async fn delete_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.delete_teacher(teacher_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(RecordsError::not_found("Teacher not found.")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            invalidate_user_cache(request).await;
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "teacher_id": teacher_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Teacher deleted successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::TeacherNotFound)),
    }
}
