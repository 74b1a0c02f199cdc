use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response};

const ACTION: &str = "DELETE SEMESTER";

/// 仍有课程引用的学期无法删除（外键 RESTRICT），由完整性翻译给出提示
pub async fn delete_semester(
    service: &SemesterService,
    semester_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.delete_semester(semester_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(RecordsError::not_found("Semester not found.")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "semester_id": semester_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Semester deleted successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SemesterNotFound)),
    }
}
