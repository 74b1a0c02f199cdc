use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response};

const ACTION: &str = "DELETE SUBJECT";

pub async fn delete_subject(
    service: &SubjectService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.delete_subject(subject_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(RecordsError::not_found("Subject not found.")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "subject_id": subject_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Subject deleted successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SubjectNotFound)),
    }
}
