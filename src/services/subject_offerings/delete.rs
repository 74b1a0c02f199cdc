use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectOfferingService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response};

const ACTION: &str = "DELETE SUBJECT OFFERING";

pub async fn delete_offering(
    service: &SubjectOfferingService,
    offering_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_subject_offering(offering_id).await {
        Ok(true) => {
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "offering_id": offering_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Subject offering deleted successfully",
            )))
        }
        Ok(false) => Ok(error_response(
            request,
            ACTION,
            RecordsError::not_found("Subject offering not found."),
            ErrorCode::SubjectOfferingNotFound,
        )),
        Err(e) => Ok(error_response(
            request,
            ACTION,
            e,
            ErrorCode::SubjectOfferingNotFound,
        )),
    }
}
