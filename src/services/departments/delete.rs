use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::RecordsError;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{audit_success, error_response};

const ACTION: &str = "DELETE DEPARTMENT";

pub async fn delete_department(
    service: &DepartmentService,
    department_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match storage.delete_department(department_id).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(RecordsError::not_found("Department not found.")),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            audit_success(
                request,
                ACTION,
                &serde_json::json!({ "department_id": department_id }),
            );
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
                "Department deleted successfully",
            )))
        }
        Err(e) => Ok(error_response(
            request,
            ACTION,
            e,
            ErrorCode::DepartmentNotFound,
        )),
    }
}
