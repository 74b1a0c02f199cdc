use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SystemService;
use crate::models::{ApiResponse, ErrorCode, audit::requests::AuditLogListQuery};
use crate::services::error_response;

pub async fn list_audit_logs(
    service: &SystemService,
    query: AuditLogListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_audit_logs_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Audit logs retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST AUDIT LOGS",
            e,
            ErrorCode::NotFound,
        )),
    }
}
