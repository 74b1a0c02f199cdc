use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode, departments::requests::DepartmentListQuery};
use crate::services::error_response;

pub async fn get_department(
    service: &DepartmentService,
    department_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_department_by_id(department_id).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            department,
            "Department retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "Department not found.",
        ))),
        Err(e) => Ok(error_response(
            request,
            "GET DEPARTMENT",
            e,
            ErrorCode::DepartmentNotFound,
        )),
    }
}

pub async fn list_departments(
    service: &DepartmentService,
    query: DepartmentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_departments_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Departments retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST DEPARTMENTS",
            e,
            ErrorCode::DepartmentNotFound,
        )),
    }
}
