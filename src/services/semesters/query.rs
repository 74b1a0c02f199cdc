use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SemesterService;
use crate::models::{ApiResponse, ErrorCode, semesters::responses::SemesterListResponse};
use crate::services::error_response;

pub async fn get_semester(
    service: &SemesterService,
    semester_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_semester_by_id(semester_id).await {
        Ok(Some(semester)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            semester,
            "Semester retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SemesterNotFound,
            "Semester not found.",
        ))),
        Err(e) => Ok(error_response(
            request,
            "GET SEMESTER",
            e,
            ErrorCode::SemesterNotFound,
        )),
    }
}

// 学期数量很少，不分页
pub async fn list_semesters(
    service: &SemesterService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_semesters().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            SemesterListResponse { items },
            "Semesters retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST SEMESTERS",
            e,
            ErrorCode::SemesterNotFound,
        )),
    }
}
