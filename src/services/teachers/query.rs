use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{requests::TeacherListQuery, responses::TeacherDetailResponse},
};
use crate::services::error_response;
use crate::storage::Storage;

pub async fn execute_get(storage: &dyn Storage, teacher_id: i64) -> Result<TeacherDetailResponse> {
    let teacher = storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Teacher not found."))?;
    let user = storage.get_user_by_id(teacher.user_id).await?;
    Ok(TeacherDetailResponse { teacher, user })
}

pub async fn get_teacher(
    service: &TeacherService,
    teacher_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_get(storage.as_ref(), teacher_id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Teacher retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, "GET TEACHER", e, ErrorCode::TeacherNotFound)),
    }
}

pub async fn list_teachers(
    service: &TeacherService,
    query: TeacherListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_teachers_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Teachers retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST TEACHERS",
            e,
            ErrorCode::TeacherNotFound,
        )),
    }
}
