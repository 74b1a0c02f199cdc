use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::StudentService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{requests::StudentListQuery, responses::StudentDetailResponse},
    users::entities::Actor,
};
use crate::services::{current_actor, error_response};
use crate::storage::Storage;

/// 教职工可查看任意学生，学生只能查看自己
pub async fn execute_get(
    storage: &dyn Storage,
    actor: Actor,
    student_id: i64,
) -> Result<StudentDetailResponse> {
    let student = storage
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Student not found."))?;

    if !actor.role.is_staff() && student.user_id != actor.user_id {
        return Err(RecordsError::forbidden("You can only view your own profile."));
    }

    let user = storage.get_user_by_id(student.user_id).await?;
    Ok(StudentDetailResponse { student, user })
}

pub async fn get_student(
    service: &StudentService,
    student_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_get(storage.as_ref(), actor, student_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, "GET STUDENT", e, ErrorCode::StudentNotFound)),
    }
}

pub async fn get_own_profile(
    service: &StudentService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => match storage.get_student_by_user_id(actor.user_id).await {
            Ok(Some(student)) => execute_get(storage.as_ref(), actor, student.id).await,
            Ok(None) => Err(RecordsError::not_found("Student profile not found.")),
            Err(e) => Err(e),
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Student retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, "GET STUDENT", e, ErrorCode::StudentNotFound)),
    }
}

pub async fn list_students(
    service: &StudentService,
    query: StudentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_students_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Students retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST STUDENTS",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}
