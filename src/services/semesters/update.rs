use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SemesterService, conflict_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    semesters::{entities::Semester, requests::UpdateSemesterRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::{normalize_name, validate_semester_number};

const ACTION: &str = "UPDATE SEMESTER";

pub async fn execute_update(
    storage: &dyn Storage,
    semester_id: i64,
    update_data: &UpdateSemesterRequest,
) -> Result<Semester> {
    if update_data.semester_name.is_none() && update_data.semester_number.is_none() {
        return Err(RecordsError::validation("No fields to update"));
    }

    if storage.get_semester_by_id(semester_id).await?.is_none() {
        return Err(RecordsError::not_found("Semester not found."));
    }

    let semester_name = update_data
        .semester_name
        .as_deref()
        .map(|name| normalize_name("semester_name", name))
        .transpose()?;
    if let Some(number) = update_data.semester_number {
        validate_semester_number(number)?;
    }

    if let Some(existing) = storage
        .find_conflicting_semester(
            semester_name.as_deref(),
            update_data.semester_number,
            Some(semester_id),
        )
        .await?
    {
        return Err(RecordsError::conflict(conflict_message(
            &existing,
            semester_name.as_deref(),
        )));
    }

    storage
        .update_semester(
            semester_id,
            UpdateSemesterRequest {
                semester_name,
                semester_number: update_data.semester_number,
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("Semester not found."))
}

pub async fn update_semester(
    service: &SemesterService,
    semester_id: i64,
    update_data: UpdateSemesterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_update(storage.as_ref(), semester_id, &update_data).await {
        Ok(semester) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                semester,
                "Semester updated successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SemesterNotFound)),
    }
}
