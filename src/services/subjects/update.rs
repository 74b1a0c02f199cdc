use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, duplicate_code_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{entities::Subject, requests::UpdateSubjectRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::{normalize_subject_code, require_text, validate_credits};

const ACTION: &str = "UPDATE SUBJECT";

pub async fn execute_update(
    storage: &dyn Storage,
    subject_id: i64,
    update_data: &UpdateSubjectRequest,
) -> Result<Subject> {
    if update_data.subject_title.is_none()
        && update_data.subject_code.is_none()
        && update_data.credits.is_none()
        && update_data.semester_id.is_none()
    {
        return Err(RecordsError::validation("No fields to update"));
    }

    if storage.get_subject_by_id(subject_id).await?.is_none() {
        return Err(RecordsError::not_found("Subject not found."));
    }

    let subject_title = update_data
        .subject_title
        .as_deref()
        .map(|title| require_text("subject_title", title))
        .transpose()?;
    let subject_code = update_data
        .subject_code
        .as_deref()
        .map(normalize_subject_code)
        .transpose()?;
    if let Some(credits) = update_data.credits {
        validate_credits(credits)?;
    }

    if let Some(semester_id) = update_data.semester_id
        && storage.get_semester_by_id(semester_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Semester not found."));
    }
    if let Some(code) = subject_code.as_deref()
        && let Some(existing) = storage.get_subject_by_code(code).await?
        && existing.id != subject_id
    {
        return Err(RecordsError::conflict(duplicate_code_message(code)));
    }

    storage
        .update_subject(
            subject_id,
            UpdateSubjectRequest {
                subject_title,
                subject_code,
                credits: update_data.credits,
                semester_id: update_data.semester_id,
            },
        )
        .await?
        .ok_or_else(|| RecordsError::not_found("Subject not found."))
}

pub async fn update_subject(
    service: &SubjectService,
    subject_id: i64,
    update_data: UpdateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_update(storage.as_ref(), subject_id, &update_data).await {
        Ok(subject) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                subject,
                "Subject updated successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SubjectNotFound)),
    }
}
