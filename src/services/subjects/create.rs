use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectService, duplicate_code_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    subjects::{entities::Subject, requests::CreateSubjectRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::{normalize_subject_code, require_text, validate_credits};

const ACTION: &str = "CREATE SUBJECT";

pub async fn execute_create(
    storage: &dyn Storage,
    subject_data: &CreateSubjectRequest,
) -> Result<Subject> {
    let subject_title = require_text("subject_title", &subject_data.subject_title)?;
    let subject_code = normalize_subject_code(&subject_data.subject_code)?;
    validate_credits(subject_data.credits)?;

    if storage
        .get_semester_by_id(subject_data.semester_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Semester not found."));
    }
    if storage.get_subject_by_code(&subject_code).await?.is_some() {
        return Err(RecordsError::conflict(duplicate_code_message(&subject_code)));
    }

    storage
        .create_subject(CreateSubjectRequest {
            subject_title,
            subject_code,
            credits: subject_data.credits,
            semester_id: subject_data.semester_id,
        })
        .await
}

pub async fn create_subject(
    service: &SubjectService,
    subject_data: CreateSubjectRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create(storage.as_ref(), &subject_data).await {
        Ok(subject) => {
            audit_success(request, ACTION, &subject_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                subject,
                "Subject created successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SemesterNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::services::test_support::fixture;

    fn subject(code: &str, semester_id: i64) -> CreateSubjectRequest {
        CreateSubjectRequest {
            subject_title: "Algorithms".to_string(),
            subject_code: code.to_string(),
            credits: 3.0,
            semester_id,
        }
    }

    #[tokio::test]
    async fn test_code_upper_cased_and_unique() {
        let f = fixture().await;

        let created = execute_create(&f.storage, &subject("cse-205", f.semester_id))
            .await
            .unwrap();
        assert_eq!(created.subject_code, "CSE-205");

        let err = execute_create(&f.storage, &subject("CSE-205", f.semester_id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "A subject with code 'CSE-205' already exists.");
    }

    #[tokio::test]
    async fn test_semester_must_exist() {
        let f = fixture().await;
        let err = execute_create(&f.storage, &subject("CSE-206", 999))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
