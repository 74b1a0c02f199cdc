use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SemesterService, conflict_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    semesters::{entities::Semester, requests::CreateSemesterRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::{normalize_name, validate_semester_number};

const ACTION: &str = "CREATE SEMESTER";

pub async fn execute_create(
    storage: &dyn Storage,
    semester_data: &CreateSemesterRequest,
) -> Result<Semester> {
    let semester_name = normalize_name("semester_name", &semester_data.semester_name)?;
    validate_semester_number(semester_data.semester_number)?;

    if let Some(existing) = storage
        .find_conflicting_semester(
            Some(&semester_name),
            Some(semester_data.semester_number),
            None,
        )
        .await?
    {
        return Err(RecordsError::conflict(conflict_message(
            &existing,
            Some(&semester_name),
        )));
    }

    storage
        .create_semester(CreateSemesterRequest {
            semester_name,
            semester_number: semester_data.semester_number,
        })
        .await
}

pub async fn create_semester(
    service: &SemesterService,
    semester_data: CreateSemesterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create(storage.as_ref(), &semester_data).await {
        Ok(semester) => {
            audit_success(request, ACTION, &semester_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                semester,
                "Semester created successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::SemesterNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    fn semester(name: &str, number: i32) -> CreateSemesterRequest {
        CreateSemesterRequest {
            semester_name: name.to_string(),
            semester_number: number,
        }
    }

    #[tokio::test]
    async fn test_conflicting_name_or_number_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let first = execute_create(&storage, &semester(" First ", 1))
            .await
            .unwrap();
        assert_eq!(first.semester_name, "first");

        let err = execute_create(&storage, &semester("FIRST", 2))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), "A semester named 'first' already exists.");

        let err = execute_create(&storage, &semester("second", 1))
            .await
            .unwrap_err();
        assert_eq!(err.message(), "Semester number 1 is already used by 'first'.");

        let err = execute_create(&storage, &semester("zero", 0))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
