use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    departments::{entities::Department, requests::CreateDepartmentRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::normalize_name;

const ACTION: &str = "CREATE DEPARTMENT";

pub const MSG_DEPARTMENT_EXISTS: &str = "Department already exists";

pub async fn execute_create(
    storage: &dyn Storage,
    department_data: &CreateDepartmentRequest,
) -> Result<Department> {
    let name = normalize_name("department_name", &department_data.department_name)?;

    if storage.get_department_by_name(&name).await?.is_some() {
        return Err(RecordsError::conflict(MSG_DEPARTMENT_EXISTS));
    }

    storage.create_department(name).await
}

pub async fn create_department(
    service: &DepartmentService,
    department_data: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create(storage.as_ref(), &department_data).await {
        Ok(department) => {
            audit_success(request, ACTION, &department_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                department,
                "Department created successfully",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    #[tokio::test]
    async fn test_name_normalized_and_duplicates_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();

        let department = execute_create(
            &storage,
            &CreateDepartmentRequest {
                department_name: "  Physics ".to_string(),
            },
        )
        .await
        .unwrap();
        assert_eq!(department.department_name, "physics");

        let err = execute_create(
            &storage,
            &CreateDepartmentRequest {
                department_name: "PHYSICS".to_string(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), MSG_DEPARTMENT_EXISTS);
    }
}
