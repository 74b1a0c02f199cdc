use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{DepartmentService, create::MSG_DEPARTMENT_EXISTS};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    departments::{entities::Department, requests::UpdateDepartmentRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;
use crate::utils::validate::normalize_name;

const ACTION: &str = "UPDATE DEPARTMENT";

pub async fn execute_update(
    storage: &dyn Storage,
    department_id: i64,
    update_data: &UpdateDepartmentRequest,
) -> Result<Department> {
    let Some(raw_name) = update_data.department_name.as_deref() else {
        return Err(RecordsError::validation("No fields to update"));
    };

    if storage.get_department_by_id(department_id).await?.is_none() {
        return Err(RecordsError::not_found("Department not found."));
    }

    let name = normalize_name("department_name", raw_name)?;
    if let Some(existing) = storage.get_department_by_name(&name).await?
        && existing.id != department_id
    {
        return Err(RecordsError::conflict(MSG_DEPARTMENT_EXISTS));
    }

    storage
        .update_department(department_id, name)
        .await?
        .ok_or_else(|| RecordsError::not_found("Department not found."))
}

pub async fn update_department(
    service: &DepartmentService,
    department_id: i64,
    update_data: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_update(storage.as_ref(), department_id, &update_data).await {
        Ok(department) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                department,
                "Department updated successfully",
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
