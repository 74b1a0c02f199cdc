use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, duplicate_registration_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{entities::Student, requests::UpdateStudentRequest},
    users::entities::{Actor, UserRole},
};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;
use crate::utils::validate::require_text;

const ACTION: &str = "UPDATE STUDENT";

pub const MSG_CONTACT_FIELDS_ONLY: &str =
    "Students can only update their addresses, mobile number and photo.";

/// 管理员可修改全部字段；学生本人只能修改联系方式
pub async fn execute_update(
    storage: &dyn Storage,
    actor: Actor,
    student_id: i64,
    mut update_data: UpdateStudentRequest,
) -> Result<Student> {
    if update_data.is_empty() {
        return Err(RecordsError::validation("No fields to update"));
    }

    let current = storage
        .get_student_by_id(student_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Student not found."))?;

    match actor.role {
        UserRole::SuperAdmin | UserRole::Admin => {}
        UserRole::Student if current.user_id == actor.user_id => {
            if update_data.touches_academic_fields() || update_data.date_of_birth.is_some() {
                return Err(RecordsError::forbidden(MSG_CONTACT_FIELDS_ONLY));
            }
        }
        _ => {
            return Err(RecordsError::forbidden(
                "You are not authorized to update this student.",
            ));
        }
    }

    if let Some(name) = update_data.name.as_mut() {
        *name = require_text("name", name)?;
    }
    if let Some(session) = update_data.session.as_mut() {
        *session = require_text("session", session)?;
    }
    if let Some(registration) = update_data.registration.as_mut() {
        *registration = require_text("registration", registration)?;
        if let Some(existing) = storage.get_student_by_registration(registration).await?
            && existing.id != student_id
        {
            return Err(RecordsError::conflict(duplicate_registration_message(
                registration,
            )));
        }
    }
    if let Some(department_id) = update_data.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }
    if let Some(semester_id) = update_data.semester_id
        && storage.get_semester_by_id(semester_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Semester not found."));
    }

    storage
        .update_student(student_id, update_data)
        .await?
        .ok_or_else(|| RecordsError::not_found("Student not found."))
}

pub async fn update_student(
    service: &StudentService,
    student_id: i64,
    update_data: UpdateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_update(storage.as_ref(), actor, student_id, update_data.clone()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(student) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                student,
                "Student updated successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::StudentNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::services::test_support::fixture;

    #[tokio::test]
    async fn test_student_updates_contact_fields_only() {
        let f = fixture().await;

        let updated = execute_update(
            &f.storage,
            f.student_actor(),
            f.student.id,
            UpdateStudentRequest {
                mobile_number: Some("01700000000".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.mobile_number, "01700000000");

        let err = execute_update(
            &f.storage,
            f.student_actor(),
            f.student.id,
            UpdateStudentRequest {
                registration: Some("2020-9999".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), MSG_CONTACT_FIELDS_ONLY);
    }

    #[tokio::test]
    async fn test_student_cannot_update_someone_else() {
        let f = fixture().await;
        let other = f.add_student("carol", "2020-0002").await;

        let err = execute_update(
            &f.storage,
            f.student_actor(),
            other.id,
            UpdateStudentRequest {
                mobile_number: Some("0".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_admin_registration_change_checks_duplicates() {
        let f = fixture().await;
        let other = f.add_student("carol", "2020-0002").await;

        let err = execute_update(
            &f.storage,
            f.admin,
            other.id,
            UpdateStudentRequest {
                registration: Some("2020-0001".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
