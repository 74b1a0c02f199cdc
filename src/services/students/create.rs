use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{StudentService, duplicate_registration_message};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    students::{entities::Student, requests::CreateStudentRequest},
};
use crate::services::{audit_success, error_response, users::prepare_account};
use crate::storage::Storage;
use crate::utils::validate::require_text;

const ACTION: &str = "CREATE STUDENT";

/// 创建学生：账号与档案在同一事务中写入
pub async fn execute_create(
    storage: &dyn Storage,
    student_data: &CreateStudentRequest,
) -> Result<Student> {
    let name = require_text("name", &student_data.name)?;
    let registration = require_text("registration", &student_data.registration)?;
    let session = require_text("session", &student_data.session)?;
    let username = student_data.username.trim().to_string();
    let email = student_data.email.trim().to_lowercase();

    if storage
        .get_department_by_id(student_data.department_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }
    if storage
        .get_semester_by_id(student_data.semester_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Semester not found."));
    }
    if storage
        .get_student_by_registration(&registration)
        .await?
        .is_some()
    {
        return Err(RecordsError::conflict(duplicate_registration_message(
            &registration,
        )));
    }

    let password_hash =
        prepare_account(storage, &username, &email, &student_data.password).await?;

    storage
        .create_student(CreateStudentRequest {
            username,
            email,
            password: password_hash,
            name,
            registration,
            session,
            ..student_data.clone()
        })
        .await
}

pub async fn create_student(
    service: &StudentService,
    student_data: CreateStudentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create(storage.as_ref(), &student_data).await {
        Ok(student) => {
            audit_success(request, ACTION, &student_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                student,
                "Student created successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::NotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::fixture;

    fn student(username: &str, registration: &str, department_id: i64, semester_id: i64) -> CreateStudentRequest {
        CreateStudentRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: "semester2024".to_string(),
            name: "Erin Example".to_string(),
            registration: registration.to_string(),
            session: "2021-22".to_string(),
            department_id,
            semester_id,
            present_address: String::new(),
            permanent_address: String::new(),
            date_of_birth: None,
            mobile_number: String::new(),
            photo_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_student_and_account_created_together() {
        let f = fixture().await;
        let created = execute_create(
            &f.storage,
            &student("erin", "2021-0100", f.department_id, f.semester_id),
        )
        .await
        .unwrap();

        let user = f.storage.get_user_by_id(created.user_id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert_ne!(user.password_hash, "semester2024");
    }

    #[tokio::test]
    async fn test_duplicate_registration_rejected_without_creating_account() {
        let f = fixture().await;
        let err = execute_create(
            &f.storage,
            &student("frank", "2020-0001", f.department_id, f.semester_id),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.message(),
            "Registration number '2020-0001' already exists in our records."
        );
        assert!(
            f.storage
                .get_user_by_username_or_email("frank")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_unknown_department_is_not_found() {
        let f = fixture().await;
        let err = execute_create(&f.storage, &student("gina", "2021-0101", 999, f.semester_id))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
