use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
};
use crate::services::{audit_success, error_response, users::prepare_account};
use crate::storage::Storage;
use crate::utils::validate::require_text;

const ACTION: &str = "CREATE TEACHER";

pub async fn execute_create(
    storage: &dyn Storage,
    teacher_data: &CreateTeacherRequest,
) -> Result<Teacher> {
    let name = require_text("name", &teacher_data.name)?;
    let username = teacher_data.username.trim().to_string();
    let email = teacher_data.email.trim().to_lowercase();

    if let Some(department_id) = teacher_data.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }

    let password_hash =
        prepare_account(storage, &username, &email, &teacher_data.password).await?;

    storage
        .create_teacher(CreateTeacherRequest {
            username,
            email,
            password: password_hash,
            name,
            ..teacher_data.clone()
        })
        .await
}

pub async fn create_teacher(
    service: &TeacherService,
    teacher_data: CreateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create(storage.as_ref(), &teacher_data).await {
        Ok(teacher) => {
            audit_success(request, ACTION, &teacher_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                teacher,
                "Teacher created successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::DepartmentNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::fixture;

    fn teacher(username: &str, password: &str) -> CreateTeacherRequest {
        CreateTeacherRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: password.to_string(),
            name: "Grace Hopper".to_string(),
            department_id: None,
            present_address: String::new(),
            permanent_address: String::new(),
            date_of_birth: None,
            mobile_number: String::new(),
            photo_url: String::new(),
        }
    }

    #[tokio::test]
    async fn test_teacher_account_has_teacher_role() {
        let f = fixture().await;
        let created = execute_create(&f.storage, &teacher("grace", "compiler1952"))
            .await
            .unwrap();
        let user = f.storage.get_user_by_id(created.user_id).await.unwrap().unwrap();
        assert_eq!(user.role, UserRole::Teacher);
    }

    #[tokio::test]
    async fn test_weak_password_and_taken_username_rejected() {
        let f = fixture().await;
        let err = execute_create(&f.storage, &teacher("grace", "short"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        // 夹具中已有用户名 bob
        let err = execute_create(&f.storage, &teacher("bob", "compiler1952"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
