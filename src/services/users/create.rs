use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, prepare_account};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::User,
        requests::{CreateAdminRequest, CreateUserRequest},
    },
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;

const ACTION: &str = "CREATE ADMIN";

pub async fn execute_create_admin(
    storage: &dyn Storage,
    admin_data: &CreateAdminRequest,
) -> Result<User> {
    if !admin_data.role.is_admin() {
        return Err(RecordsError::validation(
            "Only admin or super_admin accounts can be created here",
        ));
    }

    let username = admin_data.username.trim();
    let email = admin_data.email.trim().to_lowercase();
    let password_hash = prepare_account(storage, username, &email, &admin_data.password).await?;

    storage
        .create_user(CreateUserRequest {
            username: username.to_string(),
            email,
            password: password_hash,
            role: admin_data.role,
        })
        .await
}

pub async fn create_admin(
    service: &UserService,
    admin_data: CreateAdminRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_create_admin(storage.as_ref(), &admin_data).await {
        Ok(user) => {
            audit_success(request, ACTION, &admin_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "Admin created successfully")))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::UserNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::users::entities::UserRole;
    use crate::storage::sea_orm_storage::SeaOrmStorage;
    use crate::utils::password::verify_password;

    fn admin(username: &str, role: UserRole) -> CreateAdminRequest {
        CreateAdminRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: "registrar2024".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_admin_created_with_hashed_password() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let user = execute_create_admin(&storage, &admin("dean", UserRole::Admin))
            .await
            .unwrap();
        assert_eq!(user.role, UserRole::Admin);
        assert!(verify_password("registrar2024", &user.password_hash));

        let err = execute_create_admin(&storage, &admin("dean", UserRole::Admin))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_non_admin_role_rejected() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let err = execute_create_admin(&storage, &admin("tutor", UserRole::Teacher))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
}
