use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{UserService, invalidate_user_cache};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{
        entities::{Actor, User, UserRole},
        requests::UpdateUserRequest,
    },
};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;
use crate::utils::validate::{validate_email, validate_username};

const ACTION: &str = "UPDATE USER";

pub const MSG_ADMIN_ROLE_SUPER_ONLY: &str = "Only a super admin can grant or revoke admin roles.";

/// 更新账号；授予或撤销管理员角色、修改管理员账号都需要超级管理员
pub async fn execute_update(
    storage: &dyn Storage,
    actor: Actor,
    user_id: i64,
    mut update_data: UpdateUserRequest,
) -> Result<User> {
    if update_data.is_empty() {
        return Err(RecordsError::validation("No fields to update"));
    }

    let target = storage
        .get_user_by_id(user_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("User not found"))?;

    let touches_admin = target.role.is_admin() || update_data.role.is_some_and(|r| r.is_admin());
    if touches_admin && actor.role != UserRole::SuperAdmin {
        return Err(RecordsError::forbidden(MSG_ADMIN_ROLE_SUPER_ONLY));
    }

    if actor.user_id == user_id
        && (update_data.is_active == Some(false) || update_data.role.is_some_and(|r| r != target.role))
    {
        return Err(RecordsError::validation(
            "You cannot deactivate your own account or change your own role",
        ));
    }

    if let Some(username) = update_data.username.as_mut() {
        *username = username.trim().to_string();
        validate_username(username)?;
        if let Some(existing) = storage.get_user_by_username_or_email(username).await?
            && existing.id != user_id
        {
            return Err(RecordsError::conflict("Username already exists"));
        }
    }
    if let Some(email) = update_data.email.as_mut() {
        *email = email.trim().to_lowercase();
        validate_email(email)?;
        if let Some(existing) = storage.get_user_by_username_or_email(email).await?
            && existing.id != user_id
        {
            return Err(RecordsError::conflict("Email already exists"));
        }
    }

    storage
        .update_user(user_id, update_data)
        .await?
        .ok_or_else(|| RecordsError::not_found("User not found"))
}

pub async fn update_user(
    service: &UserService,
    user_id: i64,
    update_data: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_update(storage.as_ref(), actor, user_id, update_data.clone()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            invalidate_user_cache(request).await;
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                user,
                "User information updated successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::UserNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::users::requests::CreateUserRequest;
    use crate::storage::sea_orm_storage::SeaOrmStorage;

    async fn user(storage: &SeaOrmStorage, username: &str, role: UserRole) -> User {
        storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@uni.edu"),
                password: "hashed".to_string(),
                role,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_only_super_admin_grants_admin_role() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let root = user(&storage, "root", UserRole::SuperAdmin).await;
        let admin = user(&storage, "dean", UserRole::Admin).await;
        let teacher = user(&storage, "bob", UserRole::Teacher).await;

        let promote = UpdateUserRequest {
            role: Some(UserRole::Admin),
            ..Default::default()
        };

        let err = execute_update(&storage, admin.actor(), teacher.id, promote.clone())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert_eq!(err.message(), MSG_ADMIN_ROLE_SUPER_ONLY);

        let promoted = execute_update(&storage, root.actor(), teacher.id, promote)
            .await
            .unwrap();
        assert_eq!(promoted.role, UserRole::Admin);
    }

    #[tokio::test]
    async fn test_admin_deactivates_teacher() {
        let storage = SeaOrmStorage::new_in_memory().await.unwrap();
        let admin = user(&storage, "dean", UserRole::Admin).await;
        let teacher = user(&storage, "bob", UserRole::Teacher).await;

        let updated = execute_update(
            &storage,
            admin.actor(),
            teacher.id,
            UpdateUserRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert!(!updated.is_active);

        let err = execute_update(
            &storage,
            admin.actor(),
            teacher.id,
            UpdateUserRequest {
                email: Some("dean@uni.edu".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }
}
