use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TeacherService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    teachers::{entities::Teacher, requests::UpdateTeacherRequest},
    users::entities::{Actor, UserRole},
};
use crate::services::{audit_success, current_actor, error_response};
use crate::storage::Storage;
use crate::utils::validate::require_text;

const ACTION: &str = "UPDATE TEACHER";

pub const MSG_CONTACT_FIELDS_ONLY: &str =
    "Teachers can only update their addresses, mobile number and photo.";

/// 管理员可修改全部字段；教师本人只能修改联系方式
pub async fn execute_update(
    storage: &dyn Storage,
    actor: Actor,
    teacher_id: i64,
    mut update_data: UpdateTeacherRequest,
) -> Result<Teacher> {
    if update_data.is_empty() {
        return Err(RecordsError::validation("No fields to update"));
    }

    let current = storage
        .get_teacher_by_id(teacher_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Teacher not found."))?;

    match actor.role {
        UserRole::SuperAdmin | UserRole::Admin => {}
        UserRole::Teacher if current.user_id == actor.user_id => {
            if update_data.touches_profile_fields() || update_data.date_of_birth.is_some() {
                return Err(RecordsError::forbidden(MSG_CONTACT_FIELDS_ONLY));
            }
        }
        _ => {
            return Err(RecordsError::forbidden(
                "You are not authorized to update this teacher.",
            ));
        }
    }

    if let Some(name) = update_data.name.as_mut() {
        *name = require_text("name", name)?;
    }
    if let Some(department_id) = update_data.department_id
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }

    storage
        .update_teacher(teacher_id, update_data)
        .await?
        .ok_or_else(|| RecordsError::not_found("Teacher not found."))
}

pub async fn update_teacher(
    service: &TeacherService,
    teacher_id: i64,
    update_data: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_update(storage.as_ref(), actor, teacher_id, update_data.clone()).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(teacher) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                teacher,
                "Teacher updated successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::TeacherNotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::services::test_support::fixture;

    #[tokio::test]
    async fn test_teacher_self_update_limited_to_contact_fields() {
        let f = fixture().await;

        let updated = execute_update(
            &f.storage,
            f.teacher_actor(),
            f.teacher.id,
            UpdateTeacherRequest {
                present_address: Some("Block C".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.present_address, "Block C");

        let err = execute_update(
            &f.storage,
            f.teacher_actor(),
            f.teacher.id,
            UpdateTeacherRequest {
                department_id: Some(f.department_id),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let renamed = execute_update(
            &f.storage,
            f.admin,
            f.teacher.id,
            UpdateTeacherRequest {
                name: Some("  Robert ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(renamed.name, "Robert");
    }
}
