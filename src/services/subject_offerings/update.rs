use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectOfferingService, capacity};
use crate::config::AppConfig;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    subject_offerings::{entities::SubjectOffering, requests::UpdateSubjectOfferingRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;

const ACTION: &str = "UPDATE SUBJECT OFFERING";

/// 更新开课
///
/// 唯一性在 (教师, 院系, 课程) 变化时重新检查，容量在院系或课程变化时重新检查，
/// 两者都排除自身。
pub async fn execute_update(
    storage: &dyn Storage,
    offering_id: i64,
    update_data: UpdateSubjectOfferingRequest,
    cap: u64,
) -> Result<SubjectOffering> {
    if update_data.is_empty() {
        return Err(RecordsError::validation("No fields to update"));
    }

    let current = storage
        .get_subject_offering_by_id(offering_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Subject offering not found."))?;

    let department_id = update_data.department_id.unwrap_or(current.department_id);
    let subject_id = update_data.subject_id.unwrap_or(current.subject_id);
    let teacher_id = update_data.teacher_id.unwrap_or(current.teacher_id);

    if let Some(Some(teacher_id)) = update_data.teacher_id
        && storage.get_teacher_by_id(teacher_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Teacher not found."));
    }
    if update_data.department_id.is_some()
        && storage.get_department_by_id(department_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }
    let subject = storage
        .get_subject_by_id(subject_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Subject not found."))?;

    let triple_changed = department_id != current.department_id
        || subject_id != current.subject_id
        || teacher_id != current.teacher_id;
    let placement_changed =
        department_id != current.department_id || subject_id != current.subject_id;

    let duplicate = triple_changed
        && storage
            .find_subject_offering(department_id, subject_id, teacher_id, Some(offering_id))
            .await?
            .is_some();
    let existing = if placement_changed {
        storage
            .count_offerings_in_department_semester(
                department_id,
                subject.semester_id,
                Some(offering_id),
            )
            .await?
    } else {
        0
    };
    capacity::check_offering_rules(duplicate, existing, cap)?;

    storage
        .update_subject_offering(offering_id, update_data)
        .await?
        .ok_or_else(|| RecordsError::not_found("Subject offering not found."))
}

pub async fn update_offering(
    service: &SubjectOfferingService,
    offering_id: i64,
    update_data: UpdateSubjectOfferingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cap = AppConfig::get().records.max_subjects_per_department_semester;

    match execute_update(storage.as_ref(), offering_id, update_data.clone(), cap).await {
        Ok(offering) => {
            audit_success(request, ACTION, &update_data);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                offering,
                "Subject offering updated successfully",
            )))
        }
        Err(e) => Ok(error_response(
            request,
            ACTION,
            e,
            ErrorCode::SubjectOfferingNotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::subject_offerings::requests::CreateSubjectOfferingRequest;
    use crate::services::test_support::fixture;

    #[tokio::test]
    async fn test_reassigning_teacher_checks_duplicates_excluding_self() {
        let f = fixture().await;
        let first = f
            .storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: f.subject.id,
                teacher_id: None,
            })
            .await
            .unwrap();
        f.assign_teacher().await;

        // 与已有记录 (bob, 院系, 课程) 相同
        let err = execute_update(
            &f.storage,
            first.id,
            UpdateSubjectOfferingRequest {
                teacher_id: Some(Some(f.teacher.id)),
                ..Default::default()
            },
            7,
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), capacity::MSG_DUPLICATE_OFFERING);

        // 自身不变不算重复，容量也不重新计算
        let other = f.add_teacher("dave").await;
        let updated = execute_update(
            &f.storage,
            first.id,
            UpdateSubjectOfferingRequest {
                teacher_id: Some(Some(other.id)),
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap();
        assert_eq!(updated.teacher_id, Some(other.id));

        let cleared = execute_update(
            &f.storage,
            first.id,
            UpdateSubjectOfferingRequest {
                teacher_id: Some(None),
                ..Default::default()
            },
            7,
        )
        .await
        .unwrap();
        assert_eq!(cleared.teacher_id, None);
    }

    #[tokio::test]
    async fn test_moving_subject_rechecks_capacity() {
        let f = fixture().await;
        let second = f.add_subject("CSE-102").await;
        f.storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: f.subject.id,
                teacher_id: None,
            })
            .await
            .unwrap();
        let moving = f
            .storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: second.id,
                teacher_id: Some(f.teacher.id),
            })
            .await
            .unwrap();

        let third = f.add_subject("CSE-103").await;
        let err = execute_update(
            &f.storage,
            moving.id,
            UpdateSubjectOfferingRequest {
                subject_id: Some(third.id),
                ..Default::default()
            },
            1,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), capacity::capacity_message(1));

        assert!(
            execute_update(
                &f.storage,
                moving.id,
                UpdateSubjectOfferingRequest {
                    subject_id: Some(third.id),
                    ..Default::default()
                },
                2,
            )
            .await
            .is_ok()
        );
    }
}
