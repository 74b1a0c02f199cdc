use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{SubjectOfferingService, capacity};
use crate::config::AppConfig;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    subject_offerings::{entities::SubjectOffering, requests::CreateSubjectOfferingRequest},
};
use crate::services::{audit_success, error_response};
use crate::storage::Storage;

const ACTION: &str = "CREATE SUBJECT OFFERING";

/// 创建开课：引用存在 -> 唯一性 -> 院系学期容量
pub async fn execute_create(
    storage: &dyn Storage,
    offering_data: CreateSubjectOfferingRequest,
    cap: u64,
) -> Result<SubjectOffering> {
    if let Some(teacher_id) = offering_data.teacher_id
        && storage.get_teacher_by_id(teacher_id).await?.is_none()
    {
        return Err(RecordsError::not_found("Teacher not found."));
    }
    if storage
        .get_department_by_id(offering_data.department_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }
    let subject = storage
        .get_subject_by_id(offering_data.subject_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Subject not found."))?;

    let duplicate = storage
        .find_subject_offering(
            offering_data.department_id,
            offering_data.subject_id,
            offering_data.teacher_id,
            None,
        )
        .await?
        .is_some();
    let existing = storage
        .count_offerings_in_department_semester(
            offering_data.department_id,
            subject.semester_id,
            None,
        )
        .await?;
    capacity::check_offering_rules(duplicate, existing, cap)?;

    storage.create_subject_offering(offering_data).await
}

pub async fn create_offering(
    service: &SubjectOfferingService,
    offering_data: CreateSubjectOfferingRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cap = AppConfig::get().records.max_subjects_per_department_semester;

    match execute_create(storage.as_ref(), offering_data.clone(), cap).await {
        Ok(offering) => {
            audit_success(request, ACTION, &offering_data);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                offering,
                "Subject offering created successfully",
            )))
        }
        Err(e) => Ok(error_response(request, ACTION, e, ErrorCode::NotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::services::test_support::fixture;

    const CAP: u64 = 7;

    #[tokio::test]
    async fn test_eighth_offering_in_department_semester_rejected() {
        let f = fixture().await;

        // 夹具课程 + 6 门新课程 = 7 条开课
        let mut subject_ids = vec![f.subject.id];
        for n in 1..=6 {
            subject_ids.push(f.add_subject(&format!("CSE-20{n}")).await.id);
        }
        for subject_id in subject_ids {
            execute_create(
                &f.storage,
                CreateSubjectOfferingRequest {
                    department_id: f.department_id,
                    subject_id,
                    teacher_id: None,
                },
                CAP,
            )
            .await
            .unwrap();
        }

        let eighth = f.add_subject("CSE-301").await;
        let err = execute_create(
            &f.storage,
            CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: eighth.id,
                teacher_id: Some(f.teacher.id),
            },
            CAP,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), capacity::capacity_message(CAP));
    }

    #[tokio::test]
    async fn test_duplicate_offering_rejected() {
        let f = fixture().await;
        let req = CreateSubjectOfferingRequest {
            department_id: f.department_id,
            subject_id: f.subject.id,
            teacher_id: Some(f.teacher.id),
        };
        execute_create(&f.storage, req.clone(), CAP).await.unwrap();

        let err = execute_create(&f.storage, req, CAP).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.message(), capacity::MSG_DUPLICATE_OFFERING);
    }

    #[tokio::test]
    async fn test_late_duplicate_caught_by_unique_index() {
        let f = fixture().await;
        let req = CreateSubjectOfferingRequest {
            department_id: f.department_id,
            subject_id: f.subject.id,
            teacher_id: Some(f.teacher.id),
        };

        // 两个请求都已通过预检查，直接写入
        f.storage.create_subject_offering(req.clone()).await.unwrap();
        let err = f.storage.create_subject_offering(req).await.unwrap_err();

        assert!(matches!(err, RecordsError::Integrity(_)));
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(
            err.message(),
            "This teacher is already assigned to this subject in the selected department."
        );
        assert!(
            err.raw_error()
                .is_some_and(|raw| raw.contains("subject_offerings.department_id"))
        );
    }

    #[tokio::test]
    async fn test_late_duplicate_without_teacher_caught_by_unique_index() {
        let f = fixture().await;
        let req = CreateSubjectOfferingRequest {
            department_id: f.department_id,
            subject_id: f.subject.id,
            teacher_id: None,
        };

        f.storage.create_subject_offering(req.clone()).await.unwrap();
        let err = f.storage.create_subject_offering(req.clone()).await.unwrap_err();

        assert!(matches!(err, RecordsError::Integrity(_)));
        assert_eq!(
            err.message(),
            "This subject is already offered without a teacher in the selected department."
        );

        // 预检查同样拦截
        let err = execute_create(&f.storage, req, CAP).await.unwrap_err();
        assert_eq!(err.message(), capacity::MSG_DUPLICATE_OFFERING);

        // 分配了教师的同一课程不受影响
        f.storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: f.subject.id,
                teacher_id: Some(f.teacher.id),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_teacher_is_not_found() {
        let f = fixture().await;
        let err = execute_create(
            &f.storage,
            CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: f.subject.id,
                teacher_id: Some(999),
            },
            CAP,
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Teacher not found.");
    }
}
