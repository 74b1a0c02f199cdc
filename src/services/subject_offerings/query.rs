use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubjectOfferingService;
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    subject_offerings::{
        requests::{OfferedSubjectsQuery, SubjectOfferingListQuery},
        responses::OfferedSubject,
    },
    users::entities::{Actor, UserRole},
};
use crate::services::{current_actor, error_response};
use crate::storage::Storage;

pub async fn get_offering(
    service: &SubjectOfferingService,
    offering_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_subject_offering_by_id(offering_id).await {
        Ok(Some(offering)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            offering,
            "Subject offering retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubjectOfferingNotFound,
            "Subject offering not found.",
        ))),
        Err(e) => Ok(error_response(
            request,
            "GET SUBJECT OFFERING",
            e,
            ErrorCode::SubjectOfferingNotFound,
        )),
    }
}

pub async fn list_offerings(
    service: &SubjectOfferingService,
    query: SubjectOfferingListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_subject_offerings_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            response,
            "Subject offerings retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST SUBJECT OFFERINGS",
            e,
            ErrorCode::SubjectOfferingNotFound,
        )),
    }
}

/// 教师只能看到自己讲授的课程
pub async fn execute_offered_subjects(
    storage: &dyn Storage,
    actor: Actor,
    query: OfferedSubjectsQuery,
) -> Result<Vec<OfferedSubject>> {
    let teacher_id = match actor.role {
        UserRole::Teacher => match storage.get_teacher_by_user_id(actor.user_id).await? {
            Some(teacher) => Some(teacher.id),
            None => return Ok(Vec::new()),
        },
        UserRole::Student => {
            return Err(RecordsError::forbidden("Access denied."));
        }
        UserRole::SuperAdmin | UserRole::Admin => None,
    };

    storage
        .list_offered_subjects(query.semester_id, query.department_id, teacher_id)
        .await
}

pub async fn list_offered_subjects(
    service: &SubjectOfferingService,
    query: OfferedSubjectsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_offered_subjects(storage.as_ref(), actor, query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(subjects) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            subjects,
            "Offered subjects retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST OFFERED SUBJECTS",
            e,
            ErrorCode::NotFound,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::subject_offerings::requests::CreateSubjectOfferingRequest;
    use crate::services::test_support::fixture;

    #[tokio::test]
    async fn test_teacher_sees_only_own_subjects() {
        let f = fixture().await;
        f.assign_teacher().await;
        let other_subject = f.add_subject("CSE-102").await;
        f.storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: f.department_id,
                subject_id: other_subject.id,
                teacher_id: None,
            })
            .await
            .unwrap();

        let query = || OfferedSubjectsQuery {
            semester_id: f.semester_id,
            department_id: f.department_id,
        };

        let all = execute_offered_subjects(&f.storage, f.admin, query())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);

        let own = execute_offered_subjects(&f.storage, f.teacher_actor(), query())
            .await
            .unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].subject.id, f.subject.id);
    }
}
