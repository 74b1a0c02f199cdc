use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{MarkService, is_student_self};
use crate::errors::{RecordsError, Result};
use crate::models::{
    ApiResponse, ErrorCode,
    marks::{
        entities::Mark,
        requests::{ResultsQuery, StudentMarksQuery},
        responses::{SemesterMarks, group_marks_by_semester},
    },
    users::entities::Actor,
};
use crate::services::{current_actor, error_response};
use crate::storage::Storage;

/// 教职工可查看任意学生，学生只能查看自己
async fn ensure_can_view_student(storage: &dyn Storage, actor: Actor, student_id: i64) -> Result<()> {
    if actor.role.is_staff() || is_student_self(storage, actor, student_id).await? {
        Ok(())
    } else {
        Err(RecordsError::forbidden("You can only view your own marks."))
    }
}

pub async fn execute_get(storage: &dyn Storage, actor: Actor, mark_id: i64) -> Result<Mark> {
    let mark = storage
        .get_mark_by_id(mark_id)
        .await?
        .ok_or_else(|| RecordsError::not_found("Mark not found."))?;
    ensure_can_view_student(storage, actor, mark.student_id).await?;
    Ok(mark)
}

pub async fn execute_student_marks(
    storage: &dyn Storage,
    actor: Actor,
    student_id: i64,
    query: StudentMarksQuery,
) -> Result<Vec<SemesterMarks>> {
    if storage.get_student_by_id(student_id).await?.is_none() {
        return Err(RecordsError::not_found("Student not found."));
    }
    ensure_can_view_student(storage, actor, student_id).await?;

    let marks = storage.list_marks_for_student(student_id, query).await?;
    Ok(group_marks_by_semester(marks))
}

pub async fn execute_subject_marks(storage: &dyn Storage, subject_id: i64) -> Result<Vec<Mark>> {
    if storage.get_subject_by_id(subject_id).await?.is_none() {
        return Err(RecordsError::not_found("Subject not found."));
    }
    storage.list_marks_for_subject(subject_id).await
}

pub async fn execute_results(
    storage: &dyn Storage,
    query: ResultsQuery,
) -> Result<Vec<SemesterMarks>> {
    if query.session.trim().is_empty() {
        return Err(RecordsError::validation("session cannot be empty"));
    }
    if storage
        .get_department_by_id(query.department_id)
        .await?
        .is_none()
    {
        return Err(RecordsError::not_found("Department not found."));
    }
    if storage.get_semester_by_id(query.semester_id).await?.is_none() {
        return Err(RecordsError::not_found("Semester not found."));
    }

    let marks = storage.list_department_results(query).await?;
    Ok(group_marks_by_semester(marks))
}

pub async fn get_mark(
    service: &MarkService,
    mark_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_get(storage.as_ref(), actor, mark_id).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(mark) => Ok(HttpResponse::Ok().json(ApiResponse::success(mark, "Mark retrieved successfully"))),
        Err(e) => Ok(error_response(request, "GET MARK", e, ErrorCode::MarkNotFound)),
    }
}

pub async fn list_student_marks(
    service: &MarkService,
    student_id: i64,
    query: StudentMarksQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let result = match current_actor(request) {
        Ok(actor) => execute_student_marks(storage.as_ref(), actor, student_id, query).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            groups,
            "Student marks retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST STUDENT MARKS",
            e,
            ErrorCode::StudentNotFound,
        )),
    }
}

pub async fn list_subject_marks(
    service: &MarkService,
    subject_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_subject_marks(storage.as_ref(), subject_id).await {
        Ok(marks) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            marks,
            "Subject marks retrieved successfully",
        ))),
        Err(e) => Ok(error_response(
            request,
            "LIST SUBJECT MARKS",
            e,
            ErrorCode::SubjectNotFound,
        )),
    }
}

pub async fn list_results(
    service: &MarkService,
    query: ResultsQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match execute_results(storage.as_ref(), query).await {
        Ok(groups) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            groups,
            "Results retrieved successfully",
        ))),
        Err(e) => Ok(error_response(request, "LIST RESULTS", e, ErrorCode::NotFound)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use crate::models::marks::{entities::ResultStatus, requests::NewMark};
    use crate::models::users::entities::UserRole;
    use crate::services::test_support::{Fixture, fixture};

    async fn insert_mark(f: &Fixture, student_id: i64) -> Mark {
        f.storage
            .create_mark(NewMark {
                student_id,
                subject_id: f.subject.id,
                semester_id: f.semester_id,
                scores: Default::default(),
                total_mark: 0.0,
                gpa: 0.0,
                result_status: ResultStatus::Published,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_student_sees_only_own_marks() {
        let f = fixture().await;
        let own = insert_mark(&f, f.student.id).await;
        let other = f.add_student("carol", "2020-0002").await;
        let others_mark = insert_mark(&f, other.id).await;

        assert!(execute_get(&f.storage, f.student_actor(), own.id).await.is_ok());
        let err = execute_get(&f.storage, f.student_actor(), others_mark.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = execute_student_marks(
            &f.storage,
            f.student_actor(),
            other.id,
            StudentMarksQuery::default(),
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_student_marks_grouped_by_semester() {
        let f = fixture().await;
        insert_mark(&f, f.student.id).await;

        let groups = execute_student_marks(
            &f.storage,
            f.admin,
            f.student.id,
            StudentMarksQuery::default(),
        )
        .await
        .unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].semester_id, f.semester_id);
        assert_eq!(groups[0].marks.len(), 1);
    }

    #[tokio::test]
    async fn test_results_filtered_by_session() {
        let f = fixture().await;
        insert_mark(&f, f.student.id).await;

        let query = |session: &str| ResultsQuery {
            department_id: f.department_id,
            semester_id: f.semester_id,
            session: session.to_string(),
        };

        let groups = execute_results(&f.storage, query("2020-21")).await.unwrap();
        assert_eq!(groups.len(), 1);

        let groups = execute_results(&f.storage, query("2019-20")).await.unwrap();
        assert!(groups.is_empty());

        let err = execute_results(
            &f.storage,
            ResultsQuery {
                department_id: 999,
                ..query("2020-21")
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_subject_marks_require_existing_subject() {
        let f = fixture().await;
        insert_mark(&f, f.student.id).await;

        assert_eq!(
            execute_subject_marks(&f.storage, f.subject.id)
                .await
                .unwrap()
                .len(),
            1
        );
        let err = execute_subject_marks(&f.storage, 999).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // 教师可以查看任意学生
        let teacher = Actor::new(f.teacher.user_id, UserRole::Teacher);
        assert!(
            execute_student_marks(&f.storage, teacher, f.student.id, StudentMarksQuery::default())
                .await
                .is_ok()
        );
    }
}
