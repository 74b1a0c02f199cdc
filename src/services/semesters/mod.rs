pub mod create;
pub mod delete;
pub mod query;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::semesters::requests::{CreateSemesterRequest, UpdateSemesterRequest};

super::declare_service!(SemesterService);

impl SemesterService {
    pub async fn create_semester(
        &self,
        semester_data: CreateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_semester(self, semester_data, request).await
    }

    pub async fn update_semester(
        &self,
        semester_id: i64,
        update_data: UpdateSemesterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_semester(self, semester_id, update_data, request).await
    }

    pub async fn delete_semester(
        &self,
        semester_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_semester(self, semester_id, request).await
    }

    pub async fn get_semester(
        &self,
        semester_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::get_semester(self, semester_id, request).await
    }

    pub async fn list_semesters(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        query::list_semesters(self, request).await
    }
}

/// 名称或序号与已有学期冲突时的提示
pub(crate) fn conflict_message(
    existing: &crate::models::semesters::entities::Semester,
    name: Option<&str>,
) -> String {
    if name == Some(existing.semester_name.as_str()) {
        format!("A semester named '{}' already exists.", existing.semester_name)
    } else {
        format!(
            "Semester number {} is already used by '{}'.",
            existing.semester_number, existing.semester_name
        )
    }
}
