pub mod capacity;
pub mod create;
pub mod delete;
pub mod query;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::subject_offerings::requests::{
    CreateSubjectOfferingRequest, OfferedSubjectsQuery, SubjectOfferingListQuery,
    UpdateSubjectOfferingRequest,
};

super::declare_service!(SubjectOfferingService);

impl SubjectOfferingService {
    pub async fn create_offering(
        &self,
        offering_data: CreateSubjectOfferingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_offering(self, offering_data, request).await
    }

    pub async fn update_offering(
        &self,
        offering_id: i64,
        update_data: UpdateSubjectOfferingRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_offering(self, offering_id, update_data, request).await
    }

    pub async fn delete_offering(
        &self,
        offering_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_offering(self, offering_id, request).await
    }

    pub async fn get_offering(
        &self,
        offering_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::get_offering(self, offering_id, request).await
    }

    pub async fn list_offerings(
        &self,
        query: SubjectOfferingListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_offerings(self, query, request).await
    }

    // 某院系某学期开设的课程
    pub async fn list_offered_subjects(
        &self,
        query: OfferedSubjectsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_offered_subjects(self, query, request).await
    }
}
