pub mod create;
pub mod delete;
pub mod query;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::departments::requests::{
    CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest,
};

super::declare_service!(DepartmentService);

impl DepartmentService {
    pub async fn create_department(
        &self,
        department_data: CreateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_department(self, department_data, request).await
    }

    pub async fn update_department(
        &self,
        department_id: i64,
        update_data: UpdateDepartmentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_department(self, department_id, update_data, request).await
    }

    pub async fn delete_department(
        &self,
        department_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_department(self, department_id, request).await
    }

    pub async fn get_department(
        &self,
        department_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::get_department(self, department_id, request).await
    }

    pub async fn list_departments(
        &self,
        query: DepartmentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_departments(self, query, request).await
    }
}
