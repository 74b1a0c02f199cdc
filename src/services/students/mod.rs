pub mod create;
pub mod delete;
pub mod query;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::students::requests::{
    CreateStudentRequest, StudentListQuery, UpdateStudentRequest,
};

super::declare_service!(StudentService);

impl StudentService {
    pub async fn create_student(
        &self,
        student_data: CreateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_student(self, student_data, request).await
    }

    pub async fn update_student(
        &self,
        student_id: i64,
        update_data: UpdateStudentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_student(self, student_id, update_data, request).await
    }

    pub async fn delete_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_student(self, student_id, request).await
    }

    pub async fn get_student(
        &self,
        student_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::get_student(self, student_id, request).await
    }

    // 当前登录学生的档案
    pub async fn get_own_profile(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        query::get_own_profile(self, request).await
    }

    pub async fn list_students(
        &self,
        query: StudentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_students(self, query, request).await
    }
}

pub(crate) fn duplicate_registration_message(registration: &str) -> String {
    format!("Registration number '{registration}' already exists in our records.")
}
