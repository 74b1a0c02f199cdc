//! 成绩服务
//!
//! `execute_*` 为与 HTTP 无关的业务流程（存储 + 操作者 + 请求），
//! 同名的处理函数负责提取操作者、挂审计信息并转换为响应。

pub mod create;
pub mod delete;
pub mod grading;
pub mod query;
pub mod update;
pub mod workflow;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::Result;
use crate::models::marks::requests::{
    CreateMarkRequest, ResultsQuery, StudentMarksQuery, UpdateMarkRequest,
};
use crate::models::users::entities::{Actor, UserRole};
use crate::storage::Storage;

super::declare_service!(MarkService);

impl MarkService {
    pub async fn create_mark(
        &self,
        mark_data: CreateMarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_mark(self, mark_data, request).await
    }

    pub async fn update_mark(
        &self,
        mark_id: i64,
        update_data: UpdateMarkRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_mark(self, mark_id, update_data, request).await
    }

    pub async fn delete_mark(&self, mark_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        delete::delete_mark(self, mark_id, request).await
    }

    pub async fn get_mark(&self, mark_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        query::get_mark(self, mark_id, request).await
    }

    // 学生成绩（按学期分组）
    pub async fn list_student_marks(
        &self,
        student_id: i64,
        query: StudentMarksQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_student_marks(self, student_id, query, request).await
    }

    // 课程的全部成绩
    pub async fn list_subject_marks(
        &self,
        subject_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_subject_marks(self, subject_id, request).await
    }

    // 院系某届学生在某学期的成绩
    pub async fn list_results(
        &self,
        query: ResultsQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_results(self, query, request).await
    }
}

/// 操作者是否为讲授该课程的教师
pub(crate) async fn teaches_subject(
    storage: &dyn Storage,
    actor: Actor,
    subject_id: i64,
) -> Result<bool> {
    if actor.role != UserRole::Teacher {
        return Ok(false);
    }
    match storage.get_teacher_by_user_id(actor.user_id).await? {
        Some(teacher) => storage.teacher_offers_subject(teacher.id, subject_id).await,
        None => Ok(false),
    }
}

/// 操作者是否为该学生本人
pub(crate) async fn is_student_self(
    storage: &dyn Storage,
    actor: Actor,
    student_id: i64,
) -> Result<bool> {
    if actor.role != UserRole::Student {
        return Ok(false);
    }
    Ok(storage
        .get_student_by_user_id(actor.user_id)
        .await?
        .is_some_and(|student| student.id == student_id))
}
