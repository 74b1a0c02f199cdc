use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::marks::requests::{
    CreateMarkRequest, ResultsQuery, StudentMarksQuery, UpdateMarkRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::MarkService;
use crate::utils::{SafeIDI64, SafeStudentIdI64, SafeSubjectIdI64};

// 懒加载的全局 MarkService 实例
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn create_mark(
    req: HttpRequest,
    body: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.create_mark(body.into_inner(), &req).await
}

pub async fn update_mark(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .update_mark(path.0, body.into_inner(), &req)
        .await
}

pub async fn delete_mark(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(path.0, &req).await
}

pub async fn get_mark(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.get_mark(path.0, &req).await
}

pub async fn list_student_marks(
    req: HttpRequest,
    path: SafeStudentIdI64,
    query: web::Query<StudentMarksQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .list_student_marks(path.0, query.into_inner(), &req)
        .await
}

pub async fn list_subject_marks(
    req: HttpRequest,
    path: SafeSubjectIdI64,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_subject_marks(path.0, &req).await
}

pub async fn list_results(
    req: HttpRequest,
    query: web::Query<ResultsQuery>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_results(query.into_inner(), &req).await
}

// 配置路由
pub fn configure_mark_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_mark)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            // 院系 / 学期 / 届别的成绩汇总
            .service(
                web::resource("/results").route(
                    web::get()
                        .to(list_results)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            // 教职工或学生本人（业务层检查）
            .service(
                web::resource("/students/{student_id}").route(web::get().to(list_student_marks)),
            )
            .service(
                web::resource("/subjects/{subject_id}").route(
                    web::get()
                        .to(list_subject_marks)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_mark))
                    // 所有角色可访问，可改字段由角色和成绩状态决定
                    .route(web::patch().to(update_mark))
                    // 管理员或该课程的任课教师（业务层检查）
                    .route(
                        web::delete()
                            .to(delete_mark)
                            .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                    ),
            ),
    );
}
