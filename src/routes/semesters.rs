use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::semesters::requests::{CreateSemesterRequest, UpdateSemesterRequest};
use crate::models::users::entities::UserRole;
use crate::services::SemesterService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SemesterService 实例
static SEMESTER_SERVICE: Lazy<SemesterService> = Lazy::new(SemesterService::new_lazy);

pub async fn list_semesters(req: HttpRequest) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.list_semesters(&req).await
}

pub async fn create_semester(
    req: HttpRequest,
    body: web::Json<CreateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE
        .create_semester(body.into_inner(), &req)
        .await
}

pub async fn get_semester(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.get_semester(path.0, &req).await
}

pub async fn update_semester(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSemesterRequest>,
) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE
        .update_semester(path.0, body.into_inner(), &req)
        .await
}

pub async fn delete_semester(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    SEMESTER_SERVICE.delete_semester(path.0, &req).await
}

// 配置路由
pub fn configure_semester_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/semesters")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_semesters))
                    .route(
                        web::post()
                            .to(create_semester)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_semester))
                    .route(
                        web::put()
                            .to(update_semester)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_semester)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
