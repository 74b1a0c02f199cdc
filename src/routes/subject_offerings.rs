use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::subject_offerings::requests::{
    CreateSubjectOfferingRequest, OfferedSubjectsQuery, SubjectOfferingListQuery,
    UpdateSubjectOfferingRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::SubjectOfferingService;
use crate::utils::SafeIDI64;

// 懒加载的全局 SubjectOfferingService 实例
static OFFERING_SERVICE: Lazy<SubjectOfferingService> =
    Lazy::new(SubjectOfferingService::new_lazy);

pub async fn list_offerings(
    req: HttpRequest,
    query: web::Query<SubjectOfferingListQuery>,
) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.list_offerings(query.into_inner(), &req).await
}

pub async fn create_offering(
    req: HttpRequest,
    body: web::Json<CreateSubjectOfferingRequest>,
) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.create_offering(body.into_inner(), &req).await
}

pub async fn list_offered_subjects(
    req: HttpRequest,
    query: web::Query<OfferedSubjectsQuery>,
) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE
        .list_offered_subjects(query.into_inner(), &req)
        .await
}

pub async fn get_offering(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.get_offering(path.0, &req).await
}

pub async fn update_offering(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubjectOfferingRequest>,
) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE
        .update_offering(path.0, body.into_inner(), &req)
        .await
}

pub async fn delete_offering(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    OFFERING_SERVICE.delete_offering(path.0, &req).await
}

// 配置路由
pub fn configure_subject_offering_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/subject-offerings")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_offerings))
                    .route(
                        web::post()
                            .to(create_offering)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            )
            // 院系某学期开设的课程，教师只能看到自己任教的课程
            .service(
                web::resource("/offered-subjects").route(
                    web::get()
                        .to(list_offered_subjects)
                        .wrap(middlewares::RequireRole::new_any(UserRole::staff_roles())),
                ),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_offering))
                    .route(
                        web::put()
                            .to(update_offering)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    )
                    .route(
                        web::delete()
                            .to(delete_offering)
                            .wrap(middlewares::RequireRole::new_any(UserRole::admin_roles())),
                    ),
            ),
    );
}
