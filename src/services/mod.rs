pub mod auth;
pub mod dashboard;
pub mod departments;
pub mod marks;
pub mod semesters;
pub mod students;
pub mod subject_offerings;
pub mod subjects;
pub mod system;
pub mod teachers;
pub mod users;

#[cfg(test)]
pub(crate) mod test_support;

pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use departments::DepartmentService;
pub use marks::MarkService;
pub use semesters::SemesterService;
pub use students::StudentService;
pub use subject_offerings::SubjectOfferingService;
pub use subjects::SubjectService;
pub use system::SystemService;
pub use teachers::TeacherService;
pub use users::UserService;

use actix_web::{HttpMessage, HttpRequest, HttpResponse, http::StatusCode};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::errors::{ErrorKind, RecordsError, Result};
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, audit::entities::AuditPayload, users::entities::Actor};

/// 声明服务结构体
///
/// 服务在路由模块中以 `Lazy` 静态变量存在，存储实例在请求时从 app data 中取出。
macro_rules! declare_service {
    ($name:ident) => {
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> std::sync::Arc<dyn crate::storage::Storage> {
                if let Some(storage) = &self.storage {
                    storage.clone()
                } else {
                    request
                        .app_data::<actix_web::web::Data<std::sync::Arc<dyn crate::storage::Storage>>>()
                        .expect("Storage not found in app data")
                        .get_ref()
                        .clone()
                }
            }
        }
    };
}
pub(crate) use declare_service;

/// 当前请求的操作者；路由都挂在 RequireJWT 之后，取不到说明中间件缺失
pub(crate) fn current_actor(request: &HttpRequest) -> Result<Actor> {
    RequireJWT::extract_actor(request)
        .ok_or_else(|| RecordsError::authentication("Authentication required"))
}

/// 成功的写操作：附带请求数据的审计信息
pub(crate) fn audit_success<T: Serialize>(request: &HttpRequest, action: &str, data: &T) {
    request
        .extensions_mut()
        .insert(AuditPayload::action(action).with_data(data));
}

/// 领域错误转换为 HTTP 响应，并把错误信息挂到审计扩展上
///
/// `not_found_code` 为该资源对应的业务错误码。
pub(crate) fn error_response(
    request: &HttpRequest,
    action: &str,
    err: RecordsError,
    not_found_code: ErrorCode,
) -> HttpResponse {
    let (status, code) = match (&err, err.kind()) {
        (RecordsError::Integrity(_), _) => (StatusCode::BAD_REQUEST, ErrorCode::IntegrityViolation),
        (_, ErrorKind::Conflict) => (StatusCode::BAD_REQUEST, ErrorCode::Conflict),
        (_, ErrorKind::Validation) => (StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed),
        (_, ErrorKind::NotFound) => (StatusCode::NOT_FOUND, not_found_code),
        (_, ErrorKind::Forbidden) => (StatusCode::FORBIDDEN, ErrorCode::Forbidden),
        (_, ErrorKind::Authentication) => (StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized),
        (_, ErrorKind::Unexpected) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorCode::InternalServerError,
        ),
    };

    match err.kind() {
        ErrorKind::Unexpected => error!("{} failed: [{}] {}", action, err.code(), err.message()),
        ErrorKind::Conflict => warn!(
            "{} rejected: {} (raw: {})",
            action,
            err.message(),
            err.raw_error().unwrap_or("-")
        ),
        _ => info!("{} rejected: {}", action, err.message()),
    }

    let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
        "Internal server error".to_string()
    } else {
        err.message().to_string()
    };

    request
        .extensions_mut()
        .insert(AuditPayload::action(action).with_error(&err));

    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DomainIntegrityError;
    use actix_web::test::TestRequest;

    #[test]
    fn test_error_kinds_map_to_status() {
        let req = TestRequest::default().to_http_request();
        let cases = [
            (RecordsError::conflict("dup"), StatusCode::BAD_REQUEST),
            (
                RecordsError::from(DomainIntegrityError::new("readable", "raw")),
                StatusCode::BAD_REQUEST,
            ),
            (RecordsError::validation("bad"), StatusCode::BAD_REQUEST),
            (RecordsError::not_found("missing"), StatusCode::NOT_FOUND),
            (RecordsError::forbidden("no"), StatusCode::FORBIDDEN),
            (RecordsError::authentication("who"), StatusCode::UNAUTHORIZED),
            (
                RecordsError::database_operation("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let resp = error_response(&req, "TEST", err, ErrorCode::MarkNotFound);
            assert_eq!(resp.status(), status);
        }
    }

    #[test]
    fn test_error_attaches_audit_payload() {
        let req = TestRequest::default().to_http_request();
        let err = RecordsError::from(DomainIntegrityError::new("readable", "raw"));
        let _ = error_response(&req, "CREATE MARK", err, ErrorCode::MarkNotFound);

        let ext = req.extensions();
        let payload = ext.get::<AuditPayload>().unwrap();
        assert_eq!(payload.action.as_deref(), Some("CREATE MARK"));
        assert_eq!(payload.error_message.as_deref(), Some("readable"));
        assert_eq!(payload.raw_error.as_deref(), Some("raw"));
    }
}
