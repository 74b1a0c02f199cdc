/*!
 * 审计日志中间件
 *
 * 在处理函数之后运行，为每个写请求和失败的请求写一条审计记录。
 * 处理函数可以通过请求扩展中的 [`AuditPayload`] 提供动作名称、错误信息和请求数据。
 *
 * ```rust,ignore
 * App::new().wrap(AuditLog).configure(routes::configure_routes)
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error};

use crate::models::audit::{
    entities::{AuditLevel, AuditPayload},
    requests::CreateAuditLog,
};
use crate::models::users::entities::User;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AuditLog;

/// 是否需要记录：跳过预检请求和成功的只读请求
pub fn should_audit(method: &Method, status: u16) -> bool {
    if method == Method::OPTIONS {
        return false;
    }
    !(method == Method::GET && status < 400)
}

impl<S, B> Transform<S, ServiceRequest> for AuditLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuditLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuditLogMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct AuditLogMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuditLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();

        Box::pin(async move {
            let res = srv.call(req).await?;

            let status = res.status().as_u16();
            let method = res.request().method().clone();
            if !should_audit(&method, status) {
                return Ok(res);
            }

            let request = res.request();
            let path = request.path().to_string();
            let ip_address = request
                .connection_info()
                .realip_remote_addr()
                .map(str::to_string);

            let (created_by, payload) = {
                let extensions = request.extensions();
                (
                    extensions.get::<User>().map(|u| u.id),
                    extensions.get::<AuditPayload>().cloned(),
                )
            };
            let payload = payload.unwrap_or_default();

            let action = payload
                .action
                .clone()
                .unwrap_or_else(|| format!("{method} {path}"));
            let details = payload.error_message.clone();

            let log = CreateAuditLog {
                created_by,
                level: AuditLevel::from_status(status),
                action,
                method: method.to_string(),
                path,
                ip_address,
                details,
                payload: payload.into_json(),
            };

            let storage = request
                .app_data::<web::Data<Arc<dyn Storage>>>()
                .map(|s| s.get_ref().clone());

            match storage {
                Some(storage) => match storage.create_audit_log(log).await {
                    Ok(entry) => debug!("Audit log {} written: {}", entry.id, entry.action),
                    Err(e) => error!("Failed to write audit log: {}", e),
                },
                None => error!("Storage not found in app data, audit log dropped"),
            }

            Ok(res)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_audit() {
        assert!(!should_audit(&Method::OPTIONS, 400));
        assert!(!should_audit(&Method::GET, 200));
        assert!(should_audit(&Method::GET, 403));
        assert!(should_audit(&Method::POST, 201));
        assert!(should_audit(&Method::PATCH, 400));
        assert!(should_audit(&Method::DELETE, 200));
    }
}
