pub mod audit_logs;
pub mod health;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::config::AppConfig;
use crate::models::audit::requests::AuditLogListQuery;

super::declare_service!(SystemService);

impl SystemService {
    pub(crate) fn get_config(&self) -> &'static AppConfig {
        AppConfig::get()
    }

    // 健康检查
    pub async fn health(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        health::health(self, request).await
    }

    // 审计日志
    pub async fn list_audit_logs(
        &self,
        query: AuditLogListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        audit_logs::list_audit_logs(self, query, request).await
    }
}
