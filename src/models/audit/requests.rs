use super::entities::AuditLevel;
use serde::Deserialize;

/// 写入审计日志（存储层使用）
#[derive(Debug, Clone)]
pub struct CreateAuditLog {
    pub created_by: Option<i64>,
    pub level: AuditLevel,
    pub action: String,
    pub method: String,
    pub path: String,
    pub ip_address: Option<String>,
    pub details: Option<String>,
    pub payload: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditLogListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub level: Option<AuditLevel>,
    pub created_by: Option<i64>,
}
