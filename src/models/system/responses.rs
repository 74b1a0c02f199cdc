use serde::Serialize;

use crate::models::{audit::entities::AuditLog, common::PaginatedResponse};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub system_name: String,
    pub version: &'static str,
    pub database: &'static str,
    pub uptime_seconds: i64,
}

pub type AuditLogListResponse = PaginatedResponse<AuditLog>;
