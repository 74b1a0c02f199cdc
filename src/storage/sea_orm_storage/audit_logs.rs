use super::SeaOrmStorage;
use crate::entity::audit_logs::{ActiveModel, Column, Entity as AuditLogs};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo,
    audit::{
        entities::AuditLog,
        requests::{AuditLogListQuery, CreateAuditLog},
    },
    normalize_page,
    system::responses::AuditLogListResponse,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 写入审计日志（单条插入，无需显式事务）
    pub async fn create_audit_log_impl(&self, log: CreateAuditLog) -> Result<AuditLog> {
        let payload = match log.payload {
            Some(value) => Some(serde_json::to_string(&value)?),
            None => None,
        };

        let model = ActiveModel {
            created_by: Set(log.created_by),
            level: Set(log.level.to_string()),
            action: Set(log.action),
            method: Set(log.method),
            path: Set(log.path),
            ip_address: Set(log.ip_address),
            details: Set(log.details),
            payload: Set(payload),
            created_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to write audit log: {e}"))
        })?;

        Ok(result.into_audit_log())
    }

    pub async fn list_audit_logs_with_pagination_impl(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = AuditLogs::find();

        if let Some(level) = query.level {
            select = select.filter(Column::Level.eq(level.to_string()));
        }
        if let Some(created_by) = query.created_by {
            select = select.filter(Column::CreatedBy.eq(created_by));
        }

        let paginator = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count audit logs: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count audit log pages: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list audit logs: {e}"))
        })?;

        Ok(AuditLogListResponse {
            items: items.into_iter().map(|m| m.into_audit_log()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
