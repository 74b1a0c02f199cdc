//! 审计日志实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub created_by: Option<i64>,
    pub level: String,
    pub action: String,
    pub method: String,
    pub path: String,
    pub ip_address: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub details: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub payload: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_audit_log(self) -> crate::models::audit::entities::AuditLog {
        use crate::models::audit::entities::{AuditLevel, AuditLog};

        AuditLog {
            id: self.id,
            created_by: self.created_by,
            level: self.level.parse::<AuditLevel>().unwrap_or(AuditLevel::Info),
            action: self.action,
            method: self.method,
            path: self.path,
            ip_address: self.ip_address,
            details: self.details,
            payload: self
                .payload
                .and_then(|p| serde_json::from_str(&p).ok()),
            created_at: super::to_datetime(self.created_at),
        }
    }
}
