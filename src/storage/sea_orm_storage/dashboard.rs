use super::SeaOrmStorage;
use crate::entity::prelude::*;
use crate::entity::users::Column as UserColumn;
use crate::errors::{RecordsError, Result};
use crate::models::{dashboard::DashboardStats, users::entities::UserRole};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

impl SeaOrmStorage {
    pub async fn dashboard_stats_impl(&self) -> Result<DashboardStats> {
        let map_err =
            |e: sea_orm::DbErr| RecordsError::database_operation(format!("Failed to count: {e}"));

        let total_users = Users::find().count(&self.db).await.map_err(map_err)?;
        let total_admins = Users::find()
            .filter(UserColumn::Role.is_in([UserRole::SUPER_ADMIN, UserRole::ADMIN]))
            .count(&self.db)
            .await
            .map_err(map_err)?;

        Ok(DashboardStats {
            total_users,
            total_admins,
            total_teachers: Teachers::find().count(&self.db).await.map_err(map_err)?,
            total_students: Students::find().count(&self.db).await.map_err(map_err)?,
            total_departments: Departments::find().count(&self.db).await.map_err(map_err)?,
            total_semesters: Semesters::find().count(&self.db).await.map_err(map_err)?,
            total_subjects: Subjects::find().count(&self.db).await.map_err(map_err)?,
            total_assigned_courses: SubjectOfferings::find()
                .count(&self.db)
                .await
                .map_err(map_err)?,
            total_marks: Marks::find().count(&self.db).await.map_err(map_err)?,
        })
    }
}
