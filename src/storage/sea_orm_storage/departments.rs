use super::SeaOrmStorage;
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo,
    departments::{
        entities::Department, requests::DepartmentListQuery, responses::DepartmentListResponse,
    },
    normalize_page,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_department_impl(&self, department_name: String) -> Result<Department> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            department_name: Set(department_name),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into_department())
    }

    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query department: {e}"))
            })?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn get_department_by_name_impl(
        &self,
        department_name: &str,
    ) -> Result<Option<Department>> {
        let result = Departments::find()
            .filter(Column::DepartmentName.eq(department_name))
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query department: {e}"))
            })?;

        Ok(result.map(|m| m.into_department()))
    }

    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Departments::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(&search.trim().to_lowercase());
            select = select.filter(Column::DepartmentName.contains(&escaped));
        }

        let paginator = select
            .order_by_asc(Column::DepartmentName)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count departments: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count department pages: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list departments: {e}"))
        })?;

        Ok(DepartmentListResponse {
            items: items.into_iter().map(|m| m.into_department()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_department_impl(
        &self,
        id: i64,
        department_name: String,
    ) -> Result<Option<Department>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Departments::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.department_name = Set(department_name);
        model.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into_department()))
    }

    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = Departments::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
