use super::SeaOrmStorage;
use crate::entity::semesters::{ActiveModel, Column, Entity as Semesters};
use crate::errors::{RecordsError, Result};
use crate::models::semesters::{
    entities::Semester,
    requests::{CreateSemesterRequest, UpdateSemesterRequest},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_semester_impl(&self, req: CreateSemesterRequest) -> Result<Semester> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            semester_name: Set(req.semester_name),
            semester_number: Set(req.semester_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into_semester())
    }

    pub async fn get_semester_by_id_impl(&self, id: i64) -> Result<Option<Semester>> {
        let result = Semesters::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query semester: {e}"))
            })?;

        Ok(result.map(|m| m.into_semester()))
    }

    /// 名称或序号任一相同即视为冲突
    pub async fn find_conflicting_semester_impl(
        &self,
        semester_name: Option<&str>,
        semester_number: Option<i32>,
        exclude_id: Option<i64>,
    ) -> Result<Option<Semester>> {
        if semester_name.is_none() && semester_number.is_none() {
            return Ok(None);
        }

        let mut any = Condition::any();
        if let Some(name) = semester_name {
            any = any.add(Column::SemesterName.eq(name));
        }
        if let Some(number) = semester_number {
            any = any.add(Column::SemesterNumber.eq(number));
        }

        let mut select = Semesters::find().filter(any);
        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let result = select.one(&self.db).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to query semester: {e}"))
        })?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn list_semesters_impl(&self) -> Result<Vec<Semester>> {
        let items = Semesters::find()
            .order_by_asc(Column::SemesterNumber)
            .all(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to list semesters: {e}"))
            })?;

        Ok(items.into_iter().map(|m| m.into_semester()).collect())
    }

    pub async fn update_semester_impl(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Semesters::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.semester_name {
            model.semester_name = Set(name);
        }
        if let Some(number) = update.semester_number {
            model.semester_number = Set(number);
        }

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into_semester()))
    }

    /// 仍被课程引用的学期会被外键拒绝（RESTRICT）
    pub async fn delete_semester_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = Semesters::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
