use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, normalize_page,
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_subject_impl(&self, req: CreateSubjectRequest) -> Result<Subject> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            subject_title: Set(req.subject_title),
            subject_code: Set(req.subject_code),
            credits: Set(req.credits),
            semester_id: Set(req.semester_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into_subject())
    }

    pub async fn get_subject_by_id_impl(&self, id: i64) -> Result<Option<Subject>> {
        let result = Subjects::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query subject: {e}"))
            })?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn get_subject_by_code_impl(&self, subject_code: &str) -> Result<Option<Subject>> {
        let result = Subjects::find()
            .filter(Column::SubjectCode.eq(subject_code))
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query subject: {e}"))
            })?;

        Ok(result.map(|m| m.into_subject()))
    }

    pub async fn list_subjects_with_pagination_impl(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Subjects::find();

        if let Some(semester_id) = query.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id));
        }

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::SubjectTitle.contains(&escaped))
                    .add(Column::SubjectCode.contains(escaped.to_uppercase())),
            );
        }

        let paginator = select
            .order_by_asc(Column::SubjectCode)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count subjects: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count subject pages: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list subjects: {e}"))
        })?;

        Ok(SubjectListResponse {
            items: items.into_iter().map(|m| m.into_subject()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_subject_impl(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Subjects::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(title) = update.subject_title {
            model.subject_title = Set(title);
        }
        if let Some(code) = update.subject_code {
            model.subject_code = Set(code);
        }
        if let Some(credits) = update.credits {
            model.credits = Set(credits);
        }
        if let Some(semester_id) = update.semester_id {
            model.semester_id = Set(semester_id);
        }

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into_subject()))
    }

    pub async fn delete_subject_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = Subjects::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
