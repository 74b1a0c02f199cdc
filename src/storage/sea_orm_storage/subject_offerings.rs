use super::SeaOrmStorage;
use crate::entity::subject_offerings::{ActiveModel, Column, Entity as SubjectOfferings};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, normalize_page,
    subject_offerings::{
        entities::SubjectOffering,
        requests::{
            CreateSubjectOfferingRequest, SubjectOfferingListQuery, UpdateSubjectOfferingRequest,
        },
        responses::{OfferedSubject, SubjectOfferingListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    pub async fn create_subject_offering_impl(
        &self,
        req: CreateSubjectOfferingRequest,
    ) -> Result<SubjectOffering> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            department_id: Set(req.department_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(req.teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let txn = self.db.begin().await?;
        let result = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(result.into_subject_offering())
    }

    pub async fn get_subject_offering_by_id_impl(
        &self,
        id: i64,
    ) -> Result<Option<SubjectOffering>> {
        let result = SubjectOfferings::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query subject offering: {e}"))
            })?;

        Ok(result.map(|m| m.into_subject_offering()))
    }

    pub async fn find_subject_offering_impl(
        &self,
        department_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
        exclude_id: Option<i64>,
    ) -> Result<Option<SubjectOffering>> {
        let mut select = SubjectOfferings::find()
            .filter(Column::DepartmentId.eq(department_id))
            .filter(Column::SubjectId.eq(subject_id));

        // NULL 不能用等号比较
        select = match teacher_id {
            Some(teacher_id) => select.filter(Column::TeacherId.eq(teacher_id)),
            None => select.filter(Column::TeacherId.is_null()),
        };

        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let result = select.one(&self.db).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to query subject offering: {e}"))
        })?;

        Ok(result.map(|m| m.into_subject_offering()))
    }

    /// 同一院系中，课程属于指定学期的开课数量
    pub async fn count_offerings_in_department_semester_impl(
        &self,
        department_id: i64,
        semester_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<u64> {
        let mut select = SubjectOfferings::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::subject_offerings::Relation::Subject.def(),
            )
            .filter(Column::DepartmentId.eq(department_id))
            .filter(SubjectColumn::SemesterId.eq(semester_id));

        if let Some(id) = exclude_id {
            select = select.filter(Column::Id.ne(id));
        }

        let count = select.count(&self.db).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count subject offerings: {e}"))
        })?;

        Ok(count)
    }

    pub async fn teacher_offers_subject_impl(
        &self,
        teacher_id: i64,
        subject_id: i64,
    ) -> Result<bool> {
        let count = SubjectOfferings::find()
            .filter(Column::TeacherId.eq(teacher_id))
            .filter(Column::SubjectId.eq(subject_id))
            .count(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query subject offering: {e}"))
            })?;

        Ok(count > 0)
    }

    pub async fn list_subject_offerings_with_pagination_impl(
        &self,
        query: SubjectOfferingListQuery,
    ) -> Result<SubjectOfferingListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = SubjectOfferings::find();

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let paginator = select.order_by_asc(Column::Id).paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count subject offerings: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!(
                "Failed to count subject offering pages: {e}"
            ))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list subject offerings: {e}"))
        })?;

        Ok(SubjectOfferingListResponse {
            items: items
                .into_iter()
                .map(|m| m.into_subject_offering())
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_subject_offering_impl(
        &self,
        id: i64,
        update: UpdateSubjectOfferingRequest,
    ) -> Result<Option<SubjectOffering>> {
        let txn = self.db.begin().await?;

        let Some(existing) = SubjectOfferings::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(department_id) = update.department_id {
            model.department_id = Set(department_id);
        }
        if let Some(subject_id) = update.subject_id {
            model.subject_id = Set(subject_id);
        }
        if let Some(teacher_id) = update.teacher_id {
            model.teacher_id = Set(teacher_id);
        }

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into_subject_offering()))
    }

    pub async fn delete_subject_offering_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;
        let result = SubjectOfferings::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    /// 某院系某学期开设的课程，可按教师过滤
    pub async fn list_offered_subjects_impl(
        &self,
        semester_id: i64,
        department_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<OfferedSubject>> {
        let mut select = SubjectOfferings::find()
            .find_also_related(Subjects)
            .filter(Column::DepartmentId.eq(department_id))
            .filter(SubjectColumn::SemesterId.eq(semester_id));

        if let Some(teacher_id) = teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        let rows = select
            .order_by_asc(SubjectColumn::SubjectCode)
            .all(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to list offered subjects: {e}"))
            })?;

        Ok(rows
            .into_iter()
            .filter_map(|(offering, subject)| {
                subject.map(|subject| OfferedSubject {
                    offering_id: offering.id,
                    teacher_id: offering.teacher_id,
                    subject: subject.into_subject(),
                })
            })
            .collect())
    }
}
