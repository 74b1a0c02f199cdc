use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::format_date;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::users::Entity as Users;
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, normalize_page,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建教师：账号与档案在同一事务中写入
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await?;

        let user = insert_user(
            &txn,
            CreateUserRequest {
                username: req.username,
                email: req.email,
                password: req.password,
                role: UserRole::Teacher,
            },
            now,
        )
        .await?;

        let model = ActiveModel {
            name: Set(req.name),
            department_id: Set(req.department_id),
            user_id: Set(user.id),
            present_address: Set(req.present_address),
            permanent_address: Set(req.permanent_address),
            date_of_birth: Set(format_date(req.date_of_birth)),
            mobile_number: Set(req.mobile_number),
            photo_url: Set(req.photo_url),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let teacher = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(teacher.into_teacher())
    }

    pub async fn get_teacher_by_id_impl(&self, id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query teacher: {e}"))
            })?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query teacher: {e}"))
            })?;

        Ok(result.map(|m| m.into_teacher()))
    }

    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Teachers::find();

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        let paginator = select.order_by_asc(Column::Name).paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count teachers: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count teacher pages: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list teachers: {e}"))
        })?;

        Ok(TeacherListResponse {
            items: items.into_iter().map(|m| m.into_teacher()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_teacher_impl(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Teachers::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(present_address) = update.present_address {
            model.present_address = Set(present_address);
        }
        if let Some(permanent_address) = update.permanent_address {
            model.permanent_address = Set(permanent_address);
        }
        if let Some(date_of_birth) = update.date_of_birth {
            model.date_of_birth = Set(format_date(Some(date_of_birth)));
        }
        if let Some(mobile_number) = update.mobile_number {
            model.mobile_number = Set(mobile_number);
        }
        if let Some(photo_url) = update.photo_url {
            model.photo_url = Set(photo_url);
        }

        let updated = model.update(&txn).await?;
        txn.commit().await?;

        Ok(Some(updated.into_teacher()))
    }

    /// 删除教师账号；其开课记录的 teacher_id 置空
    pub async fn delete_teacher_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(teacher) = Teachers::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        Teachers::delete_by_id(teacher.id).exec(&txn).await?;
        Users::delete_by_id(teacher.user_id).exec(&txn).await?;
        txn.commit().await?;

        Ok(true)
    }
}
