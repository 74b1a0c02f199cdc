use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::format_date;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::users::Entity as Users;
use crate::errors::{RecordsError, Result};
use crate::models::{
    PaginationInfo, normalize_page,
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::{entities::UserRole, requests::CreateUserRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生：账号与档案在同一事务中写入，任一失败整体回滚
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        let txn = self.db.begin().await?;

        let user = insert_user(
            &txn,
            CreateUserRequest {
                username: req.username,
                email: req.email,
                password: req.password,
                role: UserRole::Student,
            },
            now,
        )
        .await?;

        let model = ActiveModel {
            name: Set(req.name),
            registration: Set(req.registration),
            session: Set(req.session),
            department_id: Set(Some(req.department_id)),
            semester_id: Set(Some(req.semester_id)),
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

        let student = model.insert(&txn).await?;
        txn.commit().await?;

        Ok(student.into_student())
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query student: {e}"))
            })?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query student: {e}"))
            })?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn get_student_by_registration_impl(
        &self,
        registration: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::Registration.eq(registration))
            .one(&self.db)
            .await
            .map_err(|e| {
                RecordsError::database_operation(format!("Failed to query student: {e}"))
            })?;

        Ok(result.map(|m| m.into_student()))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let (page, size) = normalize_page(query.page, query.size);

        let mut select = Students::find();

        if let Some(department_id) = query.department_id {
            select = select.filter(Column::DepartmentId.eq(department_id));
        }
        if let Some(semester_id) = query.semester_id {
            select = select.filter(Column::SemesterId.eq(semester_id));
        }
        if let Some(ref session) = query.session {
            select = select.filter(Column::Session.eq(session.trim()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Name.contains(&escaped))
                    .add(Column::Registration.contains(&escaped)),
            );
        }

        let paginator = select
            .order_by_asc(Column::Registration)
            .paginate(&self.db, size);

        let total = paginator.num_items().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count students: {e}"))
        })?;
        let pages = paginator.num_pages().await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to count student pages: {e}"))
        })?;
        let items = paginator.fetch_page(page - 1).await.map_err(|e| {
            RecordsError::database_operation(format!("Failed to list students: {e}"))
        })?;

        Ok(StudentListResponse {
            items: items.into_iter().map(|m| m.into_student()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        let txn = self.db.begin().await?;

        let Some(existing) = Students::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.updated_at = Set(chrono::Utc::now().timestamp());

        if let Some(name) = update.name {
            model.name = Set(name);
        }
        if let Some(registration) = update.registration {
            model.registration = Set(registration);
        }
        if let Some(session) = update.session {
            model.session = Set(session);
        }
        if let Some(department_id) = update.department_id {
            model.department_id = Set(Some(department_id));
        }
        if let Some(semester_id) = update.semester_id {
            model.semester_id = Set(Some(semester_id));
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

        Ok(Some(updated.into_student()))
    }

    /// 删除账号，学生档案与成绩随外键级联删除
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self.db.begin().await?;

        let Some(student) = Students::find_by_id(id).one(&txn).await? else {
            return Ok(false);
        };

        Students::delete_by_id(student.id).exec(&txn).await?;
        Users::delete_by_id(student.user_id).exec(&txn).await?;
        txn.commit().await?;

        Ok(true)
    }
}
