//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 会违反约束的写操作都在 `self.db.begin()` 开启的事务内执行，
//! 出错时事务随 drop 回滚，连接归还连接池时已是干净状态。

mod audit_logs;
mod dashboard;
mod departments;
mod marks;
mod semesters;
mod students;
mod subject_offerings;
mod subjects;
mod teachers;
mod users;

pub use marks::MSG_MARK_CHANGED;

use crate::config::AppConfig;
use crate::errors::{RecordsError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        Self::connect(
            &config.database.url,
            config.database.pool_size,
            config.database.timeout,
        )
        .await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(url: &str, pool_size: u32, timeout: u64) -> Result<Self> {
        let db_url = Self::build_database_url(url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, pool_size, timeout).await?
        } else {
            Self::connect_generic(&db_url, pool_size, timeout).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| RecordsError::database_operation(format!("Database migration failed: {e}")))?;

        info!("SeaORM storage initialized, database: {}", db_url);

        Ok(Self { db })
    }

    /// 测试用：单连接内存数据库
    #[cfg(test)]
    pub(crate) async fn new_in_memory() -> Result<Self> {
        Self::connect("sqlite::memory:", 1, 5).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let in_memory = url.contains(":memory:");

        let mut opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| RecordsError::database_config(format!("Invalid SQLite URL: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        if !in_memory {
            opt = opt
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal)
                .pragma("mmap_size", "536870912")
                .pragma("wal_autocheckpoint", "1000");
        }

        // 内存库随连接关闭而消失，连接不能被回收
        let (idle_timeout, max_lifetime) = if in_memory {
            (None, None)
        } else {
            (Some(Duration::from_secs(300)), Some(Duration::from_secs(1800)))
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(idle_timeout)
            .max_lifetime(max_lifetime)
            .connect_with(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("SQLite connection failed: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, pool_size: u32, timeout: u64) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(pool_size)
            .min_connections(pool_size.min(5))
            .connect_timeout(Duration::from_secs(timeout))
            .acquire_timeout(Duration::from_secs(timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| RecordsError::database_connection(format!("Unable to connect to database: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(RecordsError::database_config(format!(
                "Cannot infer database type from URL: {url}. Supported: sqlite:, postgres://, mysql://, or a .db/.sqlite file path"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    audit::{
        entities::AuditLog,
        requests::{AuditLogListQuery, CreateAuditLog},
    },
    dashboard::DashboardStats,
    departments::{
        entities::Department, requests::DepartmentListQuery, responses::DepartmentListResponse,
    },
    marks::{
        entities::Mark,
        requests::{NewMark, ResultsQuery, StudentMarksQuery},
    },
    semesters::{
        entities::Semester,
        requests::{CreateSemesterRequest, UpdateSemesterRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    subject_offerings::{
        entities::SubjectOffering,
        requests::{
            CreateSubjectOfferingRequest, SubjectOfferingListQuery, UpdateSubjectOfferingRequest,
        },
        responses::{OfferedSubject, SubjectOfferingListResponse},
    },
    subjects::{
        entities::Subject,
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
        responses::SubjectListResponse,
    },
    system::responses::AuditLogListResponse,
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    async fn ping(&self) -> Result<()> {
        self.db
            .execute_unprepared("SELECT 1")
            .await
            .map_err(|e| RecordsError::database_connection(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 院系模块
    async fn create_department(&self, department_name: String) -> Result<Department> {
        self.create_department_impl(department_name).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn get_department_by_name(&self, department_name: &str) -> Result<Option<Department>> {
        self.get_department_by_name_impl(department_name).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: i64,
        department_name: String,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, department_name).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 学期模块
    async fn create_semester(&self, semester: CreateSemesterRequest) -> Result<Semester> {
        self.create_semester_impl(semester).await
    }

    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>> {
        self.get_semester_by_id_impl(id).await
    }

    async fn find_conflicting_semester(
        &self,
        semester_name: Option<&str>,
        semester_number: Option<i32>,
        exclude_id: Option<i64>,
    ) -> Result<Option<Semester>> {
        self.find_conflicting_semester_impl(semester_name, semester_number, exclude_id)
            .await
    }

    async fn list_semesters(&self) -> Result<Vec<Semester>> {
        self.list_semesters_impl().await
    }

    async fn update_semester(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>> {
        self.update_semester_impl(id, update).await
    }

    async fn delete_semester(&self, id: i64) -> Result<bool> {
        self.delete_semester_impl(id).await
    }

    // 课程模块
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject> {
        self.create_subject_impl(subject).await
    }

    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>> {
        self.get_subject_by_id_impl(id).await
    }

    async fn get_subject_by_code(&self, subject_code: &str) -> Result<Option<Subject>> {
        self.get_subject_by_code_impl(subject_code).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<Subject>> {
        self.update_subject_impl(id, update).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>> {
        self.get_student_by_user_id_impl(user_id).await
    }

    async fn get_student_by_registration(&self, registration: &str) -> Result<Option<Student>> {
        self.get_student_by_registration_impl(registration).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(teacher).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_user_id_impl(user_id).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    // 开课模块
    async fn create_subject_offering(
        &self,
        offering: CreateSubjectOfferingRequest,
    ) -> Result<SubjectOffering> {
        self.create_subject_offering_impl(offering).await
    }

    async fn get_subject_offering_by_id(&self, id: i64) -> Result<Option<SubjectOffering>> {
        self.get_subject_offering_by_id_impl(id).await
    }

    async fn find_subject_offering(
        &self,
        department_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
        exclude_id: Option<i64>,
    ) -> Result<Option<SubjectOffering>> {
        self.find_subject_offering_impl(department_id, subject_id, teacher_id, exclude_id)
            .await
    }

    async fn count_offerings_in_department_semester(
        &self,
        department_id: i64,
        semester_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<u64> {
        self.count_offerings_in_department_semester_impl(department_id, semester_id, exclude_id)
            .await
    }

    async fn teacher_offers_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool> {
        self.teacher_offers_subject_impl(teacher_id, subject_id)
            .await
    }

    async fn list_subject_offerings_with_pagination(
        &self,
        query: SubjectOfferingListQuery,
    ) -> Result<SubjectOfferingListResponse> {
        self.list_subject_offerings_with_pagination_impl(query)
            .await
    }

    async fn update_subject_offering(
        &self,
        id: i64,
        update: UpdateSubjectOfferingRequest,
    ) -> Result<Option<SubjectOffering>> {
        self.update_subject_offering_impl(id, update).await
    }

    async fn delete_subject_offering(&self, id: i64) -> Result<bool> {
        self.delete_subject_offering_impl(id).await
    }

    async fn list_offered_subjects(
        &self,
        semester_id: i64,
        department_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<OfferedSubject>> {
        self.list_offered_subjects_impl(semester_id, department_id, teacher_id)
            .await
    }

    // 成绩模块
    async fn create_mark(&self, mark: NewMark) -> Result<Mark> {
        self.create_mark_impl(mark).await
    }

    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>> {
        self.get_mark_by_id_impl(id).await
    }

    async fn find_mark(
        &self,
        student_id: i64,
        subject_id: i64,
        semester_id: i64,
    ) -> Result<Option<Mark>> {
        self.find_mark_impl(student_id, subject_id, semester_id)
            .await
    }

    async fn save_mark(&self, expected: &Mark, mark: Mark) -> Result<Mark> {
        self.save_mark_impl(expected, mark).await
    }

    async fn delete_mark(&self, id: i64) -> Result<bool> {
        self.delete_mark_impl(id).await
    }

    async fn list_marks_for_student(
        &self,
        student_id: i64,
        query: StudentMarksQuery,
    ) -> Result<Vec<Mark>> {
        self.list_marks_for_student_impl(student_id, query).await
    }

    async fn list_marks_for_subject(&self, subject_id: i64) -> Result<Vec<Mark>> {
        self.list_marks_for_subject_impl(subject_id).await
    }

    async fn list_department_results(&self, query: ResultsQuery) -> Result<Vec<Mark>> {
        self.list_department_results_impl(query).await
    }

    // 审计日志模块
    async fn create_audit_log(&self, log: CreateAuditLog) -> Result<AuditLog> {
        self.create_audit_log_impl(log).await
    }

    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse> {
        self.list_audit_logs_with_pagination_impl(query).await
    }

    // 统计模块
    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.dashboard_stats_impl().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("records.db").unwrap(),
            "sqlite://records.db?mode=rwc"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://u:p@localhost/records").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nowhere").is_err());
    }
}
