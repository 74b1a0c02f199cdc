use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

/// 存储层接口
///
/// 所有可能违反约束的写操作都在独立事务中执行，失败时先回滚再返回错误，
/// 约束冲突以 [`crate::errors::RecordsError::Integrity`] 返回。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 健康检查
    async fn ping(&self) -> Result<()>;

    /// 用户管理方法
    // 创建用户（password 字段为哈希后的值）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 院系
    async fn create_department(&self, department_name: String) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn get_department_by_name(&self, department_name: &str) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse>;
    async fn update_department(
        &self,
        id: i64,
        department_name: String,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;

    /// 学期
    async fn create_semester(&self, semester: CreateSemesterRequest) -> Result<Semester>;
    async fn get_semester_by_id(&self, id: i64) -> Result<Option<Semester>>;
    // 查找名称或序号冲突的学期（排除 exclude_id）
    async fn find_conflicting_semester(
        &self,
        semester_name: Option<&str>,
        semester_number: Option<i32>,
        exclude_id: Option<i64>,
    ) -> Result<Option<Semester>>;
    async fn list_semesters(&self) -> Result<Vec<Semester>>;
    async fn update_semester(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
    ) -> Result<Option<Semester>>;
    async fn delete_semester(&self, id: i64) -> Result<bool>;

    /// 课程
    async fn create_subject(&self, subject: CreateSubjectRequest) -> Result<Subject>;
    async fn get_subject_by_id(&self, id: i64) -> Result<Option<Subject>>;
    async fn get_subject_by_code(&self, subject_code: &str) -> Result<Option<Subject>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<SubjectListResponse>;
    async fn update_subject(&self, id: i64, update: UpdateSubjectRequest)
    -> Result<Option<Subject>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 学生（账号与档案在同一事务中创建）
    async fn create_student(&self, student: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_user_id(&self, user_id: i64) -> Result<Option<Student>>;
    async fn get_student_by_registration(&self, registration: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse>;
    async fn update_student(&self, id: i64, update: UpdateStudentRequest)
    -> Result<Option<Student>>;
    // 删除学生及其账号
    async fn delete_student(&self, id: i64) -> Result<bool>;

    /// 教师（账号与档案在同一事务中创建）
    async fn create_teacher(&self, teacher: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_user_id(&self, user_id: i64) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse>;
    async fn update_teacher(&self, id: i64, update: UpdateTeacherRequest)
    -> Result<Option<Teacher>>;
    // 删除教师及其账号
    async fn delete_teacher(&self, id: i64) -> Result<bool>;

    /// 开课
    async fn create_subject_offering(
        &self,
        offering: CreateSubjectOfferingRequest,
    ) -> Result<SubjectOffering>;
    async fn get_subject_offering_by_id(&self, id: i64) -> Result<Option<SubjectOffering>>;
    // 查找相同 (院系, 课程, 教师) 的开课（teacher_id 为 None 时匹配未分配教师的记录）
    async fn find_subject_offering(
        &self,
        department_id: i64,
        subject_id: i64,
        teacher_id: Option<i64>,
        exclude_id: Option<i64>,
    ) -> Result<Option<SubjectOffering>>;
    // 同院系、同学期的开课数量
    async fn count_offerings_in_department_semester(
        &self,
        department_id: i64,
        semester_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<u64>;
    // 教师是否讲授该课程
    async fn teacher_offers_subject(&self, teacher_id: i64, subject_id: i64) -> Result<bool>;
    async fn list_subject_offerings_with_pagination(
        &self,
        query: SubjectOfferingListQuery,
    ) -> Result<SubjectOfferingListResponse>;
    async fn update_subject_offering(
        &self,
        id: i64,
        update: UpdateSubjectOfferingRequest,
    ) -> Result<Option<SubjectOffering>>;
    async fn delete_subject_offering(&self, id: i64) -> Result<bool>;
    async fn list_offered_subjects(
        &self,
        semester_id: i64,
        department_id: i64,
        teacher_id: Option<i64>,
    ) -> Result<Vec<OfferedSubject>>;

    /// 成绩
    async fn create_mark(&self, mark: NewMark) -> Result<Mark>;
    async fn get_mark_by_id(&self, id: i64) -> Result<Option<Mark>>;
    async fn find_mark(
        &self,
        student_id: i64,
        subject_id: i64,
        semester_id: i64,
    ) -> Result<Option<Mark>>;
    // 保存状态机计算后的成绩；`expected` 为计算所依据的读取结果，行已变化时返回冲突
    async fn save_mark(&self, expected: &Mark, mark: Mark) -> Result<Mark>;
    async fn delete_mark(&self, id: i64) -> Result<bool>;
    async fn list_marks_for_student(
        &self,
        student_id: i64,
        query: StudentMarksQuery,
    ) -> Result<Vec<Mark>>;
    async fn list_marks_for_subject(&self, subject_id: i64) -> Result<Vec<Mark>>;
    async fn list_department_results(&self, query: ResultsQuery) -> Result<Vec<Mark>>;

    /// 审计日志
    async fn create_audit_log(&self, log: CreateAuditLog) -> Result<AuditLog>;
    async fn list_audit_logs_with_pagination(
        &self,
        query: AuditLogListQuery,
    ) -> Result<AuditLogListResponse>;

    /// 统计
    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
