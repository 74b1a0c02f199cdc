//! 服务层测试用的内存数据库与基础数据

use crate::models::{
    semesters::requests::CreateSemesterRequest,
    students::{entities::Student, requests::CreateStudentRequest},
    subject_offerings::requests::CreateSubjectOfferingRequest,
    subjects::{entities::Subject, requests::CreateSubjectRequest},
    teachers::{entities::Teacher, requests::CreateTeacherRequest},
    users::{
        entities::{Actor, UserRole},
        requests::CreateUserRequest,
    },
};
use crate::storage::{Storage, sea_orm_storage::SeaOrmStorage};

pub(crate) struct Fixture {
    pub storage: SeaOrmStorage,
    pub admin: Actor,
    pub department_id: i64,
    pub semester_id: i64,
    pub subject: Subject,
    pub student: Student,
    pub teacher: Teacher,
}

impl Fixture {
    pub fn student_actor(&self) -> Actor {
        Actor::new(self.student.user_id, UserRole::Student)
    }

    pub fn teacher_actor(&self) -> Actor {
        Actor::new(self.teacher.user_id, UserRole::Teacher)
    }

    /// 让夹具中的教师讲授夹具中的课程
    pub async fn assign_teacher(&self) {
        self.storage
            .create_subject_offering(CreateSubjectOfferingRequest {
                department_id: self.department_id,
                subject_id: self.subject.id,
                teacher_id: Some(self.teacher.id),
            })
            .await
            .unwrap();
    }

    pub async fn add_subject(&self, code: &str) -> Subject {
        self.storage
            .create_subject(CreateSubjectRequest {
                subject_title: format!("subject {code}"),
                subject_code: code.to_string(),
                credits: 3.0,
                semester_id: self.semester_id,
            })
            .await
            .unwrap()
    }

    pub async fn add_teacher(&self, username: &str) -> Teacher {
        insert_teacher(&self.storage, self.department_id, username).await
    }

    pub async fn add_student(&self, username: &str, registration: &str) -> Student {
        insert_student(
            &self.storage,
            self.department_id,
            self.semester_id,
            username,
            registration,
        )
        .await
    }
}

async fn insert_teacher(storage: &SeaOrmStorage, department_id: i64, username: &str) -> Teacher {
    storage
        .create_teacher(CreateTeacherRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: "hashed".to_string(),
            name: username.to_string(),
            department_id: Some(department_id),
            present_address: String::new(),
            permanent_address: String::new(),
            date_of_birth: None,
            mobile_number: String::new(),
            photo_url: String::new(),
        })
        .await
        .unwrap()
}

async fn insert_student(
    storage: &SeaOrmStorage,
    department_id: i64,
    semester_id: i64,
    username: &str,
    registration: &str,
) -> Student {
    storage
        .create_student(CreateStudentRequest {
            username: username.to_string(),
            email: format!("{username}@uni.edu"),
            password: "hashed".to_string(),
            name: username.to_string(),
            registration: registration.to_string(),
            session: "2020-21".to_string(),
            department_id,
            semester_id,
            present_address: String::new(),
            permanent_address: String::new(),
            date_of_birth: None,
            mobile_number: String::new(),
            photo_url: String::new(),
        })
        .await
        .unwrap()
}

/// 一个院系、一个学期、一门课程、一名学生、一名教师和一名管理员
pub(crate) async fn fixture() -> Fixture {
    let storage = SeaOrmStorage::new_in_memory().await.unwrap();

    let admin = storage
        .create_user(CreateUserRequest {
            username: "registrar".to_string(),
            email: "registrar@uni.edu".to_string(),
            password: "hashed".to_string(),
            role: UserRole::Admin,
        })
        .await
        .unwrap();

    let department = storage
        .create_department("computer science".to_string())
        .await
        .unwrap();
    let semester = storage
        .create_semester(CreateSemesterRequest {
            semester_name: "first".to_string(),
            semester_number: 1,
        })
        .await
        .unwrap();
    let subject = storage
        .create_subject(CreateSubjectRequest {
            subject_title: "data structures".to_string(),
            subject_code: "CSE-101".to_string(),
            credits: 3.0,
            semester_id: semester.id,
        })
        .await
        .unwrap();

    let student = insert_student(&storage, department.id, semester.id, "alice", "2020-0001").await;
    let teacher = insert_teacher(&storage, department.id, "bob").await;

    Fixture {
        storage,
        admin: admin.actor(),
        department_id: department.id,
        semester_id: semester.id,
        subject,
        student,
        teacher,
    }
}
