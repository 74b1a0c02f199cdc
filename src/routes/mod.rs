pub mod auth;

pub mod users;

pub mod departments;

pub mod semesters;

pub mod subjects;

pub mod students;

pub mod teachers;

pub mod subject_offerings;

pub mod marks;

pub mod dashboard;

pub mod system;

pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use departments::configure_department_routes;
pub use marks::configure_mark_routes;
pub use semesters::configure_semester_routes;
pub use students::configure_student_routes;
pub use subject_offerings::configure_subject_offering_routes;
pub use subjects::configure_subject_routes;
pub use system::configure_system_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;

use actix_web::web;

// 注册全部路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_department_routes(cfg);
    configure_semester_routes(cfg);
    configure_subject_routes(cfg);
    configure_student_routes(cfg);
    configure_teacher_routes(cfg);
    configure_subject_offering_routes(cfg);
    configure_mark_routes(cfg);
    configure_dashboard_routes(cfg);
    configure_system_routes(cfg);
}
