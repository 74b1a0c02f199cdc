use serde::Serialize;

/// 管理后台统计
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_users: u64,
    pub total_admins: u64,
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_departments: u64,
    pub total_semesters: u64,
    pub total_subjects: u64,
    pub total_assigned_courses: u64,
    pub total_marks: u64,
}
