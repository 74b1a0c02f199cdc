use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode};
use crate::services::error_response;

super::declare_service!(DashboardService);

impl DashboardService {
    // 管理后台统计
    pub async fn stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let storage = self.get_storage(request);

        match storage.dashboard_stats().await {
            Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
                stats,
                "Dashboard statistics retrieved successfully",
            ))),
            Err(e) => Ok(error_response(
                request,
                "DASHBOARD STATS",
                e,
                ErrorCode::NotFound,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::services::test_support::fixture;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_stats_count_fixture_records() {
        let f = fixture().await;
        f.assign_teacher().await;

        let stats = f.storage.dashboard_stats().await.unwrap();
        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_admins, 1);
        assert_eq!(stats.total_teachers, 1);
        assert_eq!(stats.total_students, 1);
        assert_eq!(stats.total_departments, 1);
        assert_eq!(stats.total_semesters, 1);
        assert_eq!(stats.total_subjects, 1);
        assert_eq!(stats.total_assigned_courses, 1);
        assert_eq!(stats.total_marks, 0);
    }
}
