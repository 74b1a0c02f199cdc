use super::entities::Department;
use crate::models::common::PaginatedResponse;

pub type DepartmentListResponse = PaginatedResponse<Department>;
