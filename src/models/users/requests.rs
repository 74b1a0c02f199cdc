use super::entities::UserRole;
use serde::{Deserialize, Serialize};

// 用户创建请求
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
}

// 管理员创建请求（仅超级管理员可用）
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateAdminRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default = "default_admin_role")]
    pub role: UserRole,
}

fn default_admin_role() -> UserRole {
    UserRole::Admin
}

// 用户更新请求
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpdateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
    pub role: Option<UserRole>,
}

impl UpdateUserRequest {
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.email.is_none()
            && self.is_active.is_none()
            && self.role.is_none()
    }
}

// 用户列表查询参数
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}
