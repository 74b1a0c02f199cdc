use crate::models::users::entities::User;
use serde::Serialize;

// 登录响应
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// 有效期（秒）
    pub expires_in: i64,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user: User,
}
