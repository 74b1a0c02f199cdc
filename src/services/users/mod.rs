pub mod create;
pub mod query;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::errors::{RecordsError, Result};
use crate::models::users::requests::{CreateAdminRequest, UpdateUserRequest, UserListQuery};
use crate::storage::Storage;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password, validate_username};

super::declare_service!(UserService);

impl UserService {
    // 获取用户列表
    pub async fn list_users(
        &self,
        query: UserListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        query::list_users(self, query, request).await
    }

    // 创建管理员
    pub async fn create_admin(
        &self,
        admin_data: CreateAdminRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_admin(self, admin_data, request).await
    }

    // 根据ID获取用户
    pub async fn get_user(&self, user_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        query::get_user(self, user_id, request).await
    }

    // 更新用户信息
    pub async fn update_user(
        &self,
        user_id: i64,
        update_data: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_user(self, user_id, update_data, request).await
    }
}

/// 新账号的公共校验：用户名、邮箱、密码策略与重复检查，返回密码哈希
pub(crate) async fn prepare_account(
    storage: &dyn Storage,
    username: &str,
    email: &str,
    password: &str,
) -> Result<String> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;

    if storage.get_user_by_username_or_email(username).await?.is_some()
        || storage.get_user_by_username_or_email(email).await?.is_some()
    {
        return Err(RecordsError::conflict("Username or email already exists"));
    }

    hash_password(password)
}

/// 账号信息变化后清空已缓存的登录用户
pub(crate) async fn invalidate_user_cache(request: &HttpRequest) {
    if let Some(cache) = request.app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>() {
        cache.invalidate_all().await;
    }
}
