use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    audit::entities::AuditPayload,
    auth::{requests::LoginRequest, responses::LoginResponse},
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Username or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 根据用户名或邮箱获取用户信息
    let user = match storage
        .get_user_by_username_or_email(login_request.username.trim())
        .await
    {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(reject_login(request, INVALID_CREDENTIALS, ErrorCode::AuthFailed)),
        Err(e) => {
            error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(reject_login(request, INVALID_CREDENTIALS, ErrorCode::AuthFailed));
    }

    // 3. 停用账号不能登录
    if !user.is_active {
        return Ok(reject_login(
            request,
            "This account has been deactivated",
            ErrorCode::UserInactive,
        ));
    }

    // 4. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 5. 签发访问令牌
    let access_token = match JwtUtils::generate_access_token(user.id, &user.role.to_string()) {
        Ok(token) => token,
        Err(e) => {
            error!("Failed to generate JWT token: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed, unable to generate token",
                )),
            );
        }
    };

    info!("User {} logged in successfully", user.username);
    request
        .extensions_mut()
        .insert(AuditPayload::action("LOGIN"));

    let cookie = JwtUtils::create_access_token_cookie(&access_token);
    let response = LoginResponse {
        access_token,
        token_type: "Bearer",
        expires_in: config.jwt.access_token_expiry * 60,
        user,
    };

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(ApiResponse::success(response, "Login successful")))
}

fn reject_login(request: &HttpRequest, message: &str, code: ErrorCode) -> HttpResponse {
    info!("Login rejected: {}", message);
    request.extensions_mut().insert(AuditPayload {
        action: Some("LOGIN".to_string()),
        error_message: Some(message.to_string()),
        ..Default::default()
    });
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(code, message))
}
