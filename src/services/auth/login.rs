use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::LoginRequest,
        responses::{LoginResponse, SessionStatus},
    },
    users::entities::User,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

use super::AuthService;

pub async fn handle_session_status(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = RequireJWT::extract_user(request);
    let status = SessionStatus {
        authenticated: user.is_some(),
        user,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(status, "Session status")))
}

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let user = match storage.get_user_by_username(login_request.username.trim()).await {
        Ok(Some(user)) => user,
        Ok(None) => return Ok(auth_failed()),
        Err(e) => {
            tracing::error!("Login lookup failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Login failed",
                )),
            );
        }
    };

    if !verify_password(&login_request.password, &user.password_hash) {
        return Ok(auth_failed());
    }

    if !user.is_active() {
        tracing::info!("Inactive user {} tried to log in", user.username);
        return Ok(auth_failed());
    }

    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for {}: {}", user.username, e);
    }

    tracing::info!("User {} logged in successfully", user.username);
    Ok(issue_session(
        HttpResponse::Ok(),
        user,
        login_request.remember_me,
        "Login successful",
    ))
}

/// 签发令牌并写入 Cookie
pub(crate) fn issue_session(
    mut builder: HttpResponseBuilder,
    user: User,
    remember_me: bool,
    message: &str,
) -> HttpResponse {
    match JwtUtils::generate_access_token(
        user.id,
        user.role.as_str(),
        user.token_version,
        remember_me,
    ) {
        Ok(access_token) => {
            let cookie = JwtUtils::create_access_token_cookie(&access_token, remember_me);
            let response = LoginResponse {
                access_token,
                expires_in: JwtUtils::token_lifetime(remember_me).num_seconds(),
                remember_me,
                user,
            };
            builder
                .cookie(cookie)
                .json(ApiResponse::success(response, message))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                "Login failed, unable to generate token",
            ))
        }
    }
}

fn auth_failed() -> HttpResponse {
    HttpResponse::Unauthorized().json(ApiResponse::error_empty(
        ErrorCode::AuthFailed,
        "Username or password is incorrect",
    ))
}
