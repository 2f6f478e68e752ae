use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::require_jwt::token_version_cache_key;
use crate::models::{ApiResponse, ErrorCode, auth::requests::ChangePasswordRequest};
use crate::services::{
    current_user, resolve_cache, storage_error_response, try_response, validation_response,
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validate::{require_fields, validate_password_simple};

use super::AuthService;
use super::logout::revoke_token;

pub async fn handle_change_password_form(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let user = try_response!(current_user(request));
    Ok(HttpResponse::Ok().json(ApiResponse::success(user, "Change password")))
}

pub async fn handle_change_password(
    service: &AuthService,
    change_request: ChangePasswordRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));

    if let Err(msg) = require_fields(&[
        ("old_password", &change_request.old_password),
        ("new_password1", &change_request.new_password1),
        ("new_password2", &change_request.new_password2),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    // 缓存中的用户不带密码哈希，需重新读取
    let stored = match storage.get_user_by_id(user.id).await {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "User not found",
            )));
        }
        Err(e) => return Ok(storage_error_response(&e, "Changing password")),
    };

    if !verify_password(&change_request.old_password, &stored.password_hash) {
        return Ok(validation_response(
            ErrorCode::OldPasswordIncorrect,
            "Old password is incorrect",
        ));
    }
    if change_request.new_password1 != change_request.new_password2 {
        return Ok(validation_response(
            ErrorCode::PasswordMismatch,
            "New passwords do not match",
        ));
    }
    if change_request.new_password1 == change_request.old_password {
        return Ok(validation_response(
            ErrorCode::PasswordUnchanged,
            "New password equals the old password",
        ));
    }
    if let Err(msg) = validate_password_simple(&change_request.new_password1) {
        return Ok(validation_response(ErrorCode::PasswordPolicyViolation, &msg));
    }

    let password_hash = match hash_password(&change_request.new_password1) {
        Ok(hash) => hash,
        Err(e) => return Ok(storage_error_response(&e, "Changing password")),
    };

    match storage.update_password(user.id, &password_hash).await {
        Ok(true) => {
            // 修改后所有设备都需重新登录
            if let Some(token) = JwtUtils::extract_token(request) {
                revoke_token(request, &token).await;
            }
            if let Some(cache) = resolve_cache(request) {
                let ttl = JwtUtils::token_lifetime(true).num_seconds().max(1) as u64;
                cache
                    .insert_raw(
                        token_version_cache_key(user.id),
                        (stored.token_version + 1).to_string(),
                        ttl,
                    )
                    .await;
            }
            tracing::info!("User {} changed password", user.username);
            Ok(HttpResponse::Ok()
                .cookie(JwtUtils::create_empty_access_token_cookie())
                .json(ApiResponse::<()>::success_empty(
                    "Password changed, please log in again",
                )))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Changing password")),
    }
}
