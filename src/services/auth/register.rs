use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::RegisterRequest,
        responses::{RegisterOptions, SessionStatus},
    },
    profiles::entities::{GradeLevel, NewProfile},
    users::entities::{NewUser, UserRole},
};
use crate::services::{storage_error_response, validation_response};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    require_fields, validate_password_simple, validate_phone_number, validate_username,
};

use super::AuthService;
use super::login::issue_session;

/// 已登录的用户不能再注册，返回当前会话
fn already_signed_in(request: &HttpRequest) -> Option<HttpResponse> {
    let user = RequireJWT::extract_user(request)?;
    Some(HttpResponse::Conflict().json(ApiResponse::error(
        ErrorCode::AlreadyAuthenticated,
        SessionStatus {
            authenticated: true,
            user: Some(user),
        },
        "Already signed in",
    )))
}

pub async fn handle_register_options(request: &HttpRequest) -> ActixResult<HttpResponse> {
    if let Some(response) = already_signed_in(request) {
        return Ok(response);
    }

    let options = RegisterOptions {
        roles: UserRole::self_registrable().to_vec(),
        grade_levels: GradeLevel::all().to_vec(),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(options, "Registration options")))
}

/// 检查注册表单，通过时返回待写入的资料
fn check_register_request(req: &RegisterRequest) -> Result<NewProfile, HttpResponse> {
    require_fields(&[
        ("username", &req.username),
        ("password1", &req.password1),
        ("password2", &req.password2),
        ("phone_number", &req.phone_number),
        ("first_name", &req.first_name),
        ("last_name", &req.last_name),
    ])
    .map_err(|msg| validation_response(ErrorCode::ValidationFailed, &msg))?;

    validate_username(&req.username)
        .map_err(|msg| validation_response(ErrorCode::ValidationFailed, msg))?;
    validate_phone_number(&req.phone_number)
        .map_err(|msg| validation_response(ErrorCode::ValidationFailed, msg))?;

    if req.password1 != req.password2 {
        return Err(validation_response(
            ErrorCode::PasswordMismatch,
            "Passwords do not match",
        ));
    }
    validate_password_simple(&req.password1)
        .map_err(|msg| validation_response(ErrorCode::PasswordPolicyViolation, &msg))?;

    let first_name = req.first_name.trim().to_string();
    let last_name = req.last_name.trim().to_string();
    match req.role {
        UserRole::Student => Ok(NewProfile::Student {
            first_name,
            last_name,
            grade_level: req.grade_level.unwrap_or_default(),
        }),
        UserRole::Parent => Ok(NewProfile::Parent {
            first_name,
            last_name,
        }),
        UserRole::Admin | UserRole::Teacher => Err(validation_response(
            ErrorCode::ValidationFailed,
            "Only students and parents can register",
        )),
    }
}

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Some(response) = already_signed_in(request) {
        return Ok(response);
    }
    let storage = service.get_storage(request)?;

    let profile = match check_register_request(&register_request) {
        Ok(profile) => profile,
        Err(response) => return Ok(response),
    };

    let password_hash = match hash_password(&register_request.password1) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Registration failed",
                )),
            );
        }
    };

    let new_user = NewUser {
        username: register_request.username.trim().to_string(),
        password_hash,
        role: register_request.role,
        is_staff: false,
        phone_number: Some(register_request.phone_number.trim().to_string()),
    };

    match storage.create_user_with_profile(new_user, profile).await {
        Ok((user, _profile)) => {
            tracing::info!("Registered {} {}", user.role, user.username);
            // 注册后直接登录，并保持一周
            Ok(issue_session(
                HttpResponse::Created(),
                user,
                true,
                "Registration successful",
            ))
        }
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UsernameAlreadyExists, "Username already exists"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Registration")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: UserRole) -> RegisterRequest {
        RegisterRequest {
            username: "sara_k".into(),
            password1: "correct-horse".into(),
            password2: "correct-horse".into(),
            phone_number: "09121234567".into(),
            role,
            first_name: "Sara".into(),
            last_name: "Karimi".into(),
            grade_level: None,
        }
    }

    #[test]
    fn test_student_gets_default_grade_level() {
        match check_register_request(&request(UserRole::Student)) {
            Ok(NewProfile::Student { grade_level, .. }) => {
                assert_eq!(grade_level, GradeLevel::TenthComputer)
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_staff_roles_cannot_self_register() {
        assert!(check_register_request(&request(UserRole::Teacher)).is_err());
        assert!(check_register_request(&request(UserRole::Admin)).is_err());
    }

    #[test]
    fn test_password_mismatch_rejected() {
        let mut req = request(UserRole::Parent);
        req.password2 = "something-else".into();
        let response = check_register_request(&req).unwrap_err();
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
