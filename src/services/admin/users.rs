use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, ErrorCode,
    profiles::{
        entities::NewProfile,
        requests::{LinkChildRequest, TeacherStatusRequest},
    },
    users::{
        entities::{NewUser, UserRole},
        requests::CreateUserRequest,
        responses::UserWithProfile,
    },
};
use crate::services::{storage_error_response, validation_response};
use crate::utils::password::hash_password;
use crate::utils::validate::{
    require_fields, validate_password_simple, validate_phone_number, validate_slug,
    validate_username,
};

use super::AdminService;

/// 按角色生成资料行
fn profile_for(req: &CreateUserRequest) -> Result<NewProfile, String> {
    let first_name = req.first_name.trim().to_string();
    let last_name = req.last_name.trim().to_string();
    match req.role {
        UserRole::Admin => Ok(NewProfile::Admin {
            first_name: if first_name.is_empty() {
                req.username.trim().to_string()
            } else {
                first_name
            },
            last_name,
            title: req.title.clone(),
            description: req.description.clone(),
        }),
        UserRole::Teacher => {
            let full_name = format!("{first_name} {last_name}").trim().to_string();
            let full_name_en = req
                .full_name_en
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(req.username.trim())
                .to_string();
            if req.full_name_en.is_some() {
                validate_slug(&full_name_en)?;
            }
            Ok(NewProfile::Teacher {
                full_name: if full_name.is_empty() {
                    req.username.trim().to_string()
                } else {
                    full_name
                },
                full_name_en,
            })
        }
        UserRole::Student => {
            require_fields(&[("first_name", &first_name), ("last_name", &last_name)])?;
            Ok(NewProfile::Student {
                first_name,
                last_name,
                grade_level: req.grade_level.unwrap_or_default(),
            })
        }
        UserRole::Parent => {
            require_fields(&[("first_name", &first_name), ("last_name", &last_name)])?;
            Ok(NewProfile::Parent {
                first_name,
                last_name,
            })
        }
    }
}

pub async fn handle_create_user(
    service: &AdminService,
    create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_username(create_request.username.trim()) {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }
    if let Err(msg) = validate_password_simple(&create_request.password) {
        return Ok(validation_response(ErrorCode::PasswordPolicyViolation, &msg));
    }
    if let Some(phone) = create_request.phone_number.as_deref()
        && let Err(msg) = validate_phone_number(phone.trim())
    {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }
    let profile = match profile_for(&create_request) {
        Ok(profile) => profile,
        Err(msg) => return Ok(validation_response(ErrorCode::ValidationFailed, &msg)),
    };

    let password_hash = match hash_password(&create_request.password) {
        Ok(hash) => hash,
        Err(e) => return Ok(storage_error_response(&e, "Creating user")),
    };

    let new_user = NewUser {
        username: create_request.username.trim().to_string(),
        password_hash,
        role: create_request.role,
        is_staff: create_request.is_staff,
        phone_number: create_request
            .phone_number
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    match storage.create_user_with_profile(new_user, profile).await {
        Ok((user, profile)) => {
            tracing::info!("Admin created {} {}", user.role, user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserWithProfile { user, profile },
                "User created",
            )))
        }
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::UsernameAlreadyExists, "Username already exists"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Creating user")),
    }
}

pub async fn handle_link_child(
    service: &AdminService,
    link: LinkChildRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.link_parent_child(link.parent_id, link.student_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Child linked"))),
        Err(e) => Ok(storage_error_response(&e, "Linking child")),
    }
}

pub async fn handle_set_teacher_status(
    service: &AdminService,
    teacher_id: i64,
    status: TeacherStatusRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.set_teacher_status(teacher_id, status.status).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty(
            "Teacher status updated",
        ))),
        Ok(false) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Updating teacher status")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(role: UserRole) -> CreateUserRequest {
        CreateUserRequest {
            username: "reza.t".into(),
            password: "long-enough-pw".into(),
            role,
            is_staff: false,
            phone_number: None,
            first_name: String::new(),
            last_name: String::new(),
            full_name_en: None,
            grade_level: None,
            title: None,
            description: None,
        }
    }

    #[test]
    fn test_teacher_defaults_to_username() {
        match profile_for(&request(UserRole::Teacher)) {
            Ok(NewProfile::Teacher {
                full_name,
                full_name_en,
            }) => {
                assert_eq!(full_name, "reza.t");
                assert_eq!(full_name_en, "reza.t");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_student_requires_names() {
        assert!(profile_for(&request(UserRole::Student)).is_err());
        let mut req = request(UserRole::Student);
        req.first_name = "Reza".into();
        req.last_name = "Tehrani".into();
        assert!(matches!(
            profile_for(&req),
            Ok(NewProfile::Student { .. })
        ));
    }

    #[test]
    fn test_explicit_full_name_en_must_be_slug() {
        let mut req = request(UserRole::Teacher);
        req.full_name_en = Some("has space".into());
        assert!(profile_for(&req).is_err());
        req.full_name_en = Some("reza-tehrani".into());
        assert!(profile_for(&req).is_ok());
    }
}
