pub mod academics;
pub mod admin;
pub mod auth;
pub mod blog;
pub mod home;
pub mod panels;

pub use academics::AcademicService;
pub use admin::AdminService;
pub use auth::AuthService;
pub use blog::BlogService;
pub use home::HomeService;
pub use panels::PanelService;

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::StatusCode};

use crate::cache::ObjectCache;
use crate::errors::SchoolError;
use crate::middlewares::{RequireJWT, create_error_response, not_found_response};
use crate::models::{
    ErrorCode,
    profiles::entities::{Parent, Student, Teacher},
    users::entities::User,
};
use crate::storage::Storage;

/// 取服务自带的存储，否则从 app data 中读取
pub(crate) fn resolve_storage(
    own: &Option<Arc<dyn Storage>>,
    request: &HttpRequest,
) -> ActixResult<Arc<dyn Storage>> {
    if let Some(storage) = own {
        return Ok(storage.clone());
    }
    request
        .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

pub(crate) fn resolve_cache(request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
    request
        .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
}

/// 存储层错误到响应信封的映射
pub(crate) fn storage_error_response(err: &SchoolError, action: &str) -> HttpResponse {
    match err {
        SchoolError::NotFound(_) => not_found_response(),
        SchoolError::Conflict(msg) => {
            create_error_response(StatusCode::CONFLICT, ErrorCode::Conflict, msg)
        }
        SchoolError::Validation(msg) => {
            create_error_response(StatusCode::BAD_REQUEST, ErrorCode::ValidationFailed, msg)
        }
        SchoolError::AttendanceSave(msg) => {
            tracing::error!("{} failed: {}", action, msg);
            create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::AttendanceSaveFailed,
                &format!("{action} failed"),
            )
        }
        _ => {
            tracing::error!("{} failed: {}", action, err);
            create_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::InternalServerError,
                &format!("{action} failed"),
            )
        }
    }
}

pub(crate) fn validation_response(code: ErrorCode, message: &str) -> HttpResponse {
    create_error_response(StatusCode::BAD_REQUEST, code, message)
}

/// 当前用户；到达这里的请求都已通过角色中间件
pub(crate) fn current_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireJWT::extract_user(request).ok_or_else(not_found_response)
}

/// 当前教师的资料行，缺失时与资源不存在相同
pub(crate) async fn current_teacher(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Teacher, HttpResponse> {
    let user = current_user(request)?;
    match storage.get_teacher_by_user_id(user.id).await {
        Ok(Some(teacher)) => Ok(teacher),
        Ok(None) => {
            tracing::info!("No teacher profile for user {}", user.id);
            Err(not_found_response())
        }
        Err(e) => Err(storage_error_response(&e, "Loading teacher profile")),
    }
}

pub(crate) async fn current_student(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Student, HttpResponse> {
    let user = current_user(request)?;
    match storage.get_student_by_user_id(user.id).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => {
            tracing::info!("No student profile for user {}", user.id);
            Err(not_found_response())
        }
        Err(e) => Err(storage_error_response(&e, "Loading student profile")),
    }
}

pub(crate) async fn current_parent(
    storage: &Arc<dyn Storage>,
    request: &HttpRequest,
) -> Result<Parent, HttpResponse> {
    let user = current_user(request)?;
    match storage.get_parent_by_user_id(user.id).await {
        Ok(Some(parent)) => Ok(parent),
        Ok(None) => {
            tracing::info!("No parent profile for user {}", user.id);
            Err(not_found_response())
        }
        Err(e) => Err(storage_error_response(&e, "Loading parent profile")),
    }
}

/// 展开 `Result<T, HttpResponse>`，出错时直接返回该响应
macro_rules! try_response {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(response) => return Ok(response),
        }
    };
}
pub(crate) use try_response;
