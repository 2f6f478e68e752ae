pub mod rate_limit;
pub mod require_jwt;
pub mod require_role;

use actix_web::{
    HttpResponse,
    http::{StatusCode, header::CONTENT_TYPE},
};

use crate::models::{ApiResponse, ErrorCode};

pub use rate_limit::RateLimit;
pub use require_jwt::RequireJWT;
pub use require_role::RequireRole;

// 辅助函数：创建错误响应
pub fn create_error_response(status: StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    match status {
        StatusCode::NO_CONTENT => HttpResponse::build(status).finish(),
        _ => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, "application/json; charset=utf-8"))
            .json(ApiResponse::<()>::error_empty(code, message)),
    }
}

/// 与不存在的资源完全一致的 404 响应
pub fn not_found_response() -> HttpResponse {
    create_error_response(StatusCode::NOT_FOUND, ErrorCode::NotFound, "Not found")
}
