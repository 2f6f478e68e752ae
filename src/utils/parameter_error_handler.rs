//! 提取器错误处理
//!
//! 将 actix-web 的参数解析错误转换为统一响应信封。

use actix_web::error::{InternalError, JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{Error, HttpRequest, HttpResponse};

use crate::models::{ApiResponse, ErrorCode};

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("查询参数解析失败 {}: {}", req.path(), err);
    let message = format!("Invalid query parameters: {err}");
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message));
    InternalError::from_response(err, response).into()
}

pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> Error {
    tracing::debug!("请求体解析失败 {}: {}", req.path(), err);
    let message = format!("Invalid request body: {err}");
    let response = HttpResponse::BadRequest()
        .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, message));
    InternalError::from_response(err, response).into()
}

/// 路径参数无法解析时视为资源不存在
pub fn path_error_handler(err: PathError, req: &HttpRequest) -> Error {
    tracing::debug!("路径参数解析失败 {}: {}", req.path(), err);
    let response = HttpResponse::NotFound()
        .json(ApiResponse::error_empty(ErrorCode::NotFound, "Not found"));
    InternalError::from_response(err, response).into()
}
