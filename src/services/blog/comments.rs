use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::not_found_response;
use crate::models::{ApiResponse, ErrorCode, content::requests::CreateBlogCommentRequest};
use crate::services::{current_user, storage_error_response, try_response, validation_response};
use crate::utils::validate::{require_fields, validate_phone_number};

use super::BlogService;

/// 已登录用户评论已发布的文章；评论审核通过并设为可见后才公开
pub async fn handle_post_comment(
    service: &BlogService,
    slug: &str,
    comment: CreateBlogCommentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));

    let article = match storage.get_published_article_by_slug(slug).await {
        Ok(Some(article)) => article,
        Ok(None) => return Ok(not_found_response()),
        Err(e) => return Ok(storage_error_response(&e, "Loading article")),
    };

    if let Err(msg) = require_fields(&[
        ("name", &comment.name),
        ("phone_number", &comment.phone_number),
        ("comment", &comment.comment),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }
    if let Err(msg) = validate_phone_number(comment.phone_number.trim()) {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }

    match storage.create_blog_comment(article.id, user.id, comment).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(
            created,
            "Your comment was submitted",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Posting comment")),
    }
}
