use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use serde::Deserialize;

use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, ErrorCode,
    content::requests::{
        CreateGalleryImageRequest, CreateNewsRequest, ModerateRequest, PublishRequest,
    },
};
use crate::services::{current_user, storage_error_response, try_response, validation_response};
use crate::utils::validate::require_fields;

use super::AdminService;

/// 可切换发布状态的内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishTarget {
    Article,
    News,
    Gallery,
}

/// 需要审核的评论种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentKind {
    Blog,
    Parent,
}

pub async fn handle_create_news(
    service: &AdminService,
    news: CreateNewsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));

    if let Err(msg) = require_fields(&[
        ("title", &news.title),
        ("content", &news.content),
        ("subject", &news.subject),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    match storage.create_news(user.id, news).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created, "News created"))),
        Err(e) => Ok(storage_error_response(&e, "Creating news")),
    }
}

pub async fn handle_create_gallery_image(
    service: &AdminService,
    image: CreateGalleryImageRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = require_fields(&[("title", &image.title), ("image_url", &image.image_url)]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    match storage.create_gallery_image(image).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(created, "Image added"))),
        Err(e) => Ok(storage_error_response(&e, "Adding image")),
    }
}

pub async fn handle_set_publish_status(
    service: &AdminService,
    target: PublishTarget,
    id: i64,
    publish: PublishRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let result = match target {
        PublishTarget::Article => storage.set_article_status(id, publish.status).await,
        PublishTarget::News => storage.set_news_status(id, publish.status).await,
        PublishTarget::Gallery => storage.set_gallery_status(id, publish.status).await,
    };

    match result {
        Ok(true) => {
            tracing::info!("{:?} {} status set to {}", target, id, publish.status);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Status updated")))
        }
        Ok(false) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Updating status")),
    }
}

pub async fn handle_moderate_comment(
    service: &AdminService,
    kind: CommentKind,
    id: i64,
    moderation: ModerateRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if moderation.approved.is_none() && moderation.visible.is_none() {
        return Ok(validation_response(
            ErrorCode::ValidationFailed,
            "Nothing to change",
        ));
    }

    let moderated = match kind {
        CommentKind::Blog => storage
            .moderate_blog_comment(id, moderation)
            .await
            .map(|comment| comment.map(|c| ApiResponse::success(c, "Comment moderated")))
            .map(|body| body.map(|b| HttpResponse::Ok().json(b))),
        CommentKind::Parent => storage
            .moderate_parent_comment(id, moderation)
            .await
            .map(|comment| comment.map(|c| ApiResponse::success(c, "Comment moderated")))
            .map(|body| body.map(|b| HttpResponse::Ok().json(b))),
    };

    match moderated {
        Ok(Some(response)) => Ok(response),
        Ok(None) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Moderating comment")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_segments_deserialize() {
        let target: PublishTarget = serde_json::from_str("\"gallery\"").unwrap();
        assert_eq!(target, PublishTarget::Gallery);
        let kind: CommentKind = serde_json::from_str("\"parent\"").unwrap();
        assert_eq!(kind, CommentKind::Parent);
        assert!(serde_json::from_str::<PublishTarget>("\"teacher\"").is_err());
    }
}
