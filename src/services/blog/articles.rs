use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, ErrorCode, PageQuery,
    content::{
        entities::Article,
        requests::{CreateArticleRequest, UpdateArticleRequest},
        responses::ArticleDetailResponse,
    },
};
use crate::services::{
    current_teacher, current_user, storage_error_response, try_response, validation_response,
};
use crate::storage::Storage;
use crate::utils::validate::{require_fields, slugify, validate_slug};

use super::{ARTICLES_PER_PAGE, BlogService, COMMENTS_PER_PAGE, OTHER_ARTICLES_LIMIT};

pub async fn handle_list_articles(
    service: &BlogService,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_published_articles(query.page.as_deref(), query.search(), ARTICLES_PER_PAGE)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Articles"))),
        Err(e) => Ok(storage_error_response(&e, "Listing articles")),
    }
}

/// 每次读取详情浏览量加一
pub async fn handle_article_detail(
    service: &BlogService,
    slug: &str,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let article = match storage.view_published_article(slug).await {
        Ok(Some(article)) => article,
        Ok(None) => return Ok(not_found_response()),
        Err(e) => return Ok(storage_error_response(&e, "Loading article")),
    };

    let load = async {
        let comments = storage
            .list_public_blog_comments(article.id, query.page.as_deref(), COMMENTS_PER_PAGE)
            .await?;
        let other_articles = storage
            .list_other_articles(article.id, OTHER_ARTICLES_LIMIT)
            .await?;
        Ok::<_, SchoolError>((comments, other_articles))
    };

    match load.await {
        Ok((comments, other_articles)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ArticleDetailResponse {
                article,
                comments,
                other_articles,
            },
            "Article",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Loading article")),
    }
}

pub async fn handle_add_article_form(
    service: &BlogService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    try_response!(current_teacher(&storage, request).await);
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("New article")))
}

/// 新文章默认未发布，等待管理员审核
pub async fn handle_add_article(
    service: &BlogService,
    article: CreateArticleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));
    try_response!(current_teacher(&storage, request).await);

    if let Err(msg) = require_fields(&[
        ("title", &article.title),
        ("content", &article.content),
        ("subject", &article.subject),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    let slug = match article.slug.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(slug) => slug.to_string(),
        None => slugify(&article.title),
    };
    if let Err(msg) = validate_slug(&slug) {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }

    match storage.create_article(user.id, slug, article).await {
        Ok(created) => {
            tracing::info!("User {} submitted article {}", user.id, created.slug);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Article submitted, waiting for approval",
            )))
        }
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::SlugAlreadyExists, "Slug is already in use"),
        )),
        Err(e) => Ok(storage_error_response(&e, "Creating article")),
    }
}

/// 当前教师自己的文章，别人的文章与不存在的文章同样返回 404
async fn own_article(
    storage: &Arc<dyn Storage>,
    slug: &str,
    request: &HttpRequest,
) -> Result<Article, HttpResponse> {
    let user = current_user(request)?;
    current_teacher(storage, request).await?;
    match storage.get_article_for_author(slug, user.id).await {
        Ok(Some(article)) => Ok(article),
        Ok(None) => Err(not_found_response()),
        Err(e) => Err(storage_error_response(&e, "Loading article")),
    }
}

pub async fn handle_update_article_form(
    service: &BlogService,
    slug: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let article = try_response!(own_article(&storage, slug, request).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(article, "Article")))
}

pub async fn handle_update_article(
    service: &BlogService,
    slug: &str,
    update: UpdateArticleRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let article = try_response!(own_article(&storage, slug, request).await);

    let blank = [&update.title, &update.content, &update.subject]
        .into_iter()
        .flatten()
        .any(|value| value.trim().is_empty());
    if blank {
        return Ok(validation_response(
            ErrorCode::ValidationFailed,
            "Required fields cannot be empty",
        ));
    }

    match storage.update_article(article.id, update).await {
        Ok(updated) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Article updated",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Updating article")),
    }
}

pub async fn handle_delete_article(
    service: &BlogService,
    slug: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let article = try_response!(own_article(&storage, slug, request).await);

    match storage.delete_article(article.id).await {
        Ok(true) => {
            tracing::info!("Article {} deleted by its author", article.slug);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Article deleted")))
        }
        Ok(false) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Deleting article")),
    }
}
