pub mod articles;
pub mod comments;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    PageQuery,
    content::requests::{CreateArticleRequest, CreateBlogCommentRequest, UpdateArticleRequest},
};
use crate::storage::Storage;

pub const ARTICLES_PER_PAGE: u64 = 6;
pub const COMMENTS_PER_PAGE: u64 = 4;
pub const OTHER_ARTICLES_LIMIT: u64 = 4;

pub struct BlogService {
    storage: Option<Arc<dyn Storage>>,
}

impl BlogService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn list_articles(
        &self,
        query: PageQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        articles::handle_list_articles(self, query, request).await
    }

    pub async fn article_detail(
        &self,
        slug: &str,
        query: PageQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        articles::handle_article_detail(self, slug, query, request).await
    }

    pub async fn post_comment(
        &self,
        slug: &str,
        comment: CreateBlogCommentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        comments::handle_post_comment(self, slug, comment, request).await
    }

    pub async fn add_article_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        articles::handle_add_article_form(self, request).await
    }

    pub async fn add_article(
        &self,
        article: CreateArticleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        articles::handle_add_article(self, article, request).await
    }

    pub async fn update_article_form(
        &self,
        slug: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        articles::handle_update_article_form(self, slug, request).await
    }

    pub async fn update_article(
        &self,
        slug: &str,
        update: UpdateArticleRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        articles::handle_update_article(self, slug, update, request).await
    }

    pub async fn delete_article(&self, slug: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        articles::handle_delete_article(self, slug, request).await
    }
}
