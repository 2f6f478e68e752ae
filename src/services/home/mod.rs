pub mod gallery;
pub mod landing;
pub mod news;
pub mod teachers;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    PageQuery,
    content::requests::{ContactRequest, TeacherContactRequest},
};
use crate::storage::Storage;

pub const HOME_NEWS_LIMIT: u64 = 3;
pub const HOME_ARTICLES_LIMIT: u64 = 3;
pub const HOME_GALLERY_LIMIT: u64 = 8;
pub const NEWS_PER_PAGE: u64 = 6;
pub const RECENT_NEWS_LIMIT: u64 = 4;
pub const GALLERY_PER_PAGE: u64 = 9;
pub const TEACHERS_PER_PAGE: u64 = 6;

/// 公开页面：首页、新闻、相册、教师与“关于我们”
pub struct HomeService {
    storage: Option<Arc<dyn Storage>>,
}

impl HomeService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn home(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        landing::handle_home(self, request).await
    }

    pub async fn contact_form(&self) -> ActixResult<HttpResponse> {
        landing::handle_contact_form().await
    }

    pub async fn contact(
        &self,
        contact: ContactRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        landing::handle_contact(self, contact, request).await
    }

    pub async fn about(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        landing::handle_about(self, request).await
    }

    pub async fn list_news(
        &self,
        query: PageQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        news::handle_list_news(self, query, request).await
    }

    pub async fn news_detail(&self, news_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        news::handle_news_detail(self, news_id, request).await
    }

    pub async fn gallery(&self, query: PageQuery, request: &HttpRequest) -> ActixResult<HttpResponse> {
        gallery::handle_gallery(self, query, request).await
    }

    pub async fn list_teachers(
        &self,
        query: PageQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_list_teachers(self, query, request).await
    }

    pub async fn teacher_detail(
        &self,
        full_name_en: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_teacher_detail(self, full_name_en, request).await
    }

    pub async fn teacher_contact_page(
        &self,
        full_name_en: &str,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_teacher_contact_page(self, full_name_en, request).await
    }

    pub async fn contact_teacher(
        &self,
        full_name_en: &str,
        message: TeacherContactRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teachers::handle_contact_teacher(self, full_name_en, message, request).await
    }
}
