pub mod content;
pub mod lessons;
pub mod messages;
pub mod users;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    PageQuery,
    academics::requests::{CreateLessonRequest, SetRosterRequest},
    content::requests::{
        CreateGalleryImageRequest, CreateNewsRequest, ModerateRequest, PublishRequest,
    },
    profiles::requests::{LinkChildRequest, TeacherStatusRequest},
    users::requests::CreateUserRequest,
};
use crate::storage::Storage;

pub use content::{CommentKind, PublishTarget};

/// 管理端接口，仅管理员可见
pub struct AdminService {
    storage: Option<Arc<dyn Storage>>,
}

impl AdminService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn create_user(
        &self,
        create_request: CreateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        users::handle_create_user(self, create_request, request).await
    }

    pub async fn link_child(
        &self,
        link: LinkChildRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        users::handle_link_child(self, link, request).await
    }

    pub async fn set_teacher_status(
        &self,
        teacher_id: i64,
        status: TeacherStatusRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        users::handle_set_teacher_status(self, teacher_id, status, request).await
    }

    pub async fn create_lesson(
        &self,
        lesson: CreateLessonRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lessons::handle_create_lesson(self, lesson, request).await
    }

    pub async fn set_roster(
        &self,
        lesson_id: i64,
        roster: SetRosterRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        lessons::handle_set_roster(self, lesson_id, roster, request).await
    }

    pub async fn create_news(
        &self,
        news: CreateNewsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        content::handle_create_news(self, news, request).await
    }

    pub async fn create_gallery_image(
        &self,
        image: CreateGalleryImageRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        content::handle_create_gallery_image(self, image, request).await
    }

    pub async fn set_publish_status(
        &self,
        target: PublishTarget,
        id: i64,
        publish: PublishRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        content::handle_set_publish_status(self, target, id, publish, request).await
    }

    pub async fn moderate_comment(
        &self,
        kind: CommentKind,
        id: i64,
        moderation: ModerateRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        content::handle_moderate_comment(self, kind, id, moderation, request).await
    }

    pub async fn list_contact_messages(
        &self,
        query: PageQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        messages::handle_list_contact_messages(self, query, request).await
    }

    pub async fn mark_contact_message_read(
        &self,
        id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        messages::handle_mark_read(self, id, request).await
    }
}
