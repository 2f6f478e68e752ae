pub mod parent;
pub mod student;
pub mod teacher;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    content::requests::ParentCommentRequest, profiles::requests::UpdateTeacherRequest,
};
use crate::storage::Storage;

/// 按角色划分的个人面板
pub struct PanelService {
    storage: Option<Arc<dyn Storage>>,
}

impl PanelService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub async fn teacher_panel(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::handle_teacher_panel(self, request).await
    }

    pub async fn teacher_edit_form(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        teacher::handle_teacher_edit_form(self, request).await
    }

    pub async fn teacher_edit(
        &self,
        update: UpdateTeacherRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        teacher::handle_teacher_edit(self, update, request).await
    }

    pub async fn student_panel(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        student::handle_student_panel(self, request).await
    }

    pub async fn parent_panel(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::handle_parent_panel(self, request).await
    }

    pub async fn parent_comments(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        parent::handle_list_comments(self, request).await
    }

    pub async fn submit_parent_comment(
        &self,
        comment: ParentCommentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        parent::handle_submit_comment(self, comment, request).await
    }
}
