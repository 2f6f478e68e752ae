pub mod attendance;
pub mod grades;
pub mod lessons;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::config::AppConfig;
use crate::models::academics::{
    entities::Lesson,
    requests::{AttendanceSubmission, GradeBatchRequest, UpdateGradeRequest},
};
use crate::models::profiles::entities::Teacher;
use crate::storage::Storage;

use super::storage_error_response;

/// 课程、考勤与成绩
pub struct AcademicService {
    storage: Option<Arc<dyn Storage>>,
}

impl AcademicService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        super::resolve_storage(&self.storage, request)
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub async fn list_lessons(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        lessons::handle_list_lessons(self, request).await
    }

    pub async fn attendance_view(
        &self,
        lesson_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::handle_attendance_view(self, lesson_id, request).await
    }

    pub async fn record_attendance(
        &self,
        lesson_id: i64,
        submission: AttendanceSubmission,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        attendance::handle_record_attendance(self, lesson_id, submission, request).await
    }

    pub async fn record_grade_batch(
        &self,
        batch: GradeBatchRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_grade_batch(self, batch, request).await
    }

    pub async fn score_list(&self, lesson_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        grades::handle_score_list(self, lesson_id, request).await
    }

    pub async fn grade_detail(
        &self,
        lesson_id: i64,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_grade_detail(self, lesson_id, grade_id, request).await
    }

    pub async fn update_grade(
        &self,
        lesson_id: i64,
        grade_id: i64,
        update: UpdateGradeRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_update_grade(self, lesson_id, grade_id, update, request).await
    }

    pub async fn delete_grade(
        &self,
        lesson_id: i64,
        grade_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        grades::handle_delete_grade(self, lesson_id, grade_id, request).await
    }
}

/// 教师自己的课程；别人的课程与不存在的课程同样返回 404
pub(crate) async fn owned_lesson(
    storage: &Arc<dyn Storage>,
    teacher: &Teacher,
    lesson_id: i64,
) -> Result<Lesson, HttpResponse> {
    match storage.get_lesson_by_id(lesson_id).await {
        Ok(Some(lesson)) if lesson.teacher_id == teacher.id => Ok(lesson),
        Ok(_) => Err(crate::middlewares::not_found_response()),
        Err(e) => Err(storage_error_response(&e, "Loading lesson")),
    }
}
