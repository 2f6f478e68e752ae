use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    academics::requests::{CreateLessonRequest, SetRosterRequest},
};
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::require_fields;

use super::AdminService;

pub async fn handle_create_lesson(
    service: &AdminService,
    lesson: CreateLessonRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = require_fields(&[
        ("name", &lesson.name),
        ("grade_level", &lesson.grade_level),
        ("year", &lesson.year),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    match storage.create_lesson(lesson).await {
        Ok(created) => {
            tracing::info!("Lesson {} created for teacher {}", created.id, created.teacher_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(created, "Lesson created")))
        }
        Err(e) => Ok(storage_error_response(&e, "Creating lesson")),
    }
}

/// 整体替换课程名单
pub async fn handle_set_roster(
    service: &AdminService,
    lesson_id: i64,
    roster: SetRosterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.set_lesson_roster(lesson_id, roster.student_ids).await {
        Ok(count) => Ok(HttpResponse::Ok().json(ApiResponse::success(count, "Roster updated"))),
        Err(e) => Ok(storage_error_response(&e, "Updating roster")),
    }
}
