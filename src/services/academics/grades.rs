use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, ErrorCode,
    academics::{
        requests::{GradeBatchRequest, UpdateGradeRequest},
        responses::{GradeBatchSummary, ScoreListResponse},
    },
    users::entities::UserRole,
};
use crate::services::{
    current_teacher, current_user, storage_error_response, try_response, validation_response,
};

use super::{AcademicService, owned_lesson};

/// 教师面板的批量录入；单条失败只计数，不影响其余条目
pub async fn handle_grade_batch(
    service: &AcademicService,
    batch: GradeBatchRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);

    let entries = batch.entries();
    if entries.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            GradeBatchSummary::default(),
            "No grades submitted",
        )));
    }

    let summary = match storage.record_grade_batch(teacher.id, entries).await {
        Ok(summary) => summary,
        Err(e) => return Ok(storage_error_response(&e, "Recording grades")),
    };
    tracing::info!(
        "Teacher {} recorded grades: {} succeeded, {} failed",
        teacher.id,
        summary.succeeded,
        summary.failed
    );

    if summary.succeeded > 0 {
        let message = format!(
            "{} grades recorded, {} failed",
            summary.succeeded, summary.failed
        );
        Ok(HttpResponse::Ok().json(ApiResponse::success(summary, message)))
    } else {
        Ok(HttpResponse::BadRequest().json(ApiResponse::error(
            ErrorCode::GradeBatchFailed,
            summary,
            "Recording grades failed, please try again",
        )))
    }
}

/// 管理员可查看任意课程，教师只能查看自己的课程
pub async fn handle_score_list(
    service: &AcademicService,
    lesson_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));

    let lesson = if user.role == UserRole::Admin {
        match storage.get_lesson_by_id(lesson_id).await {
            Ok(Some(lesson)) => lesson,
            Ok(None) => return Ok(not_found_response()),
            Err(e) => return Ok(storage_error_response(&e, "Loading lesson")),
        }
    } else {
        let teacher = try_response!(current_teacher(&storage, request).await);
        try_response!(owned_lesson(&storage, &teacher, lesson_id).await)
    };

    match storage.list_lesson_grades(lesson.id).await {
        Ok(grades) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ScoreListResponse { lesson, grades },
            "Grades",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Listing grades")),
    }
}

pub async fn handle_grade_detail(
    service: &AcademicService,
    lesson_id: i64,
    grade_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    let lesson = try_response!(owned_lesson(&storage, &teacher, lesson_id).await);

    match storage.get_grade(lesson.id, grade_id).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(grade, "Grade"))),
        Ok(None) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Loading grade")),
    }
}

pub async fn handle_update_grade(
    service: &AcademicService,
    lesson_id: i64,
    grade_id: i64,
    update: UpdateGradeRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    let lesson = try_response!(owned_lesson(&storage, &teacher, lesson_id).await);

    if let Err(msg) = update.validate() {
        return Ok(validation_response(ErrorCode::GradeOutOfRange, msg));
    }

    match storage.update_grade(lesson.id, grade_id, update).await {
        Ok(Some(grade)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            grade,
            "Grade updated",
        ))),
        Ok(None) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Updating grade")),
    }
}

pub async fn handle_delete_grade(
    service: &AcademicService,
    lesson_id: i64,
    grade_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    let lesson = try_response!(owned_lesson(&storage, &teacher, lesson_id).await);

    match storage.delete_grade(lesson.id, grade_id).await {
        Ok(true) => {
            tracing::info!("Teacher {} deleted grade {}", teacher.id, grade_id);
            Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Grade deleted")))
        }
        Ok(false) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Deleting grade")),
    }
}
