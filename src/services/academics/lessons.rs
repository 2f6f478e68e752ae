use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, academics::responses::LessonListResponse, users::entities::UserRole,
};
use crate::services::{current_teacher, current_user, storage_error_response, try_response};

use super::AcademicService;

/// 管理员看到全部课程，教师只看到自己的
pub async fn handle_list_lessons(
    service: &AcademicService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));

    let teacher_filter = match user.role {
        UserRole::Admin => None,
        _ => Some(try_response!(current_teacher(&storage, request).await).id),
    };

    match storage.list_lessons(teacher_filter).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            LessonListResponse { items },
            "Lessons",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Listing lessons")),
    }
}
