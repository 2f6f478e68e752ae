use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode, academics::responses::TeacherPanelResponse,
    profiles::requests::UpdateTeacherRequest,
};
use crate::services::{
    current_teacher, current_user, storage_error_response, try_response, validation_response,
};
use crate::utils::validate::validate_slug;

use super::PanelService;

pub async fn handle_teacher_panel(
    service: &PanelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let user = try_response!(current_user(request));
    let teacher = try_response!(current_teacher(&storage, request).await);

    let load = async {
        let lessons = storage.list_lessons(Some(teacher.id)).await?;
        let contacts = storage.list_teacher_contacts(teacher.id).await?;
        let articles = storage.list_articles_by_author(user.id).await?;
        Ok::<_, SchoolError>((lessons, contacts, articles))
    };

    match load.await {
        Ok((lessons, contacts, articles)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherPanelResponse {
                teacher,
                lessons,
                contacts,
                articles,
            },
            "Teacher panel",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Loading teacher panel")),
    }
}

pub async fn handle_teacher_edit_form(
    service: &PanelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(teacher, "Teacher profile")))
}

pub async fn handle_teacher_edit(
    service: &PanelService,
    mut update: UpdateTeacherRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(current_teacher(&storage, request).await);

    if let Some(full_name) = update.full_name.as_deref()
        && full_name.trim().is_empty()
    {
        return Ok(validation_response(
            ErrorCode::ValidationFailed,
            "Full name cannot be empty",
        ));
    }

    // 英文名是公开 URL 键，修改时需符合 URL 片段格式
    if let Some(full_name_en) = update.full_name_en.take() {
        let full_name_en = full_name_en.trim().to_string();
        if full_name_en != teacher.full_name_en {
            if let Err(msg) = validate_slug(&full_name_en) {
                return Ok(validation_response(ErrorCode::ValidationFailed, msg));
            }
            update.full_name_en = Some(full_name_en);
        }
    }

    match storage.update_teacher(teacher.id, update).await {
        Ok(updated) => {
            tracing::info!("Teacher {} updated profile", updated.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Profile updated")))
        }
        Err(SchoolError::Conflict(_)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(
                ErrorCode::FullNameEnAlreadyExists,
                "English full name is already in use",
            ),
        )),
        Err(e) => Ok(storage_error_response(&e, "Updating teacher profile")),
    }
}
