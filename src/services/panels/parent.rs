use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    academics::responses::{ChildReport, ParentPanelResponse},
    content::{requests::ParentCommentRequest, responses::ParentCommentsResponse},
};
use crate::services::{current_parent, storage_error_response, try_response, validation_response};
use crate::utils::validate::{require_fields, validate_phone_number};

use super::PanelService;

pub async fn handle_parent_panel(
    service: &PanelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let parent = try_response!(current_parent(&storage, request).await);

    let load = async {
        let mut children = Vec::new();
        for student in storage.list_children(parent.id).await? {
            let grades = storage.list_student_grades(student.id).await?;
            let attendance_counts = storage.student_attendance_counts(student.id).await?;
            children.push(ChildReport {
                student,
                grades,
                attendance_counts,
            });
        }
        Ok::<_, SchoolError>(children)
    };

    match load.await {
        Ok(children) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ParentPanelResponse { parent, children },
            "Parent panel",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Loading parent panel")),
    }
}

pub async fn handle_list_comments(
    service: &PanelService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    try_response!(current_parent(&storage, request).await);

    match storage.list_public_parent_comments().await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            ParentCommentsResponse { items },
            "Parent comments",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Listing parent comments")),
    }
}

pub async fn handle_submit_comment(
    service: &PanelService,
    comment: ParentCommentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let parent = try_response!(current_parent(&storage, request).await);

    if let Err(msg) = require_fields(&[
        ("full_name", &comment.full_name),
        ("student_name", &comment.student_name),
        ("phone_number", &comment.phone_number),
        ("comment", &comment.comment),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }
    if let Err(msg) = validate_phone_number(comment.phone_number.trim()) {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }

    // 新意见需审核后才会公开
    match storage.create_parent_comment(parent.id, comment).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(
            created,
            "Your comment was submitted",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Submitting parent comment")),
    }
}
