use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, ErrorCode, PageQuery,
    content::{
        requests::TeacherContactRequest,
        responses::{TeacherContactPage, TeacherDetailResponse},
    },
    profiles::entities::Teacher,
};
use crate::services::{current_student, storage_error_response, try_response, validation_response};
use crate::storage::Storage;
use crate::utils::validate::require_fields;

use super::{HomeService, TEACHERS_PER_PAGE};

async fn teacher_by_name(
    storage: &Arc<dyn Storage>,
    full_name_en: &str,
) -> Result<Teacher, HttpResponse> {
    match storage.get_teacher_by_full_name_en(full_name_en).await {
        Ok(Some(teacher)) => Ok(teacher),
        Ok(None) => Err(not_found_response()),
        Err(e) => Err(storage_error_response(&e, "Loading teacher")),
    }
}

pub async fn handle_list_teachers(
    service: &HomeService,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_teachers(query.page.as_deref(), TEACHERS_PER_PAGE)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Teachers"))),
        Err(e) => Ok(storage_error_response(&e, "Listing teachers")),
    }
}

pub async fn handle_teacher_detail(
    service: &HomeService,
    full_name_en: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(teacher_by_name(&storage, full_name_en).await);
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TeacherDetailResponse { teacher },
        "Teacher",
    )))
}

pub async fn handle_teacher_contact_page(
    service: &HomeService,
    full_name_en: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(teacher_by_name(&storage, full_name_en).await);
    let student = try_response!(current_student(&storage, request).await);

    match storage.list_all_teachers().await {
        Ok(teachers) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            TeacherContactPage {
                teacher,
                teachers,
                student_name: student.full_name(),
            },
            "Contact teacher",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Listing teachers")),
    }
}

pub async fn handle_contact_teacher(
    service: &HomeService,
    full_name_en: &str,
    message: TeacherContactRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let teacher = try_response!(teacher_by_name(&storage, full_name_en).await);
    let student = try_response!(current_student(&storage, request).await);

    if let Err(msg) = require_fields(&[
        ("subject", &message.subject),
        ("message", &message.message),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }

    match storage
        .create_teacher_contact(teacher.id, &student, message)
        .await
    {
        Ok(contact) => {
            tracing::info!("Student {} contacted teacher {}", student.id, teacher.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                contact,
                "Your message was sent",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Sending message")),
    }
}
