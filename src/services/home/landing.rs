use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::models::{
    ApiResponse, ErrorCode,
    content::{
        requests::ContactRequest,
        responses::{AboutResponse, HomeCounters, HomeResponse},
    },
};
use crate::services::{storage_error_response, validation_response};
use crate::utils::validate::{require_fields, validate_phone_number};

use super::{HOME_ARTICLES_LIMIT, HOME_GALLERY_LIMIT, HOME_NEWS_LIMIT, HomeService};

pub async fn handle_home(service: &HomeService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let load = async {
        let news = storage.latest_published_news(HOME_NEWS_LIMIT).await?;
        let articles = storage.latest_published_articles(HOME_ARTICLES_LIMIT).await?;
        let gallery = storage.latest_gallery_images(HOME_GALLERY_LIMIT).await?;
        let counters = HomeCounters {
            news: storage.count_published_news().await?,
            teachers: storage.count_teachers().await?,
            students: storage.count_students().await?,
        };
        Ok::<_, SchoolError>(HomeResponse {
            news,
            articles,
            gallery,
            counters,
        })
    };

    match load.await {
        Ok(home) => Ok(HttpResponse::Ok().json(ApiResponse::success(home, "Home"))),
        Err(e) => Ok(storage_error_response(&e, "Loading home page")),
    }
}

pub async fn handle_contact_form() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Contact us")))
}

pub async fn handle_contact(
    service: &HomeService,
    contact: ContactRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = require_fields(&[
        ("full_name", &contact.full_name),
        ("phone_number", &contact.phone_number),
        ("message", &contact.message),
    ]) {
        return Ok(validation_response(ErrorCode::ValidationFailed, &msg));
    }
    if let Err(msg) = validate_phone_number(contact.phone_number.trim()) {
        return Ok(validation_response(ErrorCode::ValidationFailed, msg));
    }

    match storage.create_contact_message(contact).await {
        Ok(message) => {
            tracing::info!("New contact message {}", message.id);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                message,
                "Your message was received",
            )))
        }
        Err(e) => Ok(storage_error_response(&e, "Saving contact message")),
    }
}

pub async fn handle_about(service: &HomeService, request: &HttpRequest) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.list_staff().await {
        Ok(management_team) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AboutResponse { management_team },
            "About us",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Loading management team")),
    }
}
