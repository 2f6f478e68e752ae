use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::not_found_response;
use crate::models::{ApiResponse, PageQuery};
use crate::services::storage_error_response;

use super::AdminService;

const MESSAGES_PER_PAGE: u64 = 20;

pub async fn handle_list_contact_messages(
    service: &AdminService,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_contact_messages(query.page.as_deref(), MESSAGES_PER_PAGE)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Contact messages"))),
        Err(e) => Ok(storage_error_response(&e, "Listing contact messages")),
    }
}

pub async fn handle_mark_read(
    service: &AdminService,
    id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.mark_contact_message_read(id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_empty("Marked as read"))),
        Ok(false) => Ok(not_found_response()),
        Err(e) => Ok(storage_error_response(&e, "Marking message")),
    }
}
