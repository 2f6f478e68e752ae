use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, PageQuery};
use crate::services::storage_error_response;

use super::{GALLERY_PER_PAGE, HomeService};

pub async fn handle_gallery(
    service: &HomeService,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_published_gallery(query.page.as_deref(), GALLERY_PER_PAGE)
        .await
    {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(page, "Gallery"))),
        Err(e) => Ok(storage_error_response(&e, "Listing gallery")),
    }
}
