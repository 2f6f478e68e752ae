use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::errors::SchoolError;
use crate::middlewares::not_found_response;
use crate::models::{
    ApiResponse, PageQuery,
    content::responses::{NewsDetailResponse, NewsListResponse},
};
use crate::services::storage_error_response;

use super::{HomeService, NEWS_PER_PAGE, RECENT_NEWS_LIMIT};

/// 已发布新闻列表，另附最新的一条特别新闻
pub async fn handle_list_news(
    service: &HomeService,
    query: PageQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let load = async {
        let page = storage
            .list_published_news(query.page.as_deref(), query.search(), NEWS_PER_PAGE)
            .await?;
        let special = storage.latest_special_news(query.search()).await?;
        Ok::<_, SchoolError>((page, special))
    };

    match load.await {
        Ok((page, special)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NewsListResponse {
                items: page.items,
                pagination: page.pagination,
                special,
            },
            "News",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Listing news")),
    }
}

pub async fn handle_news_detail(
    service: &HomeService,
    news_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let news = match storage.view_published_news(news_id).await {
        Ok(Some(news)) => news,
        Ok(None) => return Ok(not_found_response()),
        Err(e) => return Ok(storage_error_response(&e, "Loading news")),
    };

    match storage.recent_news(news.id, RECENT_NEWS_LIMIT).await {
        Ok(recent_news) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            NewsDetailResponse { news, recent_news },
            "News",
        ))),
        Err(e) => Ok(storage_error_response(&e, "Loading news")),
    }
}
