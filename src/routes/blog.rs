use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::PageQuery;
use crate::models::content::requests::{
    CreateArticleRequest, CreateBlogCommentRequest, UpdateArticleRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BlogService;

static BLOG_SERVICE: Lazy<BlogService> = Lazy::new(BlogService::new_lazy);

pub async fn list_articles(
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.list_articles(query.into_inner(), &req).await
}

pub async fn article_detail(
    req: HttpRequest,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE
        .article_detail(&slug, query.into_inner(), &req)
        .await
}

pub async fn post_comment(
    req: HttpRequest,
    slug: web::Path<String>,
    comment: web::Json<CreateBlogCommentRequest>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE
        .post_comment(&slug, comment.into_inner(), &req)
        .await
}

pub async fn add_article_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.add_article_form(&req).await
}

pub async fn add_article(
    req: HttpRequest,
    article: web::Json<CreateArticleRequest>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.add_article(article.into_inner(), &req).await
}

pub async fn update_article_form(
    req: HttpRequest,
    slug: web::Path<String>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.update_article_form(&slug, &req).await
}

pub async fn update_article(
    req: HttpRequest,
    slug: web::Path<String>,
    update: web::Json<UpdateArticleRequest>,
) -> ActixResult<HttpResponse> {
    BLOG_SERVICE
        .update_article(&slug, update.into_inner(), &req)
        .await
}

pub async fn delete_article(req: HttpRequest, slug: web::Path<String>) -> ActixResult<HttpResponse> {
    BLOG_SERVICE.delete_article(&slug, &req).await
}

// 配置路由
pub fn configure_blog_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/blog")
            .wrap(RequireJWT::lenient())
            .service(web::resource("").route(web::get().to(list_articles)))
            .service(
                web::resource("/detail/{slug}")
                    .route(web::get().to(article_detail))
                    .route(
                        web::post()
                            .to(post_comment)
                            // 仅登录用户可评论
                            .wrap(RequireRole::authenticated()),
                    ),
            )
            .service(
                web::resource("/add")
                    .wrap(RequireRole::new(&[UserRole::Teacher]))
                    .route(web::get().to(add_article_form))
                    .route(web::post().to(add_article)),
            )
            .service(
                web::resource("/update/{slug}")
                    .wrap(RequireRole::new(&[UserRole::Teacher]))
                    .route(web::get().to(update_article_form))
                    .route(web::post().to(update_article)),
            )
            .service(
                web::resource("/delete/{slug}")
                    .wrap(RequireRole::new(&[UserRole::Teacher]))
                    .route(web::get().to(delete_article)),
            ),
    );
}
