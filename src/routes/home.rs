use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::PageQuery;
use crate::models::content::requests::{ContactRequest, TeacherContactRequest};
use crate::models::users::entities::UserRole;
use crate::services::HomeService;

static HOME_SERVICE: Lazy<HomeService> = Lazy::new(HomeService::new_lazy);

pub async fn home(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOME_SERVICE.home(&req).await
}

pub async fn contact_form() -> ActixResult<HttpResponse> {
    HOME_SERVICE.contact_form().await
}

pub async fn contact(
    req: HttpRequest,
    contact: web::Json<ContactRequest>,
) -> ActixResult<HttpResponse> {
    HOME_SERVICE.contact(contact.into_inner(), &req).await
}

pub async fn about(req: HttpRequest) -> ActixResult<HttpResponse> {
    HOME_SERVICE.about(&req).await
}

pub async fn list_news(req: HttpRequest, query: web::Query<PageQuery>) -> ActixResult<HttpResponse> {
    HOME_SERVICE.list_news(query.into_inner(), &req).await
}

pub async fn news_detail(req: HttpRequest, news_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    HOME_SERVICE.news_detail(news_id.into_inner(), &req).await
}

pub async fn gallery(req: HttpRequest, query: web::Query<PageQuery>) -> ActixResult<HttpResponse> {
    HOME_SERVICE.gallery(query.into_inner(), &req).await
}

pub async fn list_teachers(
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    HOME_SERVICE.list_teachers(query.into_inner(), &req).await
}

pub async fn teacher_detail(req: HttpRequest, name: web::Path<String>) -> ActixResult<HttpResponse> {
    HOME_SERVICE.teacher_detail(&name, &req).await
}

pub async fn teacher_contact_page(
    req: HttpRequest,
    name: web::Path<String>,
) -> ActixResult<HttpResponse> {
    HOME_SERVICE.teacher_contact_page(&name, &req).await
}

pub async fn contact_teacher(
    req: HttpRequest,
    name: web::Path<String>,
    message: web::Json<TeacherContactRequest>,
) -> ActixResult<HttpResponse> {
    HOME_SERVICE
        .contact_teacher(&name, message.into_inner(), &req)
        .await
}

// 联系我们也挂在 /account 下
pub fn configure_account_contact_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/contact")
            .route(web::get().to(contact_form))
            .route(web::post().to(contact)),
    );
}

// 配置公开页面路由，需放在其他作用域之后注册
pub fn configure_home_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("")
            .wrap(RequireJWT::lenient())
            .service(
                web::resource("/")
                    .route(web::get().to(home))
                    .route(web::post().to(contact)),
            )
            .route("/about", web::get().to(about))
            .route("/news", web::get().to(list_news))
            .route("/news/detail/{news_id}", web::get().to(news_detail))
            .route("/gallery", web::get().to(gallery))
            .route("/teachers", web::get().to(list_teachers))
            .route("/teacher/detail/{name}", web::get().to(teacher_detail))
            .service(
                web::resource("/teacher/contact/{name}")
                    .wrap(
                        RequireRole::new(&[UserRole::Student])
                            .challenge_anonymous()
                            .forbid_mismatch(),
                    )
                    .route(web::get().to(teacher_contact_page))
                    .route(web::post().to(contact_teacher)),
            ),
    );
}
