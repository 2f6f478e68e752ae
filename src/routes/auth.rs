use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{ChangePasswordRequest, LoginRequest, RegisterRequest};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn session_status(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.session_status(&req).await
}

pub async fn login(
    req: HttpRequest,
    login_data: web::Json<LoginRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(login_data.into_inner(), &req).await
}

pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

pub async fn register_options(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register_options(&req).await
}

pub async fn register(
    req: HttpRequest,
    register_data: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(register_data.into_inner(), &req).await
}

pub async fn change_password_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.change_password_form(&req).await
}

pub async fn change_password(
    req: HttpRequest,
    password_data: web::Json<ChangePasswordRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE
        .change_password(password_data.into_inner(), &req)
        .await
}

// 配置路由，挂载在 /account 作用域下
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .wrap(middlewares::RateLimit::register())
            .route(web::get().to(register_options))
            .route(web::post().to(register)),
    )
    .service(
        web::resource("/login")
            .wrap(middlewares::RateLimit::login())
            .route(web::get().to(session_status))
            .route(web::post().to(login)),
    )
    .service(
        web::resource("/logout")
            .route(web::get().to(logout))
            .route(web::post().to(logout)),
    )
    .service(
        web::resource("/change_password")
            .wrap(middlewares::RequireRole::authenticated())
            .route(web::get().to(change_password_form))
            .route(web::post().to(change_password)),
    );
}
