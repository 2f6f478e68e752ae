pub mod academics;

pub mod admin;

pub mod auth;

pub mod blog;

pub mod home;

pub mod panels;

use actix_web::web;

use crate::middlewares::RequireJWT;

pub use admin::configure_admin_routes;
pub use blog::configure_blog_routes;
pub use home::configure_home_routes;

/// `/account` 下的全部路由共用一个作用域
pub fn configure_account_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/account")
            .wrap(RequireJWT::lenient())
            .configure(auth::configure_auth_routes)
            .configure(panels::configure_panel_routes)
            .configure(academics::configure_academic_routes)
            .configure(home::configure_account_contact_routes),
    );
}

/// 按注册顺序挂载全部路由，公开页面作用域放在最后
pub fn configure_all(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_account_routes)
        .configure(configure_blog_routes)
        .configure(configure_admin_routes)
        .configure(configure_home_routes);
}
