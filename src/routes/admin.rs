use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{RequireJWT, RequireRole};
use crate::models::PageQuery;
use crate::models::academics::requests::{CreateLessonRequest, SetRosterRequest};
use crate::models::content::requests::{
    CreateGalleryImageRequest, CreateNewsRequest, ModerateRequest, PublishRequest,
};
use crate::models::profiles::requests::{LinkChildRequest, TeacherStatusRequest};
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::AdminService;
use crate::services::admin::{CommentKind, PublishTarget};

static ADMIN_SERVICE: Lazy<AdminService> = Lazy::new(AdminService::new_lazy);

pub async fn create_user(
    req: HttpRequest,
    user_data: web::Json<CreateUserRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_user(user_data.into_inner(), &req).await
}

pub async fn link_child(
    req: HttpRequest,
    link: web::Json<LinkChildRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.link_child(link.into_inner(), &req).await
}

pub async fn set_teacher_status(
    req: HttpRequest,
    teacher_id: web::Path<i64>,
    status: web::Json<TeacherStatusRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .set_teacher_status(teacher_id.into_inner(), status.into_inner(), &req)
        .await
}

pub async fn create_lesson(
    req: HttpRequest,
    lesson: web::Json<CreateLessonRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_lesson(lesson.into_inner(), &req).await
}

pub async fn set_roster(
    req: HttpRequest,
    lesson_id: web::Path<i64>,
    roster: web::Json<SetRosterRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .set_roster(lesson_id.into_inner(), roster.into_inner(), &req)
        .await
}

pub async fn create_news(
    req: HttpRequest,
    news: web::Json<CreateNewsRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE.create_news(news.into_inner(), &req).await
}

pub async fn create_gallery_image(
    req: HttpRequest,
    image: web::Json<CreateGalleryImageRequest>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .create_gallery_image(image.into_inner(), &req)
        .await
}

pub async fn set_publish_status(
    req: HttpRequest,
    path: web::Path<(PublishTarget, i64)>,
    publish: web::Json<PublishRequest>,
) -> ActixResult<HttpResponse> {
    let (target, id) = path.into_inner();
    ADMIN_SERVICE
        .set_publish_status(target, id, publish.into_inner(), &req)
        .await
}

pub async fn moderate_comment(
    req: HttpRequest,
    path: web::Path<(CommentKind, i64)>,
    moderation: web::Json<ModerateRequest>,
) -> ActixResult<HttpResponse> {
    let (kind, id) = path.into_inner();
    ADMIN_SERVICE
        .moderate_comment(kind, id, moderation.into_inner(), &req)
        .await
}

pub async fn list_contact_messages(
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .list_contact_messages(query.into_inner(), &req)
        .await
}

pub async fn mark_contact_message_read(
    req: HttpRequest,
    message_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ADMIN_SERVICE
        .mark_contact_message_read(message_id.into_inner(), &req)
        .await
}

// 配置路由，非管理员一律 404
pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(RequireRole::new(&[UserRole::Admin]))
            .wrap(RequireJWT::lenient())
            .route("/users", web::post().to(create_user))
            .route("/children", web::post().to(link_child))
            .route("/teachers/{teacher_id}/status", web::post().to(set_teacher_status))
            .route("/lessons", web::post().to(create_lesson))
            .route("/lessons/{lesson_id}/roster", web::post().to(set_roster))
            .route("/news", web::post().to(create_news))
            .route("/gallery", web::post().to(create_gallery_image))
            .route("/publish/{target}/{id}", web::post().to(set_publish_status))
            .route("/comments/{kind}/{id}", web::post().to(moderate_comment))
            .route("/messages", web::get().to(list_contact_messages))
            .route(
                "/messages/{message_id}/read",
                web::post().to(mark_contact_message_read),
            ),
    );
}
