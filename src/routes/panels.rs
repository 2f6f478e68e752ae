use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireRole;
use crate::models::academics::requests::GradeBatchRequest;
use crate::models::content::requests::ParentCommentRequest;
use crate::models::profiles::requests::UpdateTeacherRequest;
use crate::models::users::entities::UserRole;
use crate::services::{AcademicService, PanelService};

static PANEL_SERVICE: Lazy<PanelService> = Lazy::new(PanelService::new_lazy);
static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

pub async fn teacher_panel(req: HttpRequest) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.teacher_panel(&req).await
}

// 教师面板提交即批量录入成绩
pub async fn submit_grades(
    req: HttpRequest,
    batch: web::Json<GradeBatchRequest>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .record_grade_batch(batch.into_inner(), &req)
        .await
}

pub async fn teacher_edit_form(req: HttpRequest) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.teacher_edit_form(&req).await
}

pub async fn teacher_edit(
    req: HttpRequest,
    update: web::Json<UpdateTeacherRequest>,
) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.teacher_edit(update.into_inner(), &req).await
}

pub async fn student_panel(req: HttpRequest) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.student_panel(&req).await
}

pub async fn parent_panel(req: HttpRequest) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.parent_panel(&req).await
}

pub async fn parent_comments(req: HttpRequest) -> ActixResult<HttpResponse> {
    PANEL_SERVICE.parent_comments(&req).await
}

pub async fn submit_parent_comment(
    req: HttpRequest,
    comment: web::Json<ParentCommentRequest>,
) -> ActixResult<HttpResponse> {
    PANEL_SERVICE
        .submit_parent_comment(comment.into_inner(), &req)
        .await
}

// 配置路由，挂载在 /account 作用域下
pub fn configure_panel_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/teacher")
            .wrap(RequireRole::new(&[UserRole::Teacher]))
            .route(web::get().to(teacher_panel))
            .route(web::post().to(submit_grades)),
    )
    .service(
        web::resource("/teacher/edit")
            .wrap(RequireRole::new(&[UserRole::Teacher]))
            .route(web::get().to(teacher_edit_form))
            .route(web::post().to(teacher_edit)),
    )
    .service(
        web::resource("/student")
            .wrap(RequireRole::new(&[UserRole::Student]).forbid_mismatch())
            .route(web::get().to(student_panel)),
    )
    .service(
        web::resource("/parents")
            .wrap(RequireRole::new(&[UserRole::Parent]))
            .route(web::get().to(parent_panel)),
    )
    .service(
        web::resource("/comment")
            .wrap(
                RequireRole::new(&[UserRole::Parent])
                    .challenge_anonymous()
                    .forbid_mismatch(),
            )
            .route(web::get().to(parent_comments))
            .route(web::post().to(submit_parent_comment)),
    );
}
