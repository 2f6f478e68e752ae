use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::RequireRole;
use crate::models::academics::requests::{AttendanceSubmission, UpdateGradeRequest};
use crate::models::users::entities::UserRole;
use crate::services::AcademicService;

static ACADEMIC_SERVICE: Lazy<AcademicService> = Lazy::new(AcademicService::new_lazy);

pub async fn list_lessons(req: HttpRequest) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.list_lessons(&req).await
}

pub async fn attendance_view(
    req: HttpRequest,
    lesson_id: web::Path<i64>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .attendance_view(lesson_id.into_inner(), &req)
        .await
}

pub async fn record_attendance(
    req: HttpRequest,
    lesson_id: web::Path<i64>,
    submission: web::Json<AttendanceSubmission>,
) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE
        .record_attendance(lesson_id.into_inner(), submission.into_inner(), &req)
        .await
}

pub async fn score_list(req: HttpRequest, lesson_id: web::Path<i64>) -> ActixResult<HttpResponse> {
    ACADEMIC_SERVICE.score_list(lesson_id.into_inner(), &req).await
}

pub async fn grade_detail(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (lesson_id, grade_id) = path.into_inner();
    ACADEMIC_SERVICE.grade_detail(lesson_id, grade_id, &req).await
}

pub async fn update_grade(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
    update: web::Json<UpdateGradeRequest>,
) -> ActixResult<HttpResponse> {
    let (lesson_id, grade_id) = path.into_inner();
    ACADEMIC_SERVICE
        .update_grade(lesson_id, grade_id, update.into_inner(), &req)
        .await
}

pub async fn delete_grade(
    req: HttpRequest,
    path: web::Path<(i64, i64)>,
) -> ActixResult<HttpResponse> {
    let (lesson_id, grade_id) = path.into_inner();
    ACADEMIC_SERVICE.delete_grade(lesson_id, grade_id, &req).await
}

// 配置路由，挂载在 /account 作用域下
pub fn configure_academic_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/lessons")
            .wrap(
                RequireRole::new(&[UserRole::Admin, UserRole::Teacher])
                    .challenge_anonymous()
                    .forbid_mismatch(),
            )
            .route(web::get().to(list_lessons)),
    )
    .service(
        web::resource("/lesson/{lesson_id}")
            .wrap(RequireRole::new(&[UserRole::Teacher]))
            .route(web::get().to(attendance_view))
            .route(web::post().to(record_attendance)),
    )
    .service(
        web::resource("/score/list/{lesson_id}")
            .wrap(RequireRole::new(&[UserRole::Admin, UserRole::Teacher]).forbid_mismatch())
            .route(web::get().to(score_list)),
    )
    .service(
        web::resource("/score/update/{lesson_id}/{grade_id}")
            .wrap(RequireRole::new(&[UserRole::Teacher]))
            .route(web::get().to(grade_detail))
            .route(web::post().to(update_grade)),
    )
    .service(
        // 删除沿用 GET 链接
        web::resource("/score/delete/{lesson_id}/{grade_id}")
            .wrap(RequireRole::new(&[UserRole::Teacher]))
            .route(web::get().to(delete_grade)),
    );
}
