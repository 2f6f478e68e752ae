#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use common::{TestContext, bearer};

#[actix_web::test]
async fn test_student_on_teacher_endpoint_is_not_found() {
    let ctx = TestContext::new().await;
    let (student, _) = ctx.add_student("sara", "Karimi").await;
    let app = init_app!(ctx);

    for path in ["/account/teacher", "/account/teacher/edit", "/blog/add", "/admin/messages"] {
        let req = test::TestRequest::get()
            .uri(path)
            .insert_header(bearer(&student))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1004);
    }
}

#[actix_web::test]
async fn test_shared_endpoints_distinguish_anonymous_and_wrong_role() {
    let ctx = TestContext::new().await;
    let (student, _) = ctx.add_student("sara", "Karimi").await;
    let parent = ctx.add_parent("ali").await;
    let app = init_app!(ctx);

    // 课程列表：匿名 401，学生 403
    let req = test::TestRequest::get().uri("/account/lessons").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/account/lessons")
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 学生面板：匿名 404，家长 403
    let req = test::TestRequest::get().uri("/account/student").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(bearer(&parent))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // 家长意见：学生 403
    let req = test::TestRequest::get()
        .uri("/account/comment")
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_matching_roles_reach_their_panels() {
    let ctx = TestContext::new().await;
    let (student, _) = ctx.add_student("sara", "Karimi").await;
    let (teacher, _) = ctx.add_teacher("reza").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(bearer(&student))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/account/teacher")
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["teacher"]["full_name_en"], "reza");
}

#[actix_web::test]
async fn test_unknown_paths_use_not_found_envelope() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    for path in ["/nothing-here", "/account/nothing", "/news/detail/abc"] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 1004);
    }
}

#[actix_web::test]
async fn test_teacher_cannot_touch_foreign_lesson() {
    let ctx = TestContext::new().await;
    let (owner, owner_profile) = ctx.add_teacher("owner").await;
    let (other, _) = ctx.add_teacher("other").await;
    let lesson = ctx.add_lesson("math", owner_profile.id, vec![]).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/account/lesson/{}", lesson.id))
        .insert_header(bearer(&other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/account/lesson/{}", lesson.id))
        .insert_header(bearer(&owner))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
