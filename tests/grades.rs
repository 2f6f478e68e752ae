#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, bearer};

#[actix_web::test]
async fn test_batch_counts_incomplete_entries_as_failed() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, s1) = ctx.add_student("s1", "Ahmadi").await;
    let lesson = ctx.add_lesson("math", profile.id, vec![s1.id]).await;
    let app = init_app!(ctx);

    let batch = json!({
        "students": ["s1", "s1", "ghost"],
        "lessons": ["math", "math", "math"],
        "scores": ["18.5", "", "12"],
        "class_activities": ["2", "1", "1"],
        "months": ["mehr", "aban", "aban"],
        "statuses": ["great", "good", "good"],
    });
    let req = test::TestRequest::post()
        .uri("/account/teacher")
        .insert_header(bearer(&teacher))
        .set_json(&batch)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["succeeded"], 1);
    assert_eq!(body["data"]["failed"], 2);

    let req = test::TestRequest::get()
        .uri(&format!("/account/score/list/{}", lesson.id))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["grades"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_all_failed_batch_is_bad_request() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, s1) = ctx.add_student("s1", "Ahmadi").await;
    ctx.add_lesson("math", profile.id, vec![s1.id]).await;
    let app = init_app!(ctx);

    let batch = json!({
        "students": ["s1"],
        "lessons": ["physics"],
        "scores": ["15"],
        "class_activities": ["1"],
        "months": ["mehr"],
        "statuses": ["good"],
    });
    let req = test::TestRequest::post()
        .uri("/account/teacher")
        .insert_header(bearer(&teacher))
        .set_json(&batch)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4002);
    assert_eq!(body["data"]["failed"], 1);

    let req = test::TestRequest::post()
        .uri("/account/teacher")
        .insert_header(bearer(&teacher))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["succeeded"], 0);
}

#[actix_web::test]
async fn test_update_rejects_out_of_range_and_delete_removes() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, s1) = ctx.add_student("s1", "Ahmadi").await;
    let lesson = ctx.add_lesson("math", profile.id, vec![s1.id]).await;
    let app = init_app!(ctx);

    let batch = json!({
        "students": ["s1"],
        "lessons": ["math"],
        "scores": ["10"],
        "class_activities": ["1"],
        "months": ["dey"],
        "statuses": ["average"],
    });
    let req = test::TestRequest::post()
        .uri("/account/teacher")
        .insert_header(bearer(&teacher))
        .set_json(&batch)
        .to_request();
    test::call_service(&app, req).await;

    let grades = ctx.storage.list_lesson_grades(lesson.id).await.unwrap();
    let grade_id = grades[0].grade.id;
    let update_uri = format!("/account/score/update/{}/{}", lesson.id, grade_id);

    let req = test::TestRequest::post()
        .uri(&update_uri)
        .insert_header(bearer(&teacher))
        .set_json(json!({ "score": 25.0, "class_activity": 1.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4003);

    let req = test::TestRequest::post()
        .uri(&update_uri)
        .insert_header(bearer(&teacher))
        .set_json(json!({ "score": 19.0, "class_activity": 2.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/account/score/delete/{}/{}", lesson.id, grade_id))
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(ctx.storage.list_lesson_grades(lesson.id).await.unwrap().is_empty());
}
