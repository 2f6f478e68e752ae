#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, bearer};

#[actix_web::test]
async fn test_same_day_resubmission_updates_in_place() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, s1) = ctx.add_student("s1", "Ahmadi").await;
    let (_, s2) = ctx.add_student("s2", "Bahrami").await;
    let lesson = ctx.add_lesson("math", profile.id, vec![s1.id, s2.id]).await;
    let app = init_app!(ctx);
    let uri = format!("/account/lesson/{}", lesson.id);

    let first = json!({ "statuses": {
        s1.id.to_string(): "present",
        s2.id.to_string(): "late",
    }});
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&teacher))
        .set_json(&first)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["inserted"], 2);
    assert_eq!(body["data"]["updated"], 0);

    let second = json!({ "statuses": {
        s1.id.to_string(): "absent",
        s2.id.to_string(): "late",
    }});
    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(&teacher))
        .set_json(&second)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["inserted"], 0);
    assert_eq!(body["data"]["updated"], 2);

    // 当天仍只有两条记录，状态为最后一次提交
    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&teacher))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let today = body["data"]["today"].as_object().expect("today map");
    assert_eq!(today.len(), 2);
    assert_eq!(today[&s1.id.to_string()]["status"], "absent");
    assert_eq!(body["data"]["students"][0]["last_name"], "Ahmadi");
}

#[actix_web::test]
async fn test_off_roster_and_invalid_tokens_are_skipped() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, enrolled) = ctx.add_student("s1", "Ahmadi").await;
    let (_, outsider) = ctx.add_student("s2", "Bahrami").await;
    let lesson = ctx.add_lesson("math", profile.id, vec![enrolled.id]).await;
    let app = init_app!(ctx);

    let submission = json!({ "statuses": {
        enrolled.id.to_string(): "present",
        outsider.id.to_string(): "present",
        "not-an-id": "late",
    }});
    let req = test::TestRequest::post()
        .uri(&format!("/account/lesson/{}", lesson.id))
        .insert_header(bearer(&teacher))
        .set_json(&submission)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["inserted"], 1);
}

#[actix_web::test]
async fn test_nothing_selected_is_a_warning() {
    let ctx = TestContext::new().await;
    let (teacher, profile) = ctx.add_teacher("reza").await;
    let (_, s1) = ctx.add_student("s1", "Ahmadi").await;
    let lesson = ctx.add_lesson("math", profile.id, vec![s1.id]).await;
    let app = init_app!(ctx);

    let submission = json!({ "statuses": { s1.id.to_string(): "" } });
    let req = test::TestRequest::post()
        .uri(&format!("/account/lesson/{}", lesson.id))
        .insert_header(bearer(&teacher))
        .set_json(&submission)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 4011);
    assert_eq!(body["data"]["inserted"], 0);
}
