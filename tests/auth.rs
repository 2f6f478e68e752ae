#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::TestContext;

fn registration(username: &str) -> Value {
    json!({
        "username": username,
        "password1": "correct-horse",
        "password2": "correct-horse",
        "phone_number": "09121234567",
        "role": "student",
        "first_name": "Sara",
        "last_name": "Karimi",
    })
}

#[actix_web::test]
async fn test_register_logs_in_and_logout_revokes() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(registration("sara_k"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["remember_me"], true);
    let token = body["data"]["access_token"]
        .as_str()
        .expect("token")
        .to_string();
    let auth = ("Authorization", format!("Bearer {token}"));

    let req = test::TestRequest::get()
        .uri("/account/login")
        .insert_header(auth.clone())
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"]["authenticated"], true);

    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/account/logout")
        .insert_header(auth.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // 注销后的令牌视为匿名
    let req = test::TestRequest::get()
        .uri("/account/change_password")
        .insert_header(auth)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_duplicate_username_conflicts() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(registration("sara_k"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(registration("sara_k"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2013);
}

#[actix_web::test]
async fn test_login_checks_password_and_changes_it() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(registration("sara_k"))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/account/login")
        .set_json(json!({ "username": "sara_k", "password": "wrong-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/account/login")
        .set_json(json!({ "username": "sara_k", "password": "correct-horse" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["access_token"].as_str().unwrap().to_string();
    let auth = ("Authorization", format!("Bearer {token}"));

    let req = test::TestRequest::post()
        .uri("/account/change_password")
        .insert_header(auth.clone())
        .set_json(json!({
            "old_password": "correct-horse",
            "new_password1": "battery-staple",
            "new_password2": "battery-staple",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/account/login")
        .set_json(json!({ "username": "sara_k", "password": "battery-staple" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

/// 登录 sara_k 并返回 Bearer 请求头
macro_rules! login {
    ($app:expr, $password:expr) => {{
        let req = test::TestRequest::post()
            .uri("/account/login")
            .set_json(json!({ "username": "sara_k", "password": $password }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        let token = body["data"]["access_token"].as_str().expect("token").to_string();
        ("Authorization", format!("Bearer {token}"))
    }};
}

#[actix_web::test]
async fn test_password_change_signs_out_every_session() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(registration("sara_k"))
        .to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let laptop = (
        "Authorization",
        format!("Bearer {}", body["data"]["access_token"].as_str().expect("token")),
    );
    let phone = login!(app, "correct-horse");

    // 先访问一次，让该令牌的用户进入缓存
    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(laptop.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/account/change_password")
        .insert_header(phone.clone())
        .set_json(json!({
            "old_password": "correct-horse",
            "new_password1": "battery-staple",
            "new_password2": "battery-staple",
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for auth in [laptop.clone(), phone] {
        let req = test::TestRequest::get()
            .uri("/account/student")
            .insert_header(auth)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    // 缓存清空后仍以存储中的版本为准
    ctx.cache.invalidate_all().await;
    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(laptop)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let fresh = login!(app, "battery-staple");
    let req = test::TestRequest::get()
        .uri("/account/student")
        .insert_header(fresh)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_signed_in_user_cannot_register_again() {
    let ctx = TestContext::new().await;
    let (student, _) = ctx.add_student("sara_k", "Karimi").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/account/register")
        .insert_header(common::bearer(&student))
        .set_json(registration("second_account"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["code"], 2016);
    assert_eq!(body["data"]["user"]["username"], "sara_k");

    let req = test::TestRequest::get()
        .uri("/account/register")
        .insert_header(common::bearer(&student))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    // 匿名访问仍可看到注册选项
    let req = test::TestRequest::get().uri("/account/register").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_staff_roles_cannot_register() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let mut body = registration("mr_teacher");
    body["role"] = json!("teacher");
    let req = test::TestRequest::post()
        .uri("/account/register")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
