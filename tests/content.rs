#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use common::{TestContext, bearer};
use rust_school_portal::models::content::requests::{CreateArticleRequest, CreateNewsRequest};

fn article(title: &str) -> CreateArticleRequest {
    CreateArticleRequest {
        title: title.to_string(),
        content: "Notes on photosynthesis".into(),
        subject: "biology".into(),
        slug: None,
        image_url: None,
        read_minutes: 4,
    }
}

#[actix_web::test]
async fn test_each_detail_view_counts_once() {
    let ctx = TestContext::new().await;
    let (author, _) = ctx.add_teacher("reza").await;
    let created = ctx
        .storage
        .create_article(author.id, "plants".into(), article("Plants"))
        .await
        .unwrap();
    ctx.storage.set_article_status(created.id, true).await.unwrap();
    let app = init_app!(ctx);

    for _ in 0..3 {
        let req = test::TestRequest::get().uri("/blog/detail/plants").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let stored = ctx
        .storage
        .get_article_for_author("plants", author.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.views, 3);
}

#[actix_web::test]
async fn test_unpublished_content_is_hidden() {
    let ctx = TestContext::new().await;
    let admin = ctx.add_admin("boss").await;
    let (author, _) = ctx.add_teacher("reza").await;
    ctx.storage
        .create_article(author.id, "draft".into(), article("Draft"))
        .await
        .unwrap();
    let news = ctx
        .storage
        .create_news(
            admin.id,
            CreateNewsRequest {
                title: "Exam week".into(),
                content: "Schedule".into(),
                subject: "exams".into(),
                image_url: None,
                read_minutes: 1,
                status: false,
                special: false,
            },
        )
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/blog/detail/draft").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/news/detail/{}", news.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // 管理员发布后可见
    let req = test::TestRequest::post()
        .uri(&format!("/admin/publish/news/{}", news.id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "status": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/news/detail/{}", news.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_comment_public_only_when_approved_and_visible() {
    let ctx = TestContext::new().await;
    let admin = ctx.add_admin("boss").await;
    let (author, _) = ctx.add_teacher("reza").await;
    let (student, _) = ctx.add_student("sara", "Karimi").await;
    let created = ctx
        .storage
        .create_article(author.id, "plants".into(), article("Plants"))
        .await
        .unwrap();
    ctx.storage.set_article_status(created.id, true).await.unwrap();
    let app = init_app!(ctx);

    let comment = json!({
        "name": "Sara",
        "phone_number": "09121234567",
        "comment": "Great article",
    });

    // 匿名评论需要登录
    let req = test::TestRequest::post()
        .uri("/blog/detail/plants")
        .set_json(&comment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/blog/detail/plants")
        .insert_header(bearer(&student))
        .set_json(&comment)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let comment_id = body["data"]["id"].as_i64().expect("comment id");
    assert_eq!(body["data"]["approved"], false);

    let public_comments = |body: &Value| {
        body["data"]["comments"]["items"]
            .as_array()
            .map(Vec::len)
            .unwrap_or_default()
    };

    let moderate_uri = format!("/admin/comments/blog/{comment_id}");
    let req = test::TestRequest::post()
        .uri(&moderate_uri)
        .insert_header(bearer(&admin))
        .set_json(json!({ "approved": true, "visible": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/blog/detail/plants").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(public_comments(&body), 0);

    let req = test::TestRequest::post()
        .uri(&moderate_uri)
        .insert_header(bearer(&admin))
        .set_json(json!({ "visible": true }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/blog/detail/plants").to_request();
    let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
    assert_eq!(public_comments(&body), 1);
}

#[actix_web::test]
async fn test_teacher_articles_are_private_to_author() {
    let ctx = TestContext::new().await;
    let (author, _) = ctx.add_teacher("reza").await;
    let (other, _) = ctx.add_teacher("mina").await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/blog/add")
        .insert_header(bearer(&author))
        .set_json(json!({
            "title": "Cell Biology",
            "content": "Mitochondria",
            "subject": "biology",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["slug"], "cell-biology");
    assert_eq!(body["data"]["status"], false);

    let req = test::TestRequest::get()
        .uri("/blog/update/cell-biology")
        .insert_header(bearer(&other))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/blog/delete/cell-biology")
        .insert_header(bearer(&author))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
