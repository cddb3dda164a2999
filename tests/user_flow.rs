use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use user_auth_backend::domain::entities::users::Role;
use user_auth_backend::repositories::users::UserRepository;

mod common;
use common::{bearer, TestContext};

// ========== AUTHENTICATION ==========

#[actix_web::test]
async fn test_profile_requires_token() {
    let ctx = TestContext::new();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get().uri("/v1/users/profile").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Unauthorized");
}

#[actix_web::test]
async fn test_profile_returns_current_user() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["id"], user_id.as_str());
    assert_eq!(body["email"], "sansa@stark.com");
}

#[actix_web::test]
async fn test_expired_access_token() {
    let ctx = TestContext::new();
    ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let user = ctx.users.find_by_email("sansa@stark.com").await.unwrap().unwrap();
    let expired = ctx.expired_access_token_for(&user);
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users/profile")
        .insert_header(bearer(&expired))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "jwt expired");
}

#[actix_web::test]
async fn test_token_of_deleted_user_is_rejected() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let object_id = mongodb::bson::oid::ObjectId::parse_str(&user_id).unwrap();
    ctx.users.delete(&object_id).await.unwrap();
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users/profile")
        .insert_header(bearer(&token))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

// ========== ADMIN ONLY ==========

#[actix_web::test]
async fn test_non_admin_cannot_list_users() {
    let ctx = TestContext::new();
    let (_, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Forbidden");
}

#[actix_web::test]
async fn test_admin_creates_and_lists_users() {
    let ctx = TestContext::new();
    let (_, admin_token) = ctx.create_admin().await;
    let app = test::init_service(ctx.create_app()).await;

    let create = test::TestRequest::post()
        .uri("/v1/users")
        .insert_header(bearer(&admin_token))
        .set_json(json!({
            "email": "bran@stark.com",
            "password": "123456",
            "name": "Bran",
            "role": "admin"
        }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["role"], "admin");

    let list = test::TestRequest::get()
        .uri("/v1/users?role=admin&perPage=1")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, list).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let users: Value = test::read_body_json(resp).await;
    let users = users.as_array().unwrap();
    assert_eq!(users.len(), 1);
    // 최신 생성순
    assert_eq!(users[0]["email"], "bran@stark.com");
}

#[actix_web::test]
async fn test_list_users_rejects_bad_paging() {
    let ctx = TestContext::new();
    let (_, admin_token) = ctx.create_admin().await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users?perPage=500")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["errors"][0]["field"], "perPage");
    assert_eq!(body["errors"][0]["location"], "query");
}

#[actix_web::test]
async fn test_list_users_far_page_is_empty() {
    let ctx = TestContext::new();
    let (_, admin_token) = ctx.create_admin().await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users?page=18446744073709551615&perPage=100")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let users: Value = test::read_body_json(resp).await;
    assert_eq!(users, json!([]));
}

// ========== SELF OR ADMIN ==========

#[actix_web::test]
async fn test_user_cannot_read_another_user() {
    let ctx = TestContext::new();
    let (_, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let (other_id, _) = ctx.create_user("arya@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri(&format!("/v1/users/{}", other_id))
        .insert_header(bearer(&token))
        .to_request();

    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn test_admin_gets_missing_user() {
    let ctx = TestContext::new();
    let (_, admin_token) = ctx.create_admin().await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/v1/users/000000000000000000000000")
        .insert_header(bearer(&admin_token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "User does not exist");
    // 기본 환경(production)에서는 stack을 노출하지 않음
    assert!(body.get("stack").is_none());
}

#[actix_web::test]
async fn test_user_patches_self_without_role_escalation() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::patch()
        .uri(&format!("/v1/users/{}", user_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Queen in the North", "role": "admin" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Queen in the North");
    assert_eq!(body["role"], "user");
}

#[actix_web::test]
async fn test_put_to_taken_email_conflicts() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    ctx.create_user("arya@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::put()
        .uri(&format!("/v1/users/{}", user_id))
        .insert_header(bearer(&token))
        .set_json(json!({ "email": "arya@stark.com", "password": "123456" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn test_user_deletes_self() {
    let ctx = TestContext::new();
    let (user_id, token) = ctx.create_user("sansa@stark.com", "123456", Role::User).await;
    let app = test::init_service(ctx.create_app()).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/v1/users/{}", user_id))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(ctx.users.count(), 0);
}
