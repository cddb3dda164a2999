//! API 라우트 설정 모듈
//!
//! RESTful API 엔드포인트들을 기능별로 그룹화하여 제공합니다.
//! 인증/사용자 라우트와 헬스체크 엔드포인트를 포함합니다.
//!
//! # Features
//!
//! - `/v1/auth` 인증 API (공개)
//! - `/v1/users` 사용자 API (라우트별 `wrap`으로 인증/관리자 권한 적용)
//! - JSON 본문, 쿼리 문자열 파싱 실패를 400 `BadRequest`로 변환
//! - 헬스체크 엔드포인트
//!
//! # Auth Middleware Usage
//!
//! 같은 스코프 안에서도 라우트마다 필요한 권한이 달라 핸들러 매크로의 `wrap`을 사용합니다:
//!
//! ```rust,ignore
//! #[get("", wrap = "AuthMiddleware::admin()")]         // 관리자 전용
//! pub async fn list_users(/* ... */) { /* ... */ }
//!
//! #[get("/profile", wrap = "AuthMiddleware::required()")] // 로그인 사용자
//! pub async fn get_profile(/* ... */) { /* ... */ }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(web::Data::from(locator.clone()))
//!     .configure(configure_all_routes)
//! ```

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::StorageBackend;
use crate::core::errors::AppError;
use crate::handlers;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config());

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_user_routes(cfg);
}

fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/auth")
            // 로컬 인증
            .service(handlers::auth::register)
            .service(handlers::auth::login)
            .service(handlers::auth::refresh_token)
            // 소셜 로그인
            .service(handlers::auth::facebook_login)
            .service(handlers::auth::google_login)
            // 비밀번호 재설정
            .service(handlers::auth::send_password_reset)
            .service(handlers::auth::reset_password),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/users")
            .service(handlers::users::list_users)
            .service(handlers::users::create_user)
            // `/{user_id}`보다 먼저 등록해야 함
            .service(handlers::users::get_profile)
            .service(handlers::users::get_user)
            .service(handlers::users::replace_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

/// 잘못된 JSON 본문은 400으로 응답합니다
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    })
}

/// 잘못된 쿼리 문자열은 400으로 응답합니다
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    })
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// 로드밸런서나 모니터링 시스템에서 서비스 상태를 확인하는 데 사용됩니다.
///
/// ```bash
/// curl http://localhost:3000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "user_auth_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z",
///   "storage": "mongo"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": StorageBackend::current().as_str(),
    }))
}
