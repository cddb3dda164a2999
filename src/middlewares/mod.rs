//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용하는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 액세스 토큰 추출 및 검증
//! - 토큰의 `sub`로 사용자를 조회해 request extension에 저장
//! - 관리자 전용 스코프 지원
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::web;
//! use crate::middlewares::AuthMiddleware;
//!
//! web::scope("/v1/users")
//!     .wrap(AuthMiddleware::required())
//!     .service(get_profile);
//!
//! web::resource("")
//!     .wrap(AuthMiddleware::admin())
//!     .route(web::get().to(list_users));
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
