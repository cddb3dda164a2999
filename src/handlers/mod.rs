//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 정의하는 모듈입니다.
//! 핸들러는 요청 DTO를 검증하고 [`ServiceLocator`](crate::core::registry::ServiceLocator)에서
//! 서비스를 꺼내 호출한 뒤 결과를 JSON으로 돌려줍니다.
//!
//! ## 아키텍처 위치
//!
//! ```text
//! HTTP Layer Architecture
//! ┌─────────────────────────────────────────────┐
//!   Client (Browser, Mobile App, API Client)
//! └─────────────────────┬───────────────────────┘
//!                       │ HTTP Request/Response
//! ┌─────────────────────▼───────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! ├─────────────────────────────────────────────┤
//!   Entities/Models - 도메인 모델                  ← Domain Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## 구현 예시
//!
//! ```rust,ignore
//! #[get("/{user_id}", wrap = "AuthMiddleware::required()")]
//! pub async fn get_user(
//!     locator: web::Data<ServiceLocator>,
//!     current: AuthenticatedUser,
//!     user_id: web::Path<String>,
//! ) -> Result<HttpResponse, AppError> {
//!     ensure_access(&current, &user_id)?;
//!     let user = locator.get::<UserService>()?.get(&user_id).await?;
//!     Ok(HttpResponse::Ok().json(user))
//! }
//! ```
//!
//! ## 모듈 구성
//!
//! - **`auth`**: 인증 엔드포인트 (`/v1/auth`)
//!   - 회원가입 (`POST /register`), 로그인 (`POST /login`)
//!   - 소셜 로그인 (`POST /facebook`, `POST /google`)
//!   - 토큰 재발급 (`POST /refresh-token`)
//!   - 비밀번호 재설정 (`POST /send-password-reset`, `POST /reset-password`)
//!
//! - **`users`**: 사용자 관리 엔드포인트 (`/v1/users`)
//!   - 목록/생성 (관리자), 프로필, 조회/교체/수정/삭제 (본인 또는 관리자)
//!
//! ## 에러 처리
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하고, `AppError`의
//! `ResponseError` 구현이 `{code, message, errors?, stack?}` 본문을 만듭니다.

pub mod users;
pub mod auth;
