//! 사용자 인증 백엔드
//!
//! 이메일/비밀번호 회원가입과 로그인, Facebook/Google 소셜 로그인,
//! JWT 액세스 토큰과 회전형 리프레시 토큰, 메일 기반 비밀번호 재설정,
//! 관리자/본인용 사용자 관리를 제공하는 REST 서비스입니다.
//!
//! # Features
//!
//! - **인증**: bcrypt 비밀번호, HS256 액세스 토큰, 단일 사용 리프레시 토큰
//! - **소셜 로그인**: 프로바이더 액세스 토큰으로 프로필 조회 후 계정 연결/생성
//! - **비밀번호 재설정**: 2시간 유효한 단일 사용 토큰과 알림 메일
//! - **사용자 관리**: 역할 기반 접근 제어(관리자, 본인)
//! - **저장소**: MongoDB 또는 in-memory (`STORAGE_BACKEND`)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 (/v1/auth, /v1/users)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 처리 (+ AuthMiddleware)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (ServiceLocator에 등록)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (trait 객체)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB/Memory  │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use user_auth_backend::core::registry::ServiceLocator;
//! use user_auth_backend::services::auth::AuthService;
//!
//! let auth_service = locator.get::<AuthService>()?;
//! let response = auth_service.login("jon@snow.com", "123456").await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
