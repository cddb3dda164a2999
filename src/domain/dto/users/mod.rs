//! # User Data Transfer Objects Module
//!
//! 사용자 관련 API의 요청/응답 데이터 구조를 정의하는 모듈입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── auth_request.rs          # 가입, 로그인, 소셜 로그인
//! │   └── create_user_request.rs   # 사용자 생성/교체/수정, 목록 쿼리
//! └── response/
//!     └── user_response.rs         # 사용자 공개 표현, 인증 응답
//! ```
//!
//! 요청 DTO는 `validator`로 검증하며, 실패는
//! [`FieldError`](crate::core::errors::FieldError) 목록으로 응답됩니다.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
