//! # Data Transfer Objects
//!
//! API 경계에서 주고받는 요청/응답 구조체입니다.
//!
//! - [`users`] - 가입, 로그인, 사용자 관리
//! - [`tokens`] - 토큰 갱신, 비밀번호 재설정, 토큰 응답

pub mod users;
pub mod tokens;
