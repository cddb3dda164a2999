//! 공통 유틸리티 함수 모듈
//!
//! 애플리케이션 전체에서 사용되는 공통 유틸리티 함수들을 제공합니다.
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 정리, 이메일 정규화, 랜덤 토큰 문자열
//! - [`time_utils`] - BSON/chrono 날짜 변환
//! - [`password_utils`] - bcrypt 해싱/검증
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::utils::string_utils::{normalize_email, random_hex};
//!
//! let email = normalize_email("  Jon@Snow.com ");
//! let secret = random_hex(40);
//! ```

pub mod string_utils;
pub mod time_utils;
pub mod password_utils;
