//! 사용자 관리 서비스 모듈
//!
//! 관리자/본인용 사용자 CRUD와 프로필 조회를 제공합니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::users::UserService;
//!
//! let user_service = locator.get::<UserService>()?;
//! let user = user_service.get("5f1b2c3d4e5f6a7b8c9d0e1f").await?;
//! ```

pub mod user_service;

pub use user_service::*;
