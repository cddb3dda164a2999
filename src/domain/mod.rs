//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities   - MongoDB 문서 (User, RefreshToken, PasswordResetToken)
//! ├── dto        - 요청/응답 구조체와 검증 규칙
//! └── models     - 인증 사용자, JWT 클레임, 소셜 프로필
//!      │
//!      ▼
//! Services → Repositories → MongoDB
//! ```
//!
//! ## 사용자 등록 플로우
//!
//! ```rust,ignore
//! // 1. DTO 검증
//! request.validate_at(FieldLocation::Body)?;
//!
//! // 2. 서비스에서 엔티티 생성 및 저장
//! let user = User::new_local(&email, password_hash, name, Role::User);
//! let saved = user_repository.create(user).await?;
//!
//! // 3. 응답 DTO로 변환
//! let response = AuthResponse::new(saved, token);
//! ```

pub mod entities;
pub mod dto;
pub mod models;
