//! # Domain Entities Module
//!
//! MongoDB 문서와 1:1로 대응되는 도메인 엔티티를 정의합니다.
//!
//! ```text
//! entities/
//! ├── users/    ← users 컬렉션 (User, Role, LinkedServices)
//! └── tokens/   ← refresh_tokens, password_reset_tokens 컬렉션
//! ```
//!
//! 모든 엔티티는 `_id`를 `Option<ObjectId>`로 두고, 저장 전에는 `None`입니다.
//! 날짜 필드는 BSON 네이티브 날짜(`bson::DateTime`)로 저장됩니다.

pub mod users;
pub mod tokens;
