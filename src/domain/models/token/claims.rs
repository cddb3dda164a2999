//! JWT 액세스 토큰 클레임
//!
//! RFC 7519 등록 클레임 중 `sub`, `iat`, `exp`만 사용합니다.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// 사용자 ObjectId (16진수 문자열)
    pub sub: String,
    /// 발급 시각 (Unix 초)
    pub iat: i64,
    /// 만료 시각 (Unix 초)
    pub exp: i64,
}
