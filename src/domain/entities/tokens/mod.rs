//! Token Entity Module
//!
//! 리프레시 토큰과 비밀번호 재설정 토큰 문서를 정의합니다.
//!
//! 두 토큰 모두 `"<userId>.<80자리 16진수>"` 형식의 불투명 문자열이며,
//! 검증 시 원자적 find-and-delete로 한 번만 소비됩니다.

pub mod refresh_token;
pub mod password_reset_token;

pub use password_reset_token::PasswordResetToken;
pub use refresh_token::RefreshToken;

use mongodb::bson::oid::ObjectId;

use crate::utils::string_utils::random_hex;

/// 토큰 문자열에 붙는 난수 바이트 수
pub const TOKEN_RANDOM_BYTES: usize = 40;

/// 사용자 ID를 접두어로 하는 불투명 토큰 문자열을 만듭니다
pub fn generate_token_value(user_id: &ObjectId) -> String {
    format!("{}.{}", user_id.to_hex(), random_hex(TOKEN_RANDOM_BYTES))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_value_format() {
        let user_id = ObjectId::new();
        let token = generate_token_value(&user_id);

        let (prefix, secret) = token.split_once('.').unwrap();
        assert_eq!(prefix, user_id.to_hex());
        assert_eq!(secret.len(), 80);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
