//! bcrypt 비밀번호 해싱 헬퍼

use bcrypt::{hash, verify};

use crate::core::errors::{AppResult, ErrorContext};

/// 평문 비밀번호를 주어진 cost로 해싱합니다
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    hash(password, cost).context("비밀번호 해싱 실패")
}

/// 평문과 저장된 해시를 비교합니다
///
/// 해시 형식이 잘못된 경우도 불일치로 취급합니다.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    match verify(password, password_hash) {
        Ok(matches) => matches,
        Err(e) => {
            log::warn!("비밀번호 해시 검증 실패: {}", e);
            false
        }
    }
}
