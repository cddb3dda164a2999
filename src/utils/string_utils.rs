//! # 문자열 유틸리티
//!
//! 문자열 처리와 관련된 공통 유틸리티 함수들입니다.
//! 이메일 정규화, 요청 필드명 변환, 랜덤 토큰 문자열 생성을 담당합니다.

use rand::RngCore;
use serde::Deserialize;

/// 옵션 문자열을 정리합니다
///
/// 앞뒤 공백을 제거하고, 비어 있는 문자열은 `None`으로 바꿉니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 저장용 이메일 형태로 정규화합니다 (trim + 소문자)
///
/// 사용자 컬렉션의 email 필드는 항상 이 형태로 저장/조회됩니다.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// snake_case 필드명을 요청 본문에서 쓰는 camelCase로 변환합니다
///
/// 검증 에러의 `field` 값이 클라이언트가 보낸 키와 일치하도록 합니다.
/// `access_token`처럼 본문에서도 snake_case를 쓰는 필드는 호출 측에서 예외 처리합니다.
pub fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = !result.is_empty();
            continue;
        }
        if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }

    result
}

/// 지정한 바이트 수만큼 암호학적 난수를 만들어 16진수 문자열로 반환합니다
///
/// 리프레시/재설정 토큰은 40바이트(80자)를 사용합니다.
pub fn random_hex(byte_len: usize) -> String {
    let mut bytes = vec![0u8; byte_len];
    rand::thread_rng().fill_bytes(&mut bytes);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// serde용 옵션 문자열 역직렬화기
///
/// `"  "` 같은 공백 문자열은 `None`으로 처리됩니다.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}
