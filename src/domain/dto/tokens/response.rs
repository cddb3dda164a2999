use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 토큰 응답
///
/// `expiresIn`은 액세스 토큰이 만료되는 시각(RFC 3339)입니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: DateTime<Utc>,
}

impl TokenResponse {
    pub fn bearer(access_token: String, refresh_token: String, expires_in: DateTime<Utc>) -> Self {
        Self {
            token_type: "Bearer".to_string(),
            access_token,
            refresh_token,
            expires_in,
        }
    }
}
