use chrono::Duration;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::generate_token_value;
use crate::utils::time_utils::{expires_after, is_expired_at};

/// `refresh_tokens` 컬렉션 문서
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub token: String,
    pub user_id: ObjectId,
    /// 조회용으로 복제해 둔 사용자 이메일
    pub user_email: String,
    pub expires: DateTime,
}

impl RefreshToken {
    pub fn generate(user_id: ObjectId, user_email: &str, ttl: Duration) -> Self {
        Self {
            id: None,
            token: generate_token_value(&user_id),
            user_id,
            user_email: user_email.to_string(),
            expires: expires_after(ttl),
        }
    }

    pub fn is_expired(&self) -> bool {
        is_expired_at(self.expires, DateTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_sets_owner_and_expiry() {
        let user_id = ObjectId::new();
        let token = RefreshToken::generate(user_id, "jon@snow.com", Duration::days(30));

        assert!(token.token.starts_with(&user_id.to_hex()));
        assert_eq!(token.user_email, "jon@snow.com");
        assert!(!token.is_expired());
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let token = RefreshToken::generate(ObjectId::new(), "jon@snow.com", Duration::minutes(-1));

        assert!(token.is_expired());
    }
}
