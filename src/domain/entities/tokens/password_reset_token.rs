use chrono::Duration;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::generate_token_value;
use crate::utils::time_utils::{expires_after, is_expired_at};

/// `password_reset_tokens` 컬렉션 문서
///
/// 상태는 발급 → 소비 또는 만료 한 번만 전이합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub reset_token: String,
    pub user_id: ObjectId,
    pub user_email: String,
    pub expires: DateTime,
}

impl PasswordResetToken {
    pub fn generate(user_id: ObjectId, user_email: &str, ttl: Duration) -> Self {
        Self {
            id: None,
            reset_token: generate_token_value(&user_id),
            user_id,
            user_email: user_email.to_string(),
            expires: expires_after(ttl),
        }
    }

    pub fn is_expired(&self) -> bool {
        is_expired_at(self.expires, DateTime::now())
    }
}
