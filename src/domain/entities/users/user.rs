//! User Entity Implementation
//!
//! 사용자 엔티티의 핵심 구현체입니다.
//! 로컬(이메일/비밀번호) 가입과 소셜 로그인 연동을 하나의 문서로 표현합니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::AuthProvider;
use crate::domain::models::oauth::OAuthProfile;
use crate::utils::string_utils::{clean_optional_string, normalize_email};

/// 사용자 권한
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::User, Role::Admin];

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// 연결된 소셜 계정 ID
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedServices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
}

impl LinkedServices {
    pub fn get(&self, provider: AuthProvider) -> Option<&str> {
        match provider {
            AuthProvider::Facebook => self.facebook.as_deref(),
            AuthProvider::Google => self.google.as_deref(),
        }
    }

    pub fn set(&mut self, provider: AuthProvider, id: String) {
        match provider {
            AuthProvider::Facebook => self.facebook = Some(id),
            AuthProvider::Google => self.google = Some(id),
        }
    }
}

/// `users` 컬렉션 문서
///
/// `password`는 항상 bcrypt 해시이며 응답으로 직렬화되지 않습니다
/// (응답은 [`UserResponse`](crate::domain::dto::users::response::UserResponse)를 거칩니다).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub services: LinkedServices,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 이메일/비밀번호 가입 사용자를 만듭니다
    ///
    /// 이메일은 저장 형태로 정규화되고, 이름은 앞뒤 공백이 제거됩니다.
    pub fn new_local(email: &str, password_hash: String, name: Option<String>, role: Role) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email: normalize_email(email),
            password: password_hash,
            name: clean_optional_string(name),
            role,
            services: LinkedServices::default(),
            picture: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// 소셜 프로필로 새 사용자를 만듭니다
    ///
    /// 비밀번호는 호출 측에서 만든 임의 값의 해시를 받습니다.
    pub fn new_oauth(profile: &OAuthProfile, password_hash: String) -> Self {
        let mut user = Self::new_local(&profile.email, password_hash, profile.name.clone(), Role::User);
        user.services.set(profile.service, profile.id.clone());
        user.picture = clean_optional_string(profile.picture.clone());
        user
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// 기존 사용자에 소셜 계정을 연결합니다
    ///
    /// 프로바이더 ID는 항상 갱신하고, 이름과 사진은 비어 있을 때만 채웁니다.
    pub fn link_oauth_profile(&mut self, profile: &OAuthProfile) {
        self.services.set(profile.service, profile.id.clone());

        if self.name.is_none() {
            self.name = clean_optional_string(profile.name.clone());
        }
        if self.picture.is_none() {
            self.picture = clean_optional_string(profile.picture.clone());
        }

        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = DateTime::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(service: AuthProvider) -> OAuthProfile {
        OAuthProfile {
            service,
            id: "provider-123".to_string(),
            name: Some("Bran Stark".to_string()),
            email: "Bran@Winterfell.com".to_string(),
            picture: Some("https://cdn.example.com/bran.png".to_string()),
        }
    }

    #[test]
    fn test_new_local_normalizes_fields() {
        let user = User::new_local("  Jon@Snow.COM ", "hash".to_string(), Some("  Jon Snow ".to_string()), Role::User);

        assert_eq!(user.email, "jon@snow.com");
        assert_eq!(user.name.as_deref(), Some("Jon Snow"));
        assert_eq!(user.role, Role::User);
        assert!(user.id.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[test]
    fn test_new_oauth_links_provider() {
        let user = User::new_oauth(&profile(AuthProvider::Google), "hash".to_string());

        assert_eq!(user.email, "bran@winterfell.com");
        assert_eq!(user.services.get(AuthProvider::Google), Some("provider-123"));
        assert_eq!(user.services.get(AuthProvider::Facebook), None);
        assert_eq!(user.picture.as_deref(), Some("https://cdn.example.com/bran.png"));
    }

    #[test]
    fn test_link_oauth_profile_backfills_only_missing_fields() {
        let mut user = User::new_local("bran@winterfell.com", "hash".to_string(), Some("Bran".to_string()), Role::User);

        user.link_oauth_profile(&profile(AuthProvider::Facebook));

        assert_eq!(user.services.get(AuthProvider::Facebook), Some("provider-123"));
        assert_eq!(user.name.as_deref(), Some("Bran"));
        assert_eq!(user.picture.as_deref(), Some("https://cdn.example.com/bran.png"));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(Role::from_str("user"), Some(Role::User));
        assert_eq!(Role::from_str("root"), None);
        assert_eq!(Role::default(), Role::User);
    }
}
