//! # 소셜 프로필 모델
//!
//! 프로바이더 API 응답을 공통 프로필로 변환합니다.
//!
//! - Facebook Graph `GET /me?fields=id,name,email,picture`
//! - Google `GET /oauth2/v3/userinfo`

use serde::Deserialize;

use crate::config::AuthProvider;

/// 프로바이더와 무관한 소셜 프로필
#[derive(Debug, Clone, PartialEq)]
pub struct OAuthProfile {
    pub service: AuthProvider,
    /// 프로바이더 측 사용자 ID
    pub id: String,
    pub name: Option<String>,
    pub email: String,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FacebookPictureData {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FacebookPicture {
    pub data: Option<FacebookPictureData>,
}

/// Facebook Graph `/me` 응답
#[derive(Debug, Deserialize)]
pub struct FacebookProfile {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<FacebookPicture>,
}

/// Google userinfo 응답
#[derive(Debug, Deserialize)]
pub struct GoogleUserInfo {
    /// Google 계정 고유 ID
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

impl FacebookProfile {
    /// 이메일 권한이 없는 계정이면 `None`
    pub fn into_profile(self) -> Option<OAuthProfile> {
        let picture = self.picture.and_then(|p| p.data).and_then(|d| d.url);

        Some(OAuthProfile {
            service: AuthProvider::Facebook,
            id: self.id,
            name: self.name,
            email: self.email?,
            picture,
        })
    }
}

impl GoogleUserInfo {
    pub fn into_profile(self) -> Option<OAuthProfile> {
        Some(OAuthProfile {
            service: AuthProvider::Google,
            id: self.sub,
            name: self.name,
            email: self.email?,
            picture: self.picture,
        })
    }
}
