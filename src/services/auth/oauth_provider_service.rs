//! 소셜 프로필 조회 서비스
//!
//! 클라이언트가 프로바이더(Facebook, Google)에서 직접 받아 온 액세스 토큰으로
//! 프로필을 조회해 [`OAuthProfile`]로 변환합니다.
//!
//! ```text
//! POST /v1/auth/google { access_token }
//!   └─ HttpOAuthProfileProvider::fetch_profile(Google, token)
//!        └─ GET https://www.googleapis.com/oauth2/v3/userinfo (Bearer)
//!   └─ AuthService::oauth_login(profile)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::{
    config::{AuthProvider, OAuthEndpoints},
    core::errors::{AppError, AppResult},
    domain::dto::users::AuthResponse,
    domain::models::oauth::{FacebookProfile, GoogleUserInfo, OAuthProfile},
    services::auth::AuthService,
};

#[async_trait]
pub trait OAuthProfileProvider: Send + Sync {
    /// 프로바이더 액세스 토큰으로 프로필을 조회합니다
    ///
    /// # Errors
    ///
    /// * `AuthenticationError` - 프로바이더가 토큰을 거부했거나 프로필에 이메일이 없음
    /// * `ExternalServiceError` - 통신 실패, 5xx 응답, 응답 파싱 실패
    async fn fetch_profile(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthProfile>;
}

/// reqwest 기반 구현
pub struct HttpOAuthProfileProvider {
    client: reqwest::Client,
    facebook_url: String,
    google_url: String,
}

impl HttpOAuthProfileProvider {
    pub fn new(facebook_url: String, google_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            facebook_url,
            google_url,
        }
    }

    pub fn from_env() -> Self {
        Self::new(OAuthEndpoints::facebook_profile_url(), OAuthEndpoints::google_userinfo_url())
    }

    fn check_status(provider: AuthProvider, status: StatusCode) -> AppResult<()> {
        if status.is_success() {
            return Ok(());
        }

        log::warn!("{} 프로필 조회 거부: {}", provider.as_str(), status);
        if status.is_client_error() {
            Err(AppError::unauthorized())
        } else {
            Err(AppError::ExternalServiceError(format!(
                "{} 프로필 조회 실패: {}", provider.as_str(), status
            )))
        }
    }

    async fn facebook_profile(&self, access_token: &str) -> AppResult<OAuthProfile> {
        let response = self.client
            .get(&self.facebook_url)
            .query(&[("fields", "id,name,email,picture"), ("access_token", access_token)])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 프로필 요청 실패: {}", e)))?;

        Self::check_status(AuthProvider::Facebook, response.status())?;

        response
            .json::<FacebookProfile>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Facebook 프로필 파싱 실패: {}", e)))?
            .into_profile()
            .ok_or_else(AppError::unauthorized)
    }

    async fn google_profile(&self, access_token: &str) -> AppResult<OAuthProfile> {
        let response = self.client
            .get(&self.google_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 요청 실패: {}", e)))?;

        Self::check_status(AuthProvider::Google, response.status())?;

        response
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("Google 사용자 정보 파싱 실패: {}", e)))?
            .into_profile()
            .ok_or_else(AppError::unauthorized)
    }
}

#[async_trait]
impl OAuthProfileProvider for HttpOAuthProfileProvider {
    async fn fetch_profile(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthProfile> {
        match provider {
            AuthProvider::Facebook => self.facebook_profile(access_token).await,
            AuthProvider::Google => self.google_profile(access_token).await,
        }
    }
}

/// 소셜 로그인: 프로필 조회 후 [`AuthService::oauth_login`]으로 위임
pub struct SocialLoginService {
    profiles: Arc<dyn OAuthProfileProvider>,
    auth: Arc<AuthService>,
}

impl SocialLoginService {
    pub fn new(profiles: Arc<dyn OAuthProfileProvider>, auth: Arc<AuthService>) -> Self {
        Self { profiles, auth }
    }

    pub async fn login(&self, provider: AuthProvider, access_token: &str) -> AppResult<AuthResponse> {
        let profile = self.profiles.fetch_profile(provider, access_token).await?;
        log::debug!("{} 프로필 조회 성공: {}", provider.as_str(), profile.id);

        self.auth.oauth_login(profile).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_unauthorized() {
        let result = HttpOAuthProfileProvider::check_status(AuthProvider::Google, StatusCode::UNAUTHORIZED);

        match result {
            Err(AppError::AuthenticationError(msg)) => assert_eq!(msg, "Unauthorized"),
            other => panic!("Expected AuthenticationError, got {:?}", other),
        }
    }

    #[test]
    fn test_server_errors_are_external() {
        let result = HttpOAuthProfileProvider::check_status(AuthProvider::Facebook, StatusCode::BAD_GATEWAY);

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        assert!(HttpOAuthProfileProvider::check_status(AuthProvider::Facebook, StatusCode::OK).is_ok());
    }
}
