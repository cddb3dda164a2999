//! # 자격 증명 서비스
//!
//! 로컬 회원가입/로그인, 리프레시 토큰 재발급, 소셜 로그인을 처리하고
//! 성공 시 액세스 토큰(JWT)과 리프레시 토큰 쌍을 발급합니다.
//!
//! ## 토큰 발급 흐름
//!
//! ```text
//! register / login / oauth_login
//!         │
//!         ▼
//! ┌──────────────────────────┐     ┌───────────────────────────┐
//! │ TokenService             │     │ RefreshTokenRepository    │
//! │ generate_access_token()  │     │ create(RefreshToken)      │
//! │  └─ HS256 {sub,iat,exp}  │     │  └─ "<userId>.<80 hex>"   │
//! └──────────────────────────┘     └───────────────────────────┘
//!         │                                  │
//!         └──────────────┬───────────────────┘
//!                        ▼
//!        { tokenType, accessToken, refreshToken, expiresIn }
//! ```
//!
//! ## 리프레시 토큰 회전
//!
//! 리프레시 토큰은 `find_one_and_delete`로 한 번에 조회/삭제됩니다.
//! 만료 여부와 관계없이 사용된 토큰은 다시 쓸 수 없고, 성공하면 새 토큰이 발급됩니다.

use std::sync::Arc;

use chrono::Duration;

use crate::{
    config::AuthSettings,
    core::errors::{AppError, AppResult, AuthError},
    domain::{
        dto::{tokens::TokenResponse, users::AuthResponse},
        entities::{tokens::RefreshToken, users::{Role, User}},
        models::oauth::OAuthProfile,
    },
    repositories::{tokens::RefreshTokenRepository, users::UserRepository},
    services::auth::TokenService,
    utils::{
        password_utils::{hash_password, verify_password},
        string_utils::normalize_email,
    },
};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    token_service: Arc<TokenService>,
    settings: AuthSettings,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        token_service: Arc<TokenService>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            token_service,
            settings,
        }
    }

    /// 로컬 계정 회원가입
    ///
    /// # Errors
    ///
    /// * `Auth(EmailAlreadyExists)` - 이미 사용 중인 이메일
    pub async fn register(&self, email: &str, password: &str, name: Option<String>) -> AppResult<AuthResponse> {
        let password_hash = hash_password(password, self.settings.bcrypt_cost)?;
        let user = User::new_local(email, password_hash, name, Role::User);

        let user = self.users.create(user).await?;
        log::info!("신규 사용자 가입: {}", user.email);

        self.auth_response(user).await
    }

    /// 이메일/비밀번호 로그인
    ///
    /// 사용자가 없거나 비밀번호가 틀리면 같은 에러를 반환합니다.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthResponse> {
        let email = normalize_email(email);

        let user = match self.users.find_by_email(&email).await? {
            Some(user) if verify_password(password, &user.password) => user,
            _ => {
                log::warn!("로그인 실패: {}", email);
                return Err(AuthError::IncorrectCredentials.into());
            }
        };

        self.auth_response(user).await
    }

    /// 리프레시 토큰으로 새 토큰 쌍을 발급합니다
    ///
    /// # Errors
    ///
    /// * `Auth(IncorrectRefreshCredentials)` - 일치하는 토큰 없음
    /// * `Auth(InvalidRefreshToken)` - 토큰 만료 (토큰은 이미 삭제됨)
    pub async fn refresh(&self, email: &str, refresh_token: &str) -> AppResult<TokenResponse> {
        let email = normalize_email(email);

        let stored = self
            .refresh_tokens
            .consume(&email, refresh_token)
            .await?
            .ok_or(AuthError::IncorrectRefreshCredentials)?;

        if stored.is_expired() {
            log::info!("만료된 리프레시 토큰 사용: {}", email);
            return Err(AuthError::InvalidRefreshToken.into());
        }

        let user = self
            .users
            .find_by_id(&stored.user_id)
            .await?
            .ok_or(AuthError::IncorrectRefreshCredentials)?;

        self.issue_tokens(&user).await
    }

    /// 소셜 프로필로 로그인하거나 계정을 만듭니다
    ///
    /// 프로바이더 ID 또는 이메일이 일치하는 사용자가 있으면 프로바이더를 연결하고,
    /// 없으면 임의의 비밀번호로 새 사용자를 생성합니다.
    pub async fn oauth_login(&self, mut profile: OAuthProfile) -> AppResult<AuthResponse> {
        profile.email = normalize_email(&profile.email);

        let existing = self
            .users
            .find_by_oauth(profile.service, &profile.id, &profile.email)
            .await?;

        let user = match existing {
            Some(mut user) => {
                user.link_oauth_profile(&profile);
                self.users
                    .replace(user)
                    .await?
                    .ok_or_else(AppError::user_not_found)?
            }
            None => {
                let random_password = uuid::Uuid::new_v4().to_string();
                let password_hash = hash_password(&random_password, self.settings.bcrypt_cost)?;

                let user = self.users.create(User::new_oauth(&profile, password_hash)).await?;
                log::info!("{} 소셜 계정으로 신규 사용자 생성: {}", profile.service.as_str(), user.email);
                user
            }
        };

        self.auth_response(user).await
    }

    async fn auth_response(&self, user: User) -> AppResult<AuthResponse> {
        let token = self.issue_tokens(&user).await?;
        Ok(AuthResponse::new(user, token))
    }

    async fn issue_tokens(&self, user: &User) -> AppResult<TokenResponse> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        let (access_token, expires_at) = self.token_service.generate_access_token(user)?;

        let refresh_token = RefreshToken::generate(
            user_id,
            &user.email,
            Duration::days(self.settings.refresh_token_days),
        );
        let refresh_token = self.refresh_tokens.create(refresh_token).await?;

        Ok(TokenResponse::bearer(access_token, refresh_token.token, expires_at))
    }
}
