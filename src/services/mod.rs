//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 리포지토리 trait 객체에만 의존하며, 기동 시
//! [`register_services`]가 [`ServiceLocator`]에 한 번 등록합니다.
//!
//! # Features
//!
//! - 회원가입, 로그인, 리프레시 토큰 재발급
//! - Facebook/Google 소셜 로그인
//! - 비밀번호 재설정 메일
//! - 사용자 CRUD
//!
//! # Examples
//!
//! ```rust,ignore
//! let locator = ServiceLocator::new();
//! let repositories = Repositories::mongo(db, &locator);
//! register_services(&locator, repositories, email_provider_from_env(),
//!     Arc::new(HttpOAuthProfileProvider::from_env()), AuthSettings::from_env());
//! ```

pub mod users;
pub mod auth;
pub mod email;

use std::sync::Arc;

use crate::{
    config::AuthSettings,
    core::registry::ServiceLocator,
    repositories::Repositories,
};
use auth::{AuthService, OAuthProfileProvider, PasswordResetService, SocialLoginService, TokenService};
use email::EmailProvider;
use users::UserService;

/// 모든 서비스를 만들어 레지스트리에 등록합니다
pub fn register_services(
    locator: &ServiceLocator,
    repositories: Repositories,
    email: Arc<dyn EmailProvider>,
    oauth: Arc<dyn OAuthProfileProvider>,
    settings: AuthSettings,
) {
    let token_service = Arc::new(TokenService::new(&settings.jwt_secret, settings.access_token_minutes));

    let auth_service = Arc::new(AuthService::new(
        repositories.users.clone(),
        repositories.refresh_tokens.clone(),
        token_service.clone(),
        settings.clone(),
    ));

    let password_reset_service = Arc::new(PasswordResetService::new(
        repositories.users.clone(),
        repositories.reset_tokens.clone(),
        email,
        settings.clone(),
    ));

    let user_service = Arc::new(UserService::new(
        repositories.users.clone(),
        repositories.refresh_tokens.clone(),
        settings.bcrypt_cost,
    ));

    let social_login_service = Arc::new(SocialLoginService::new(oauth, auth_service.clone()));

    locator.set(token_service);
    locator.set(auth_service);
    locator.set(password_reset_service);
    locator.set(user_service);
    locator.set(social_login_service);
    // 미들웨어가 토큰의 사용자를 조회할 때 사용
    locator.set(Arc::new(repositories));
}
