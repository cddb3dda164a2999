use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;

use user_auth_backend::config::{AuthProvider, AuthSettings};
use user_auth_backend::core::errors::{AppError, AppResult};
use user_auth_backend::core::registry::ServiceLocator;
use user_auth_backend::domain::entities::users::{Role, User};
use user_auth_backend::domain::models::oauth::OAuthProfile;
use user_auth_backend::repositories::memory::{
    InMemoryPasswordResetTokenRepository, InMemoryRefreshTokenRepository, InMemoryUserRepository,
};
use user_auth_backend::repositories::users::UserRepository;
use user_auth_backend::repositories::Repositories;
use user_auth_backend::services::auth::{OAuthProfileProvider, TokenService};
use user_auth_backend::services::email::{EmailMessage, EmailProvider};
use user_auth_backend::services::register_services;
use user_auth_backend::utils::password_utils::hash_password;

pub const TEST_SECRET: &str = "integration-test-secret";

/// 보낸 메일을 모아 두는 발송기
#[derive(Default)]
pub struct RecordingEmailProvider {
    pub sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailProvider {
    #[allow(dead_code)]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// 마지막 재설정 메일의 링크에서 토큰을 꺼냅니다
    #[allow(dead_code)]
    pub fn last_reset_token(&self) -> Option<String> {
        let sent = self.sent.lock().unwrap();
        let body = &sent.iter().rev().find(|m| m.html_body.contains("resetToken="))?.html_body;

        let start = body.find("resetToken=")? + "resetToken=".len();
        Some(
            body[start..]
                .chars()
                .take_while(|c| c.is_ascii_hexdigit() || *c == '.')
                .collect(),
        )
    }
}

#[async_trait]
impl EmailProvider for RecordingEmailProvider {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }
}

/// 미리 등록한 액세스 토큰에만 프로필을 돌려주는 프로바이더
#[derive(Default)]
pub struct FakeOAuthProvider {
    profiles: Mutex<HashMap<String, OAuthProfile>>,
}

impl FakeOAuthProvider {
    #[allow(dead_code)]
    pub fn register(&self, access_token: &str, profile: OAuthProfile) {
        self.profiles.lock().unwrap().insert(access_token.to_string(), profile);
    }
}

#[async_trait]
impl OAuthProfileProvider for FakeOAuthProvider {
    async fn fetch_profile(&self, provider: AuthProvider, access_token: &str) -> AppResult<OAuthProfile> {
        self.profiles
            .lock()
            .unwrap()
            .get(access_token)
            .filter(|profile| profile.service == provider)
            .cloned()
            .ok_or_else(AppError::unauthorized)
    }
}

#[allow(dead_code)]
pub struct TestContext {
    pub locator: Arc<ServiceLocator>,
    pub users: Arc<InMemoryUserRepository>,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub reset_tokens: Arc<InMemoryPasswordResetTokenRepository>,
    pub emails: Arc<RecordingEmailProvider>,
    pub oauth: Arc<FakeOAuthProvider>,
    pub settings: AuthSettings,
}

impl TestContext {
    pub fn new() -> TestContext {
        let settings = AuthSettings {
            jwt_secret: TEST_SECRET.to_string(),
            bcrypt_cost: 4,
            ..AuthSettings::default()
        };

        let locator = Arc::new(ServiceLocator::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let reset_tokens = Arc::new(InMemoryPasswordResetTokenRepository::new());
        let emails = Arc::new(RecordingEmailProvider::default());
        let oauth = Arc::new(FakeOAuthProvider::default());

        let repositories = Repositories::in_memory(
            users.clone(),
            refresh_tokens.clone(),
            reset_tokens.clone(),
            &locator,
        );
        register_services(&locator, repositories, emails.clone(), oauth.clone(), settings.clone());

        TestContext {
            locator,
            users,
            refresh_tokens,
            reset_tokens,
            emails,
            oauth,
            settings,
        }
    }

    pub fn create_app(&self) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::from(Arc::clone(&self.locator)))
            .configure(user_auth_backend::routes::configure_all_routes)
    }

    /// 사용자를 저장소에 직접 만들고 (id, 액세스 토큰)을 돌려줍니다
    #[allow(dead_code)]
    pub async fn create_user(&self, email: &str, password: &str, role: Role) -> (String, String) {
        let hash = hash_password(password, 4).expect("Failed to hash password");
        let user = self
            .users
            .create(User::new_local(email, hash, Some("Test User".to_string()), role))
            .await
            .expect("Failed to create user");

        let token = self.access_token_for(&user);
        (user.id_string().unwrap(), token)
    }

    #[allow(dead_code)]
    pub async fn create_admin(&self) -> (String, String) {
        self.create_user("admin@test.com", "admin-password", Role::Admin).await
    }

    #[allow(dead_code)]
    pub fn access_token_for(&self, user: &User) -> String {
        let token_service = TokenService::new(TEST_SECRET, self.settings.access_token_minutes);
        token_service.generate_access_token(user).expect("Failed to sign token").0
    }

    /// 이미 만료된 액세스 토큰
    #[allow(dead_code)]
    pub fn expired_access_token_for(&self, user: &User) -> String {
        let token_service = TokenService::new(TEST_SECRET, -5);
        token_service.generate_access_token(user).expect("Failed to sign token").0
    }
}

#[allow(dead_code)]
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
