//! 비밀번호 재설정 서비스
//!
//! 재설정 토큰은 `issued → consumed | expired` 중 한 번만 전이합니다.
//! 메일 발송 실패는 로그로만 남기고 요청 결과에는 영향을 주지 않습니다.

use std::sync::Arc;

use chrono::Duration;

use crate::{
    config::AuthSettings,
    core::errors::{AppError, AppResult, AuthError},
    domain::entities::{tokens::PasswordResetToken, users::User},
    repositories::{tokens::PasswordResetTokenRepository, users::UserRepository},
    services::email::{EmailMessage, EmailProvider},
    utils::{password_utils::hash_password, string_utils::normalize_email},
};

pub struct PasswordResetService {
    users: Arc<dyn UserRepository>,
    reset_tokens: Arc<dyn PasswordResetTokenRepository>,
    email: Arc<dyn EmailProvider>,
    settings: AuthSettings,
}

impl PasswordResetService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        reset_tokens: Arc<dyn PasswordResetTokenRepository>,
        email: Arc<dyn EmailProvider>,
        settings: AuthSettings,
    ) -> Self {
        Self {
            users,
            reset_tokens,
            email,
            settings,
        }
    }

    /// 재설정 토큰을 만들고 링크를 메일로 보냅니다
    ///
    /// # Errors
    ///
    /// * `Auth(NoAccountFound)` - 해당 이메일의 사용자가 없음
    pub async fn request_reset(&self, email: &str) -> AppResult<()> {
        let email = normalize_email(email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::NoAccountFound)?;
        let user_id = Self::saved_id(&user)?;

        let token = PasswordResetToken::generate(
            user_id,
            &user.email,
            Duration::hours(self.settings.reset_token_hours),
        );
        let token = self.reset_tokens.create(token).await?;

        let reset_url = self.settings.password_reset_url(&token.reset_token);
        let message = EmailMessage::password_reset(&user.email, &self.settings.product_name, &reset_url);
        self.deliver(message).await;

        log::info!("비밀번호 재설정 토큰 발급: {}", user.email);
        Ok(())
    }

    /// 재설정 토큰을 소비하고 비밀번호를 바꿉니다
    ///
    /// # Errors
    ///
    /// * `Auth(TokenMismatch)` - 일치하는 토큰 없음 (이미 사용된 토큰 포함)
    /// * `Auth(TokenExpired)` - 토큰 만료
    pub async fn reset_password(&self, email: &str, password: &str, reset_token: &str) -> AppResult<()> {
        let email = normalize_email(email);

        let token = self
            .reset_tokens
            .consume(&email, reset_token)
            .await?
            .ok_or(AuthError::TokenMismatch)?;

        if token.is_expired() {
            log::info!("만료된 재설정 토큰 사용: {}", email);
            return Err(AuthError::TokenExpired.into());
        }

        let mut user = self
            .users
            .find_by_id(&token.user_id)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        user.password = hash_password(password, self.settings.bcrypt_cost)?;
        user.touch();

        let user = self
            .users
            .replace(user)
            .await?
            .ok_or_else(AppError::user_not_found)?;

        let message = EmailMessage::password_changed(&user.email, &self.settings.product_name, user.name.as_deref());
        self.deliver(message).await;

        log::info!("비밀번호 변경 완료: {}", user.email);
        Ok(())
    }

    async fn deliver(&self, message: EmailMessage) {
        let to = message.to.clone();
        if let Err(e) = self.email.send(message).await {
            log::error!("메일 발송 실패 ({}): {}", to, e);
        }
    }

    fn saved_id(user: &User) -> AppResult<mongodb::bson::oid::ObjectId> {
        user.id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::Role;
    use crate::repositories::memory::{InMemoryPasswordResetTokenRepository, InMemoryUserRepository};
    use crate::utils::password_utils::verify_password;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingEmail {
        sent: Mutex<Vec<EmailMessage>>,
        fail: bool,
    }

    #[async_trait]
    impl EmailProvider for RecordingEmail {
        async fn send(&self, message: EmailMessage) -> AppResult<()> {
            self.sent.lock().unwrap().push(message);
            if self.fail {
                return Err(AppError::ExternalServiceError("smtp down".to_string()));
            }
            Ok(())
        }
    }

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        reset_tokens: Arc<InMemoryPasswordResetTokenRepository>,
        email: Arc<RecordingEmail>,
        service: PasswordResetService,
    }

    async fn fixture(fail_email: bool) -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let reset_tokens = Arc::new(InMemoryPasswordResetTokenRepository::new());
        let email = Arc::new(RecordingEmail { fail: fail_email, ..Default::default() });
        let settings = AuthSettings {
            bcrypt_cost: 4,
            ..AuthSettings::default()
        };

        let hash = hash_password("123456", 4).unwrap();
        users
            .create(User::new_local("arya@stark.com", hash, Some("Arya".to_string()), Role::User))
            .await
            .unwrap();

        let service = PasswordResetService::new(users.clone(), reset_tokens.clone(), email.clone(), settings);

        Fixture {
            users,
            reset_tokens,
            email,
            service,
        }
    }

    fn token_from_link(message: &EmailMessage) -> String {
        let start = message.html_body.find("resetToken=").unwrap() + "resetToken=".len();
        message.html_body[start..]
            .chars()
            .take_while(|c| c.is_ascii_hexdigit() || *c == '.')
            .collect()
    }

    #[actix_web::test]
    async fn test_unknown_email_has_no_account() {
        let f = fixture(false).await;

        let result = f.service.request_reset("nobody@stark.com").await;

        assert!(matches!(result, Err(AppError::Auth(AuthError::NoAccountFound))));
        assert!(f.email.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_reset_flow_is_single_use() {
        let f = fixture(false).await;
        f.service.request_reset("Arya@Stark.com").await.unwrap();

        let token = token_from_link(&f.email.sent.lock().unwrap()[0]);
        f.service.reset_password("arya@stark.com", "winterfell", &token).await.unwrap();

        let user = f.users.find_by_email("arya@stark.com").await.unwrap().unwrap();
        assert!(verify_password("winterfell", &user.password));
        assert_eq!(f.email.sent.lock().unwrap().len(), 2);

        let again = f.service.reset_password("arya@stark.com", "another1", &token).await;
        assert!(matches!(again, Err(AppError::Auth(AuthError::TokenMismatch))));
    }

    #[actix_web::test]
    async fn test_expired_reset_token() {
        let f = fixture(false).await;
        let user = f.users.find_by_email("arya@stark.com").await.unwrap().unwrap();

        let expired = PasswordResetToken::generate(user.id.unwrap(), "arya@stark.com", Duration::minutes(-1));
        let expired = f.reset_tokens.create(expired).await.unwrap();

        let result = f.service.reset_password("arya@stark.com", "winterfell", &expired.reset_token).await;
        assert!(matches!(result, Err(AppError::Auth(AuthError::TokenExpired))));
    }

    #[actix_web::test]
    async fn test_email_failure_is_not_surfaced() {
        let f = fixture(true).await;

        assert!(f.service.request_reset("arya@stark.com").await.is_ok());
        assert_eq!(f.email.sent.lock().unwrap().len(), 1);
    }
}
