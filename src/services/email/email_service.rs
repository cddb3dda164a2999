//! 이메일 발송
//!
//! 비밀번호 재설정 링크와 비밀번호 변경 알림을 보냅니다.
//! SMTP가 설정되지 않은 환경에서는 메일 내용을 로그로만 남깁니다.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::EmailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};

/// 발송할 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

impl EmailMessage {
    pub fn password_reset(to: &str, product_name: &str, reset_url: &str) -> Self {
        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Reset your password</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">{product}</h1>
    <p>We received a request to reset your password. Click the button below to choose a new one:</p>
    <p style="text-align: center; margin: 30px 0;">
        <a href="{url}" style="background-color: #2196F3; color: white; padding: 14px 28px; text-decoration: none; border-radius: 4px; display: inline-block;">
            Reset Password
        </a>
    </p>
    <p>Or copy and paste this link into your browser:</p>
    <p style="word-break: break-all; color: #666;">{url}</p>
    <p style="color: #999; font-size: 12px; margin-top: 30px;">
        If you didn't request a password reset, you can safely ignore this email.
    </p>
</body>
</html>"#,
            product = product_name,
            url = reset_url,
        );

        Self {
            to: to.to_string(),
            subject: format!("Reset your password - {}", product_name),
            html_body,
        }
    }

    pub fn password_changed(to: &str, product_name: &str, name: Option<&str>) -> Self {
        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Your password was changed</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
    <h1 style="color: #333;">{product}</h1>
    <p>Hi {name},</p>
    <p>The password for your account was just changed.</p>
    <p style="color: #999; font-size: 12px; margin-top: 30px;">
        If you didn't make this change, reset your password right away.
    </p>
</body>
</html>"#,
            product = product_name,
            name = name.unwrap_or("there"),
        );

        Self {
            to: to.to_string(),
            subject: format!("Your password has been changed - {}", product_name),
            html_body,
        }
    }
}

#[async_trait]
pub trait EmailProvider: Send + Sync {
    async fn send(&self, message: EmailMessage) -> AppResult<()>;
}

/// STARTTLS SMTP 릴레이로 발송
pub struct SmtpEmailProvider {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailProvider {
    pub fn new(host: &str, port: u16, username: String, password: String, from: &str) -> AppResult<Self> {
        let credentials = Credentials::new(username, password);

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
            .map_err(|e| AppError::ExternalServiceError(format!("SMTP 설정 실패: {}", e)))?
            .port(port)
            .credentials(credentials)
            .build();

        let from = from
            .parse::<Mailbox>()
            .with_context(|| format!("잘못된 발신 주소 {}", from))?;

        Ok(Self { mailer, from })
    }
}

#[async_trait]
impl EmailProvider for SmtpEmailProvider {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::BadRequest(format!("잘못된 수신 주소 {}: {}", message.to, e)))?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject)
            .header(ContentType::TEXT_HTML)
            .body(message.html_body)
            .context("메일 생성 실패")?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        Ok(())
    }
}

/// 메일을 보내지 않고 로그로 남기는 구현 (개발/로컬용)
pub struct LogEmailProvider;

#[async_trait]
impl EmailProvider for LogEmailProvider {
    async fn send(&self, message: EmailMessage) -> AppResult<()> {
        log::info!("[MOCK EMAIL] to={} subject={}", message.to, message.subject);
        log::debug!("[MOCK EMAIL] body:\n{}", message.html_body);
        Ok(())
    }
}

/// 환경 변수에 따라 발송 구현을 선택합니다
///
/// `EMAIL_HOST`가 없거나 SMTP 설정에 실패하면 [`LogEmailProvider`]를 사용합니다.
pub fn email_provider_from_env() -> Arc<dyn EmailProvider> {
    let Some(host) = EmailConfig::host() else {
        log::info!("Email not configured. Using log email provider.");
        return Arc::new(LogEmailProvider);
    };

    match SmtpEmailProvider::new(
        &host,
        EmailConfig::port(),
        EmailConfig::username(),
        EmailConfig::password(),
        &EmailConfig::from_address(),
    ) {
        Ok(provider) => Arc::new(provider),
        Err(e) => {
            log::warn!("Failed to initialize SMTP email provider: {}. Using log provider.", e);
            Arc::new(LogEmailProvider)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_reset_message_contains_link() {
        let url = "https://your-app/new-password/view?resetToken=abc.123";
        let message = EmailMessage::password_reset("jon@snow.com", "Test App", url);

        assert_eq!(message.to, "jon@snow.com");
        assert!(message.subject.contains("Test App"));
        assert!(message.html_body.contains(url));
    }

    #[test]
    fn test_password_changed_message_greets_user() {
        let message = EmailMessage::password_changed("jon@snow.com", "Test App", Some("Jon"));
        assert!(message.html_body.contains("Hi Jon,"));

        let anonymous = EmailMessage::password_changed("jon@snow.com", "Test App", None);
        assert!(anonymous.html_body.contains("Hi there,"));
    }

    #[actix_web::test]
    async fn test_log_provider_never_fails() {
        let provider = LogEmailProvider;
        let message = EmailMessage::password_changed("jon@snow.com", "Test App", None);

        assert!(provider.send(message).await.is_ok());
    }
}
