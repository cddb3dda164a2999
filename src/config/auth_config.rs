//! # Authentication Configuration Module
//!
//! JWT 액세스 토큰, 리프레시/재설정 토큰, 이메일 발송, OAuth 프로필 조회 등
//! 인증 관련 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ### JWT / 토큰
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_MINUTES="15"
//! export REFRESH_TOKEN_EXPIRATION_DAYS="30"
//! export PASSWORD_RESET_EXPIRATION_HOURS="2"
//! ```
//!
//! ### 이메일 (SMTP)
//! ```bash
//! export EMAIL_HOST="smtp.example.com"
//! export EMAIL_PORT="587"
//! export EMAIL_USERNAME="mailer"
//! export EMAIL_PASSWORD="secret"
//! export EMAIL_FROM="support@your-app.com"
//! export APP_URL="https://your-app"
//! export PRODUCT_NAME="Test App"
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use crate::config::{AuthSettings, AuthProvider};
//!
//! let settings = AuthSettings::from_env();
//! let provider = AuthProvider::from_str("facebook")?;
//! ```

use std::env;

use serde::{Deserialize, Serialize};

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// JSON Web Token (JWT) 관련 설정
///
/// 액세스 토큰은 HS256으로 서명되며 `{sub, iat, exp}` 클레임만 담습니다.
pub struct JwtConfig;

impl JwtConfig {
    /// JWT 서명에 사용할 비밀키를 반환합니다.
    ///
    /// 환경 변수가 설정되지 않은 경우 기본 키를 사용하며 경고 로그를 남깁니다.
    ///
    /// # 키 생성 예제
    ///
    /// ```bash
    /// openssl rand -base64 32
    /// ```
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// 액세스 토큰 만료 시간(분). 기본값 15분
    pub fn expiration_minutes() -> i64 {
        env_i64("JWT_EXPIRATION_MINUTES", 15)
    }

    /// 리프레시 토큰 만료 기간(일). 기본값 30일
    pub fn refresh_expiration_days() -> i64 {
        env_i64("REFRESH_TOKEN_EXPIRATION_DAYS", 30)
    }
}

/// 비밀번호 재설정 토큰 설정
pub struct ResetConfig;

impl ResetConfig {
    /// 재설정 토큰 만료 시간(시간). 기본값 2시간
    pub fn expiration_hours() -> i64 {
        env_i64("PASSWORD_RESET_EXPIRATION_HOURS", 2)
    }
}

/// SMTP 발송 및 메일 본문에 들어가는 설정
pub struct EmailConfig;

impl EmailConfig {
    /// SMTP 호스트. 설정되지 않으면 메일은 로그로만 남습니다.
    pub fn host() -> Option<String> {
        env::var("EMAIL_HOST").ok().filter(|host| !host.trim().is_empty())
    }

    /// SMTP 포트. 기본값 25
    pub fn port() -> u16 {
        env::var("EMAIL_PORT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(25)
    }

    pub fn username() -> String {
        env::var("EMAIL_USERNAME").unwrap_or_default()
    }

    /// SMTP 비밀번호. 로그에 출력하지 마세요.
    pub fn password() -> String {
        env::var("EMAIL_PASSWORD").unwrap_or_default()
    }

    pub fn from_address() -> String {
        env::var("EMAIL_FROM").unwrap_or_else(|_| "support@your-app.com".to_string())
    }

    /// 재설정 링크의 기준 URL
    pub fn app_url() -> String {
        env::var("APP_URL")
            .unwrap_or_else(|_| "https://your-app".to_string())
            .trim_end_matches('/')
            .to_string()
    }

    pub fn product_name() -> String {
        env::var("PRODUCT_NAME").unwrap_or_else(|_| "Test App".to_string())
    }
}

/// OAuth 프로필 조회 엔드포인트
pub struct OAuthEndpoints;

impl OAuthEndpoints {
    /// Facebook Graph API 프로필 엔드포인트
    pub fn facebook_profile_url() -> String {
        env::var("FACEBOOK_PROFILE_URL")
            .unwrap_or_else(|_| "https://graph.facebook.com/me".to_string())
    }

    /// Google userinfo 엔드포인트
    pub fn google_userinfo_url() -> String {
        env::var("GOOGLE_USERINFO_URL")
            .unwrap_or_else(|_| "https://www.googleapis.com/oauth2/v3/userinfo".to_string())
    }
}

/// 서비스 계층에 전달되는 인증 설정 스냅샷
///
/// 환경 변수를 요청마다 읽지 않도록 기동 시 한 번 만들어 서비스에 주입합니다.
/// 테스트에서는 필드를 직접 채워 사용합니다.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub jwt_secret: String,
    pub access_token_minutes: i64,
    pub refresh_token_days: i64,
    pub reset_token_hours: i64,
    pub bcrypt_cost: u32,
    pub app_url: String,
    pub product_name: String,
}

impl AuthSettings {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: JwtConfig::secret(),
            access_token_minutes: JwtConfig::expiration_minutes(),
            refresh_token_days: JwtConfig::refresh_expiration_days(),
            reset_token_hours: ResetConfig::expiration_hours(),
            bcrypt_cost: super::PasswordConfig::bcrypt_cost(),
            app_url: EmailConfig::app_url(),
            product_name: EmailConfig::product_name(),
        }
    }

    /// 비밀번호 재설정 화면 링크
    pub fn password_reset_url(&self, reset_token: &str) -> String {
        format!("{}/new-password/view?resetToken={}", self.app_url, reset_token)
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            jwt_secret: "your-secret-key".to_string(),
            access_token_minutes: 15,
            refresh_token_days: 30,
            reset_token_hours: 2,
            bcrypt_cost: 12,
            app_url: "https://your-app".to_string(),
            product_name: "Test App".to_string(),
        }
    }
}

/// 소셜 로그인 프로바이더
///
/// 사용자 문서의 `services.<provider>` 필드 이름으로도 사용됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Facebook Graph API 액세스 토큰
    Facebook,
    /// Google OAuth 2.0 액세스 토큰
    Google,
}

impl AuthProvider {
    /// 문자열에서 AuthProvider를 생성합니다 (대소문자 무관).
    ///
    /// # 예제
    ///
    /// ```rust,ignore
    /// let provider = AuthProvider::from_str("google")?;
    /// assert_eq!(provider, AuthProvider::Google);
    /// ```
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(AuthProvider::Facebook),
            "google" => Ok(AuthProvider::Google),
            _ => Err(format!("Unsupported auth provider: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuthProvider::Facebook => "facebook",
            AuthProvider::Google => "google",
        }
    }
}
