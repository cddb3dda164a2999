//! JWT 토큰 관리 서비스 구현
//!
//! HS256 서명 액세스 토큰의 생성과 검증을 담당합니다.
//! 리프레시 토큰은 JWT가 아닌 불투명 문자열이며 [`AuthService`](super::AuthService)가 관리합니다.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    core::errors::{AppError, AppResult, ErrorContext},
    domain::entities::users::User,
    domain::models::token::TokenClaims,
};

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, access_token_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_token_ttl: Duration::minutes(access_token_minutes),
        }
    }

    /// 사용자에 대한 액세스 토큰과 만료 시각을 생성합니다
    ///
    /// # Errors
    ///
    /// 저장되지 않은(`_id`가 없는) 사용자면 `InternalError`
    pub fn generate_access_token(&self, user: &User) -> AppResult<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + self.access_token_ttl;

        let claims = TokenClaims {
            sub: user.id_string().ok_or_else(|| {
                AppError::InternalError("사용자 ID가 없습니다".to_string())
            })?,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")?;

        Ok((token, expires_at))
    }

    /// 토큰 서명과 만료를 검증하고 클레임을 반환합니다
    ///
    /// 만료된 토큰은 "jwt expired", 그 밖의 실패는 "Unauthorized"입니다.
    pub fn verify_token(&self, token: &str) -> AppResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::AuthenticationError("jwt expired".to_string()),
                _ => AppError::unauthorized(),
            })
    }

    /// `Authorization` 헤더 값에서 Bearer 토큰을 꺼냅니다
    pub fn extract_bearer_token<'a>(&self, auth_header: &'a str) -> AppResult<&'a str> {
        auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(AppError::unauthorized)
    }
}
