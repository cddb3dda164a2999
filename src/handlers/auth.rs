//! 인증 엔드포인트 (`/v1/auth`)
//!
//! 모든 요청 본문은 서비스 호출 전에 `validate_at(FieldLocation::Body)`로 검증되며,
//! 실패 시 400 `Validation Error`와 필드별 메시지를 반환합니다.

use actix_web::{post, web, HttpResponse};

use crate::{
    config::AuthProvider,
    core::errors::{AppError, FieldLocation, ValidateExt},
    core::registry::ServiceLocator,
    domain::dto::{
        tokens::{RefreshTokenRequest, ResetPasswordRequest, SendPasswordResetRequest},
        users::{LoginRequest, OAuthRequest, RegisterRequest},
    },
    services::auth::{AuthService, PasswordResetService, SocialLoginService},
};

#[post("/register")]
pub async fn register(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;
    let RegisterRequest { email, password, name } = payload.into_inner();

    let auth_service = locator.get::<AuthService>()?;
    let response = auth_service
        .register(&email.unwrap_or_default(), &password.unwrap_or_default(), name)
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[post("/login")]
pub async fn login(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;
    let LoginRequest { email, password } = payload.into_inner();

    let auth_service = locator.get::<AuthService>()?;
    let response = auth_service
        .login(&email.unwrap_or_default(), &password.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/facebook")]
pub async fn facebook_login(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<OAuthRequest>,
) -> Result<HttpResponse, AppError> {
    oauth_login(&locator, AuthProvider::Facebook, payload.into_inner()).await
}

#[post("/google")]
pub async fn google_login(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<OAuthRequest>,
) -> Result<HttpResponse, AppError> {
    oauth_login(&locator, AuthProvider::Google, payload.into_inner()).await
}

async fn oauth_login(
    locator: &ServiceLocator,
    provider: AuthProvider,
    payload: OAuthRequest,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;

    let social_login = locator.get::<SocialLoginService>()?;
    let response = social_login
        .login(provider, &payload.access_token.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

#[post("/refresh-token")]
pub async fn refresh_token(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;
    let RefreshTokenRequest { email, refresh_token } = payload.into_inner();

    let auth_service = locator.get::<AuthService>()?;
    let token = auth_service
        .refresh(&email.unwrap_or_default(), &refresh_token.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json(token))
}

#[post("/send-password-reset")]
pub async fn send_password_reset(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<SendPasswordResetRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;

    let reset_service = locator.get::<PasswordResetService>()?;
    reset_service
        .request_reset(&payload.into_inner().email.unwrap_or_default())
        .await?;

    Ok(HttpResponse::Ok().json("success"))
}

#[post("/reset-password")]
pub async fn reset_password(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;
    let ResetPasswordRequest { email, password, reset_token } = payload.into_inner();

    let reset_service = locator.get::<PasswordResetService>()?;
    reset_service
        .reset_password(
            &email.unwrap_or_default(),
            &password.unwrap_or_default(),
            &reset_token.unwrap_or_default(),
        )
        .await?;

    Ok(HttpResponse::Ok().json("Password Updated"))
}
