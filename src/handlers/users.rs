//! 사용자 관리 엔드포인트 (`/v1/users`)
//!
//! 목록 조회와 생성은 관리자 전용이고, 개별 사용자 조회/수정/삭제는
//! 본인 또는 관리자만 가능합니다. 인증은 각 라우트의 `wrap`에서 처리합니다.

use actix_web::{delete, get, patch, post, put, web, HttpResponse};

use crate::{
    core::errors::{AppError, FieldLocation, ValidateExt},
    core::registry::ServiceLocator,
    domain::dto::users::{CreateUserRequest, ListUsersQuery, ReplaceUserRequest, UpdateUserRequest},
    domain::models::auth::AuthenticatedUser,
    middlewares::AuthMiddleware,
    services::users::UserService,
};

/// 본인 또는 관리자인지 확인합니다
fn ensure_access(current: &AuthenticatedUser, user_id: &str) -> Result<(), AppError> {
    if current.can_access(user_id) {
        Ok(())
    } else {
        log::warn!("사용자 {}가 다른 사용자 {}에 접근 시도", current.user_id, user_id);
        Err(AppError::forbidden())
    }
}

#[get("", wrap = "AuthMiddleware::admin()")]
pub async fn list_users(
    locator: web::Data<ServiceLocator>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    query.validate_at(FieldLocation::Query)?;

    let service = locator.get::<UserService>()?;
    let users = service.list(&query).await?;

    Ok(HttpResponse::Ok().json(users))
}

#[post("", wrap = "AuthMiddleware::admin()")]
pub async fn create_user(
    locator: web::Data<ServiceLocator>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate_at(FieldLocation::Body)?;

    let service = locator.get::<UserService>()?;
    let user = service.create(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(user))
}

#[get("/profile", wrap = "AuthMiddleware::required()")]
pub async fn get_profile(
    locator: web::Data<ServiceLocator>,
    current: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let service = locator.get::<UserService>()?;
    let user = service.profile(&current).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[get("/{user_id}", wrap = "AuthMiddleware::required()")]
pub async fn get_user(
    locator: web::Data<ServiceLocator>,
    current: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ensure_access(&current, &user_id)?;

    let service = locator.get::<UserService>()?;
    let user = service.get(&user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

#[put("/{user_id}", wrap = "AuthMiddleware::required()")]
pub async fn replace_user(
    locator: web::Data<ServiceLocator>,
    current: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<ReplaceUserRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_access(&current, &user_id)?;
    payload.validate_at(FieldLocation::Body)?;

    let service = locator.get::<UserService>()?;
    let user = service
        .replace(&user_id, payload.into_inner(), current.is_admin())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

#[patch("/{user_id}", wrap = "AuthMiddleware::required()")]
pub async fn update_user(
    locator: web::Data<ServiceLocator>,
    current: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    ensure_access(&current, &user_id)?;
    payload.validate_at(FieldLocation::Body)?;

    let service = locator.get::<UserService>()?;
    let user = service
        .update(&user_id, payload.into_inner(), current.is_admin())
        .await?;

    Ok(HttpResponse::Ok().json(user))
}

#[delete("/{user_id}", wrap = "AuthMiddleware::required()")]
pub async fn delete_user(
    locator: web::Data<ServiceLocator>,
    current: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    ensure_access(&current, &user_id)?;

    let service = locator.get::<UserService>()?;
    service.remove(&user_id).await?;

    Ok(HttpResponse::NoContent().finish())
}
