use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::entities::users::Role;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::{users::UserRepository, Repositories};
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub required_role: Option<Role>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let required_role = self.required_role;

        Box::pin(async move {
            let user = match authenticate(&req).await {
                Ok(user) => user,
                Err(err) => {
                    log::warn!("인증 실패 {} {}: {}", req.method(), req.path(), err);
                    return Ok(reject(req, err));
                }
            };

            // 역할 검증
            if let Some(role) = required_role {
                if user.role != role {
                    log::warn!("권한 부족: 사용자 ID {} ({}), 필요 권한: {}",
                        user.user_id, user.role.as_str(), role.as_str());
                    return Ok(reject(req, AppError::forbidden()));
                }
            }

            log::debug!("인증 성공: 사용자 ID {}", user.user_id);
            req.extensions_mut().insert(user);

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, err: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = err.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// 액세스 토큰을 검증하고 토큰 주인을 조회합니다
async fn authenticate(req: &ServiceRequest) -> AppResult<AuthenticatedUser> {
    let locator = req
        .app_data::<web::Data<ServiceLocator>>()
        .ok_or_else(|| AppError::InternalError("ServiceLocator가 등록되지 않았습니다".to_string()))?;
    let token_service = locator.get::<TokenService>()?;
    let repositories = locator.get::<Repositories>()?;

    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::unauthorized)?;

    let token = token_service.extract_bearer_token(auth_header)?;
    let claims = token_service.verify_token(token)?;

    let user_id = ObjectId::parse_str(&claims.sub).map_err(|_| AppError::unauthorized())?;
    let user = repositories
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(AppError::unauthorized)?;

    AuthenticatedUser::from_user(&user).ok_or_else(AppError::unauthorized)
}
