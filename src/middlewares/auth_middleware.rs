//! 인증 미들웨어
//!
//! 보호된 스코프에 적용되어 `Authorization: Bearer <token>`을 검증합니다.
//! 실패 응답은 [`AppError`](crate::core::errors::AppError)의 에러 본문 형식을 그대로 따릅니다.
//!
//! | 상황 | 응답 |
//! |------|------|
//! | 헤더 없음 / 서명 불일치 / 사용자 없음 | 401 `Unauthorized` |
//! | 토큰 만료 | 401 `jwt expired` |
//! | 필요한 역할 없음 | 403 `Forbidden` |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::entities::users::Role;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    required_role: Option<Role>,
}

impl AuthMiddleware {
    /// 로그인한 사용자면 통과
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 관리자만 통과
    pub fn admin() -> Self {
        Self::required_with_role(Role::Admin)
    }

    pub fn required_with_role(role: Role) -> Self {
        Self {
            required_role: Some(role),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_required_role() {
        assert_eq!(AuthMiddleware::required().required_role, None);
        assert_eq!(AuthMiddleware::admin().required_role, Some(Role::Admin));
        assert_eq!(AuthMiddleware::required_with_role(Role::User).required_role, Some(Role::User));
    }
}
