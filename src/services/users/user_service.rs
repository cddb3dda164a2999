//! # 사용자 관리 서비스 구현
//!
//! 관리자와 본인이 사용하는 사용자 CRUD 비즈니스 로직입니다.
//! 권한 판단(관리자 전용, 본인 또는 관리자)은 미들웨어와 핸들러가 먼저 수행하고,
//! 서비스는 `caller_is_admin` 플래그로 역할 변경 허용 여부만 결정합니다.
//!
//! ## 보안 설계 원칙
//!
//! - **bcrypt 해싱**: 생성/교체/수정 시 비밀번호는 항상 다시 해싱
//! - **역할 보호**: 관리자가 아니면 요청의 `role`은 무시
//! - **민감 정보 제거**: 응답은 항상 [`UserResponse`]로 변환되어 비밀번호 해시와 연결된 서비스 ID를 제외
//! - **연관 데이터 정리**: 사용자 삭제 시 해당 사용자의 리프레시 토큰도 삭제

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::{
    core::errors::{AppError, AppResult, FieldError, FieldLocation},
    domain::{
        dto::users::{CreateUserRequest, ListUsersQuery, ReplaceUserRequest, UpdateUserRequest, UserResponse},
        entities::users::{Role, User},
        models::auth::AuthenticatedUser,
    },
    repositories::{
        tokens::RefreshTokenRepository,
        users::{UserFilter, UserRepository},
    },
    utils::{
        password_utils::hash_password,
        string_utils::{clean_optional_string, normalize_email},
    },
};

/// 사용자 관리 비즈니스 로직 서비스
///
/// 모든 메서드는 `AppResult<T>`를 반환합니다.
///
/// - **ValidationError**: 검증을 통과했어야 할 필수 필드 누락
/// - **Auth(EmailAlreadyExists)**: 이메일 중복 (409)
/// - **NotFound**: "User does not exist" (잘못된 ObjectId 포함)
pub struct UserService {
    users: Arc<dyn UserRepository>,
    refresh_tokens: Arc<dyn RefreshTokenRepository>,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        refresh_tokens: Arc<dyn RefreshTokenRepository>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            bcrypt_cost,
        }
    }

    /// 필터와 페이지네이션을 적용한 사용자 목록 (최신 생성순)
    pub async fn list(&self, query: &ListUsersQuery) -> AppResult<Vec<UserResponse>> {
        let filter = UserFilter {
            name: clean_optional_string(query.name.clone()),
            email: query.email.as_deref().map(normalize_email),
            role: query.role.as_deref().and_then(Role::from_str),
        };

        let users = self.users.list(&filter, query.skip(), query.per_page()).await?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// 관리자 사용자 생성
    ///
    /// # Errors
    ///
    /// * `Auth(EmailAlreadyExists)` - 이미 사용 중인 이메일
    pub async fn create(&self, request: CreateUserRequest) -> AppResult<UserResponse> {
        let email = required("email", request.email)?;
        let password = required("password", request.password)?;
        let role = request.role.as_deref().and_then(Role::from_str).unwrap_or_default();

        let password_hash = hash_password(&password, self.bcrypt_cost)?;
        let user = self
            .users
            .create(User::new_local(&email, password_hash, request.name, role))
            .await?;

        log::info!("사용자 생성: {} ({})", user.email, user.role.as_str());
        Ok(UserResponse::from(user))
    }

    /// ID로 사용자 조회
    pub async fn get(&self, id: &str) -> AppResult<UserResponse> {
        let user = self.find(id).await?;
        Ok(UserResponse::from(user))
    }

    /// 사용자 문서 전체 교체
    ///
    /// `_id`, `created_at`, 연결된 소셜 서비스와 사진은 유지됩니다.
    /// 관리자가 아니거나 `role`이 없으면 기존 역할을 유지합니다.
    pub async fn replace(&self, id: &str, request: ReplaceUserRequest, caller_is_admin: bool) -> AppResult<UserResponse> {
        let existing = self.find(id).await?;

        let email = required("email", request.email)?;
        let password = required("password", request.password)?;
        let role = match request.role.as_deref().and_then(Role::from_str) {
            Some(role) if caller_is_admin => role,
            _ => existing.role,
        };

        let mut user = User::new_local(&email, hash_password(&password, self.bcrypt_cost)?, request.name, role);
        user.id = existing.id;
        user.created_at = existing.created_at;
        user.services = existing.services;
        user.picture = existing.picture;

        let user = self
            .users
            .replace(user)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        self.revoke_if_email_changed(&existing.email, &user).await?;

        Ok(UserResponse::from(user))
    }

    /// 전달된 필드만 수정합니다
    ///
    /// 변경할 필드가 없으면 저장하지 않고 현재 사용자를 그대로 반환합니다.
    pub async fn update(&self, id: &str, request: UpdateUserRequest, caller_is_admin: bool) -> AppResult<UserResponse> {
        let mut user = self.find(id).await?;
        let previous_email = user.email.clone();
        let mut changed = false;

        if let Some(email) = request.email {
            user.email = normalize_email(&email);
            changed = true;
        }
        if let Some(password) = request.password {
            user.password = hash_password(&password, self.bcrypt_cost)?;
            changed = true;
        }
        if request.name.is_some() {
            user.name = clean_optional_string(request.name);
            changed = true;
        }
        if caller_is_admin {
            if let Some(role) = request.role.as_deref().and_then(Role::from_str) {
                user.role = role;
                changed = true;
            }
        }

        if !changed {
            return Ok(UserResponse::from(user));
        }

        user.touch();
        let user = self
            .users
            .replace(user)
            .await?
            .ok_or_else(AppError::user_not_found)?;
        self.revoke_if_email_changed(&previous_email, &user).await?;

        Ok(UserResponse::from(user))
    }

    /// 사용자와 그 사용자의 리프레시 토큰을 삭제합니다
    pub async fn remove(&self, id: &str) -> AppResult<()> {
        let object_id = parse_user_id(id)?;

        if !self.users.delete(&object_id).await? {
            return Err(AppError::user_not_found());
        }

        let revoked = self.refresh_tokens.delete_by_user(&object_id).await?;
        log::info!("사용자 삭제: {} (리프레시 토큰 {}개 폐기)", id, revoked);

        Ok(())
    }

    /// 로그인한 사용자 본인 정보
    pub async fn profile(&self, current: &AuthenticatedUser) -> AppResult<UserResponse> {
        self.get(&current.user_id).await
    }

    /// 리프레시 토큰은 이메일로 조회되므로 이메일이 바뀌면 기존 토큰을 폐기합니다
    async fn revoke_if_email_changed(&self, previous_email: &str, user: &User) -> AppResult<()> {
        if previous_email == user.email {
            return Ok(());
        }

        if let Some(user_id) = &user.id {
            let revoked = self.refresh_tokens.delete_by_user(user_id).await?;
            log::info!("이메일 변경: {} -> {} (리프레시 토큰 {}개 폐기)", previous_email, user.email, revoked);
        }

        Ok(())
    }

    async fn find(&self, id: &str) -> AppResult<User> {
        let object_id = parse_user_id(id)?;

        self.users
            .find_by_id(&object_id)
            .await?
            .ok_or_else(AppError::user_not_found)
    }
}

/// 잘못된 형식의 ID는 존재하지 않는 사용자로 취급합니다
fn parse_user_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::user_not_found())
}

fn required(field: &str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| {
        AppError::ValidationError(vec![FieldError::new(
            field,
            FieldLocation::Body,
            format!("\"{}\" is required", field),
        )])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::tokens::RefreshToken;
    use crate::repositories::memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
    use crate::utils::password_utils::verify_password;

    struct Fixture {
        users: Arc<InMemoryUserRepository>,
        refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
        service: UserService,
    }

    fn fixture() -> Fixture {
        let users = Arc::new(InMemoryUserRepository::new());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new());
        let service = UserService::new(users.clone(), refresh_tokens.clone(), 4);

        Fixture {
            users,
            refresh_tokens,
            service,
        }
    }

    fn create_request(email: &str, role: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: Some(email.to_string()),
            password: Some("123456".to_string()),
            name: Some("Sansa".to_string()),
            role: role.map(str::to_string),
        }
    }

    #[actix_web::test]
    async fn test_create_and_get() {
        let f = fixture();

        let created = f.service.create(create_request("Sansa@Stark.com", Some("admin"))).await.unwrap();
        let fetched = f.service.get(&created.id).await.unwrap();

        assert_eq!(fetched.email, "sansa@stark.com");
        assert_eq!(fetched.role, Role::Admin);
    }

    #[actix_web::test]
    async fn test_get_invalid_or_missing_id() {
        let f = fixture();

        for id in ["not-an-object-id", "000000000000000000000000"] {
            match f.service.get(id).await {
                Err(AppError::NotFound(msg)) => assert_eq!(msg, "User does not exist"),
                other => panic!("Expected NotFound, got {:?}", other),
            }
        }
    }

    #[actix_web::test]
    async fn test_list_filters_by_role() {
        let f = fixture();
        f.service.create(create_request("a@stark.com", None)).await.unwrap();
        f.service.create(create_request("b@stark.com", Some("admin"))).await.unwrap();

        let query = ListUsersQuery { role: Some("admin".to_string()), ..Default::default() };
        let admins = f.service.list(&query).await.unwrap();

        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].email, "b@stark.com");
    }

    #[actix_web::test]
    async fn test_update_ignores_role_for_non_admin() {
        let f = fixture();
        let created = f.service.create(create_request("sansa@stark.com", None)).await.unwrap();

        let request = UpdateUserRequest {
            name: Some("Queen in the North".to_string()),
            role: Some("admin".to_string()),
            ..Default::default()
        };
        let updated = f.service.update(&created.id, request, false).await.unwrap();

        assert_eq!(updated.name.as_deref(), Some("Queen in the North"));
        assert_eq!(updated.role, Role::User);
    }

    #[actix_web::test]
    async fn test_replace_rehashes_password_and_keeps_created_at() {
        let f = fixture();
        let created = f.service.create(create_request("sansa@stark.com", None)).await.unwrap();

        let request = ReplaceUserRequest {
            email: Some("lady@stark.com".to_string()),
            password: Some("winterfell".to_string()),
            name: None,
            role: Some("admin".to_string()),
        };
        let replaced = f.service.replace(&created.id, request, true).await.unwrap();

        assert_eq!(replaced.email, "lady@stark.com");
        assert_eq!(replaced.name, None);
        assert_eq!(replaced.role, Role::Admin);
        assert_eq!(replaced.created_at, created.created_at);

        let stored = f.users.find_by_email("lady@stark.com").await.unwrap().unwrap();
        assert!(verify_password("winterfell", &stored.password));
    }

    #[actix_web::test]
    async fn test_email_change_revokes_refresh_tokens() {
        let f = fixture();
        let created = f.service.create(create_request("sansa@stark.com", None)).await.unwrap();
        let user_id = ObjectId::parse_str(&created.id).unwrap();
        f.refresh_tokens
            .create(RefreshToken::generate(user_id, "sansa@stark.com", chrono::Duration::days(1)))
            .await
            .unwrap();

        let rename = UpdateUserRequest { name: Some("Sansa Stark".to_string()), ..Default::default() };
        f.service.update(&created.id, rename, false).await.unwrap();
        assert_eq!(f.refresh_tokens.count_for("sansa@stark.com"), 1);

        let move_email = UpdateUserRequest { email: Some("lady@stark.com".to_string()), ..Default::default() };
        f.service.update(&created.id, move_email, false).await.unwrap();
        assert_eq!(f.refresh_tokens.count_for("sansa@stark.com"), 0);

        f.refresh_tokens
            .create(RefreshToken::generate(user_id, "lady@stark.com", chrono::Duration::days(1)))
            .await
            .unwrap();
        let request = ReplaceUserRequest {
            email: Some("queen@stark.com".to_string()),
            password: Some("winterfell".to_string()),
            name: None,
            role: None,
        };
        f.service.replace(&created.id, request, false).await.unwrap();
        assert_eq!(f.refresh_tokens.count_for("lady@stark.com"), 0);
    }

    #[actix_web::test]
    async fn test_remove_revokes_refresh_tokens() {
        let f = fixture();
        let created = f.service.create(create_request("sansa@stark.com", None)).await.unwrap();
        let user_id = ObjectId::parse_str(&created.id).unwrap();
        f.refresh_tokens
            .create(RefreshToken::generate(user_id, "sansa@stark.com", chrono::Duration::days(1)))
            .await
            .unwrap();

        f.service.remove(&created.id).await.unwrap();

        assert_eq!(f.users.count(), 0);
        assert_eq!(f.refresh_tokens.count_for("sansa@stark.com"), 0);
        assert!(matches!(f.service.remove(&created.id).await, Err(AppError::NotFound(_))));
    }
}
