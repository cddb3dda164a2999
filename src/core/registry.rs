//! # Service Registry - 의존성 주입 컨테이너
//!
//! 서비스와 리포지토리 인스턴스를 타입별로 보관하는 레지스트리입니다.
//! 기동 시 `main`(또는 테스트)이 구성 요소를 만들어 등록하고, 핸들러는
//! `web::Data<ServiceLocator>`로 주입받아 필요한 서비스를 꺼내 씁니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 인프라/리포지토리 생성
//!    ├─ Database 연결 (또는 in-memory 저장소)
//!    └─ locator.register_repository(repo) → 인덱스 초기화 대상에 추가
//!
//! 2. 서비스 등록
//!    └─ locator.set(Arc::new(AuthService::new(...)))
//!
//! 3. 초기화
//!    └─ locator.initialize_all().await → 각 Repository::init() 실행 (인덱스 생성)
//!
//! 4. 요청 처리
//!    └─ locator.get::<AuthService>()? → Arc<AuthService>
//! ```
//!
//! 전역 싱글톤 대신 인스턴스를 들고 다니므로 테스트마다 독립된 레지스트리를 만들 수 있습니다.
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use crate::core::registry::ServiceLocator;
//!
//! let locator = ServiceLocator::new();
//! locator.register_repository(user_repo.clone());
//! locator.set(Arc::new(UserService::new(user_repo, token_repo, 12)));
//! locator.initialize_all().await?;
//!
//! let user_service = locator.get::<UserService>()?;
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::core::errors::{AppError, AppResult};

/// 데이터 액세스 컴포넌트를 위한 공통 인터페이스
///
/// 리포지토리의 메타데이터와 기동 시 초기화(인덱스 생성)를 담당합니다.
#[async_trait]
pub trait Repository: Send + Sync {
    /// 리포지토리 이름 (로그 출력용)
    fn name(&self) -> &str;

    /// 담당하는 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    /// 기동 시 한 번 호출됩니다. 인덱스가 이미 있으면 아무 일도 하지 않아야 합니다.
    async fn init(&self) -> AppResult<()>;
}

/// 타입 기반 서비스 레지스트리
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    repositories: RwLock<Vec<Arc<dyn Repository>>>,
}

impl ServiceLocator {
    pub fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            repositories: RwLock::new(Vec::new()),
        }
    }

    /// 인스턴스를 등록합니다. 같은 타입이 이미 있으면 교체됩니다.
    pub fn set<T: 'static + Send + Sync>(&self, instance: Arc<T>) {
        let clean_name = Self::extract_clean_type_name(std::any::type_name::<T>());
        log::debug!("📦 Registering: {}", clean_name);

        if let Ok(mut instances) = self.instances.write() {
            instances.insert(TypeId::of::<T>(), instance as Arc<dyn Any + Send + Sync>);
        }
    }

    /// 등록된 인스턴스를 꺼냅니다.
    ///
    /// # Errors
    ///
    /// 등록되지 않은 타입이면 `AppError::InternalError`
    pub fn get<T: 'static + Send + Sync>(&self) -> AppResult<Arc<T>> {
        let type_name = std::any::type_name::<T>();

        let instance = self
            .instances
            .read()
            .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?
            .get(&TypeId::of::<T>())
            .cloned()
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Service not found: {}. Make sure it's registered with ServiceLocator::set()",
                    Self::extract_clean_type_name(type_name)
                ))
            })?;

        instance
            .downcast::<T>()
            .map_err(|_| AppError::InternalError(format!("Type mismatch in ServiceLocator: {}", type_name)))
    }

    /// 기동 시 초기화할 리포지토리를 등록합니다.
    pub fn register_repository(&self, repository: Arc<dyn Repository>) {
        log::debug!("📦 Registering repository: {} ({})", repository.name(), repository.collection_name());

        if let Ok(mut repositories) = self.repositories.write() {
            repositories.push(repository);
        }
    }

    /// 등록된 모든 리포지토리의 `init()`을 순서대로 실행합니다.
    pub async fn initialize_all(&self) -> AppResult<()> {
        let repositories: Vec<Arc<dyn Repository>> = self
            .repositories
            .read()
            .map_err(|_| AppError::InternalError("Service registry lock poisoned".to_string()))?
            .clone();

        log::info!("🔄 Initializing {} repositories", repositories.len());

        for repository in &repositories {
            repository.init().await?;
            log::info!("  ✓ {} ready (collection: {})", repository.name(), repository.collection_name());
        }

        let service_count = self.instances.read().map(|i| i.len()).unwrap_or_default();
        log::info!("✅ Registry initialized: {} repositories, {} services", repositories.len(), service_count);

        Ok(())
    }

    fn extract_clean_type_name(type_name: &str) -> &str {
        match type_name.rfind("::") {
            Some(pos) => &type_name[pos + 2..],
            None => type_name,
        }
    }
}

impl Default for ServiceLocator {
    fn default() -> Self {
        Self::new()
    }
}
