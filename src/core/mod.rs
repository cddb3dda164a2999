//! # Core Framework Module
//!
//! 애플리케이션 전역에서 쓰는 핵심 기반 기능을 제공합니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 의존성 주입 컨테이너
//! - **ServiceLocator**: 타입별 서비스 인스턴스 보관, 핸들러에 `web::Data`로 주입
//! - **Repository**: 기동 시 인덱스를 만드는 리포지토리 공통 trait
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 상태 코드가 붙은 평탄한 에러 분류
//! - **AuthError**: 인증/토큰 도메인 실패와 공개 메시지
//! - **FieldError**: `{field, location, messages}` 형태의 검증 상세
//!
//! ## 애플리케이션 초기화
//!
//! ```rust,ignore
//! let locator = Arc::new(ServiceLocator::new());
//! let repositories = Repositories::mongo(database, &locator);
//! register_services(&locator, repositories, email, oauth, AuthSettings::from_env());
//! locator.initialize_all().await?;
//!
//! HttpServer::new(move || {
//!     App::new()
//!         .app_data(web::Data::from(locator.clone()))
//!         .configure(configure_all_routes)
//! })
//! ```
//!
//! ## 에러 처리
//!
//! ```rust,ignore
//! async fn login(body: web::Json<LoginRequest>, locator: web::Data<ServiceLocator>)
//!     -> Result<HttpResponse, AppError>
//! {
//!     body.validate_at(FieldLocation::Body)?;
//!     let auth = locator.get::<AuthService>()?;
//!     let response = auth.login(&email, &password).await?;
//!     Ok(HttpResponse::Ok().json(response))
//! }
//! ```

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
