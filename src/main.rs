//! 사용자 인증 서비스 메인 애플리케이션
//!
//! Actix-web 기반의 HTTP 서버를 구동하고 모든 서비스를 초기화합니다.
//! 저장소(MongoDB 또는 in-memory)를 선택하고, 서비스를 레지스트리에 등록한 뒤
//! `/v1/auth`, `/v1/users` REST API를 제공합니다.

use std::path::PathBuf;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};

use user_auth_backend::config::{env_file_for, AuthSettings, Environment, ServerConfig, StorageBackend};
use user_auth_backend::core::errors::AppResult;
use user_auth_backend::core::registry::ServiceLocator;
use user_auth_backend::db::Database;
use user_auth_backend::repositories::memory::{
    InMemoryPasswordResetTokenRepository, InMemoryRefreshTokenRepository, InMemoryUserRepository,
};
use user_auth_backend::repositories::Repositories;
use user_auth_backend::routes::configure_all_routes;
use user_auth_backend::services::auth::HttpOAuthProfileProvider;
use user_auth_backend::services::email::email_provider_from_env;
use user_auth_backend::services::register_services;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // env 파일의 RUST_LOG가 로거에 반영되어야 함
    let env_file = load_env_file();
    init_logging();
    report_env_file(&env_file);

    info!("🚀 사용자 인증 서비스 시작중... (environment: {:?})", Environment::current());

    let locator = Arc::new(ServiceLocator::new());

    build_components(&locator).await.map_err(|e| {
        error!("서비스 구성 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    locator.initialize_all().await.map_err(|e| {
        error!("서비스 초기화 실패: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    info!("✅ 모든 서비스가 성공적으로 초기화되었습니다!");

    start_http_server(locator).await
}

/// 저장소를 선택하고 모든 서비스를 레지스트리에 등록합니다
async fn build_components(locator: &ServiceLocator) -> AppResult<()> {
    let repositories = match StorageBackend::current() {
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");
            let database = Arc::new(Database::new().await?);
            info!("✅ MongoDB 연결 성공 ({})", database.database_name());

            Repositories::mongo(database, locator)
        }
        StorageBackend::Memory => {
            info!("💾 in-memory 저장소 사용 (재시작 시 데이터 유실)");
            Repositories::in_memory(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryRefreshTokenRepository::new()),
                Arc::new(InMemoryPasswordResetTokenRepository::new()),
                locator,
            )
        }
    };

    register_services(
        locator,
        repositories,
        email_provider_from_env(),
        Arc::new(HttpOAuthProfileProvider::from_env()),
        AuthSettings::from_env(),
    );

    Ok(())
}

/// HTTP 서버를 구성하고 실행합니다
///
/// CORS, 로깅, 경로 정규화 미들웨어를 포함합니다.
///
/// # Errors
///
/// * `std::io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(locator: Arc<ServiceLocator>) -> std::io::Result<()> {
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());

    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);
    info!("📍 API: http://{}/v1/auth, http://{}/v1/users", bind_address, bind_address);

    let locator = web::Data::from(locator);

    HttpServer::new(move || {
        let cors = configure_cors();

        App::new()
            .app_data(locator.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .run()
    .await
}

/// 읽으려 한 env 파일과 그 결과
struct EnvFileLoad {
    profile: String,
    file_name: &'static str,
    result: Result<PathBuf, dotenv::Error>,
}

fn load_env_file() -> EnvFileLoad {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    let (file_name, result) = match env_file_for(&profile) {
        Some(file_name) => (file_name, dotenv::from_filename(file_name)),
        None => (".env", dotenv()),
    };

    EnvFileLoad { profile, file_name, result }
}

fn report_env_file(load: &EnvFileLoad) {
    info!("Current profile: {}", load.profile);

    match &load.result {
        Ok(path) => info!("{} 파일 로드 됨 ({})", load.file_name, path.display()),
        Err(e) => error!("{} 파일 로드 실패: {}", load.file_name, e),
    }
}

fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("http://localhost:3000")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_origin("http://localhost:8080")
        .allowed_origin("http://127.0.0.1:8080")
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}
