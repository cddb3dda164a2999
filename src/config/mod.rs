//! # Configuration Module
//!
//! 환경 변수 기반 설정을 모아 둔 모듈입니다.
//! 값은 `main`에서 dotenv 프로파일(`.env`, `.env.dev`, `.env.prod`)로 로드된 뒤 읽힙니다.
//!
//! - [`data_config`] - 실행 환경, 서버 바인딩, bcrypt cost, 저장소 선택
//! - [`auth_config`] - JWT, 토큰 수명, 이메일, OAuth 엔드포인트, `AuthSettings`

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
