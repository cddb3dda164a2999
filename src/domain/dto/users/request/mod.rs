//! 사용자/인증 요청 DTO

pub mod auth_request;
pub mod create_user_request;

pub use auth_request::{LoginRequest, OAuthRequest, RegisterRequest};
pub use create_user_request::{CreateUserRequest, ListUsersQuery, ReplaceUserRequest, UpdateUserRequest};
