pub mod claims;

pub use claims::TokenClaims;
