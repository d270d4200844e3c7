//! SeaORM entities for the authorization provider.

pub mod access_token;
pub mod auth_code;
pub mod owner;
pub mod session;
