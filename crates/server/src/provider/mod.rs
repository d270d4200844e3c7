//! Authorization provider module.
//!
//! Implements the grant-issuing core of the provider: request validation,
//! the authorization-code and implicit grant flows, unique token allocation,
//! and bearer-token introspection.
//!
//! ## Endpoints
//!
//! - `GET /provider/authorize` - Authorization endpoint (code and implicit flows)
//! - `GET /provider/userinfo` - Owner identity for a bearer token

pub mod endpoints;
pub mod flow;
pub mod grants;
pub mod session;
mod state;
pub mod store;
pub mod validate;

pub use endpoints::router;
pub use state::ProviderState;

/// OpenAPI tag for provider endpoints
pub const PROVIDER_TAG: &str = "Authorization Provider";
