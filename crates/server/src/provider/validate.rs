//! Authorization request validation.
//!
//! Flow-agnostic: the checks run in a fixed order against the configured
//! registries and the first failure wins. How a failure is rendered (direct
//! response vs. error redirect) is the endpoint layer's decision.

use crate::config::{AppRegistration, ProviderConfig, RoleConfig};
use crate::error::ValidationError;
use serde::Deserialize;
use utoipa::IntoParams;

/// Query parameters accepted by the authorize endpoint.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AuthorizeParams {
    /// Role the grant is requested for (selects the sign-in surface)
    pub user_role: String,
    /// "code" for the authorization-code flow, "token" for the implicit flow
    pub response_type: String,
    /// Client identifier of a registered application
    pub client_id: String,
    /// Redirect target; must be registered for the application
    pub redirect_uri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseType {
    Code,
    Token,
}

impl ResponseType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "code" => Some(ResponseType::Code),
            "token" => Some(ResponseType::Token),
            _ => None,
        }
    }
}

/// A validated authorization request: the resolved registrations plus the
/// parameters the grant flow needs.
#[derive(Debug)]
pub struct ValidatedAuthorize<'a> {
    pub app: &'a AppRegistration,
    pub role: &'a RoleConfig,
    pub redirect_uri: &'a str,
    pub response_type: ResponseType,
}

/// Validate an authorization request against the configured registries.
pub fn validate_authorize<'a>(
    provider: &'a ProviderConfig,
    params: &'a AuthorizeParams,
) -> Result<ValidatedAuthorize<'a>, ValidationError> {
    let app = provider
        .app_by_client_id(&params.client_id)
        .ok_or(ValidationError::UnknownClientId)?;
    if !app.is_redirect_uri_allowed(&params.redirect_uri) {
        return Err(ValidationError::InvalidRedirectUri);
    }
    let role = provider
        .role(&params.user_role)
        .ok_or(ValidationError::InvalidUserRole)?;
    let response_type = ResponseType::parse(&params.response_type)
        .ok_or(ValidationError::UnsupportedResponseType)?;
    Ok(ValidatedAuthorize {
        app,
        role,
        redirect_uri: &params.redirect_uri,
        response_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppRegistration, ProviderConfig, RoleConfig};

    fn provider_config() -> ProviderConfig {
        ProviderConfig {
            reuse_access_tokens: false,
            apps: vec![AppRegistration {
                name: "test".into(),
                client_id: "123456".into(),
                client_secret: "qwerty".into(),
                redirect_uris: vec!["http://example.com".into()],
            }],
            user_roles: vec![RoleConfig {
                name: "Admin".into(),
                sign_in_url: "http://example.com/admins/sign_in".into(),
            }],
        }
    }

    fn params(
        user_role: &str,
        response_type: &str,
        client_id: &str,
        redirect_uri: &str,
    ) -> AuthorizeParams {
        AuthorizeParams {
            user_role: user_role.into(),
            response_type: response_type.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    #[test]
    fn accepts_valid_code_flow_request() {
        let cfg = provider_config();
        let params = params("Admin", "code", "123456", "http://example.com");
        let validated = validate_authorize(&cfg, &params).unwrap();
        assert_eq!(validated.app.name, "test");
        assert_eq!(validated.role.name, "Admin");
        assert_eq!(validated.response_type, ResponseType::Code);
    }

    #[test]
    fn accepts_valid_implicit_flow_request() {
        let cfg = provider_config();
        let params = params("Admin", "token", "123456", "http://example.com");
        let validated = validate_authorize(&cfg, &params).unwrap();
        assert_eq!(validated.response_type, ResponseType::Token);
    }

    #[test]
    fn rejects_unknown_client_id() {
        let cfg = provider_config();
        let params = params("Admin", "code", "098765", "http://example.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::UnknownClientId
        );
    }

    #[test]
    fn unknown_client_wins_over_other_failures() {
        // Everything is wrong here; the client check still decides the error.
        let cfg = provider_config();
        let params = params("Ufo", "jwt", "098765", "http://whatever.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::UnknownClientId
        );
    }

    #[test]
    fn rejects_unregistered_redirect_uri() {
        let cfg = provider_config();
        let params = params("Admin", "code", "123456", "http://whatever.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::InvalidRedirectUri
        );
    }

    #[test]
    fn redirect_uri_wins_over_role_and_response_type() {
        let cfg = provider_config();
        let params = params("Ufo", "jwt", "123456", "http://whatever.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::InvalidRedirectUri
        );
    }

    #[test]
    fn rejects_unknown_role() {
        let cfg = provider_config();
        let params = params("Ufo", "code", "123456", "http://example.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::InvalidUserRole
        );
    }

    #[test]
    fn rejects_unsupported_response_type() {
        let cfg = provider_config();
        let params = params("Admin", "jwt", "123456", "http://example.com");
        assert_eq!(
            validate_authorize(&cfg, &params).unwrap_err(),
            ValidationError::UnsupportedResponseType
        );
    }
}
