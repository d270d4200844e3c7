use hyper::StatusCode;
use thiserror::Error;

/// Authorization-request validation failures.
///
/// Pure functions of the request input; safe to retry after correcting it.
/// The variants are ordered the way the checks run: the first failing check
/// wins and later ones are never consulted.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("client_id does not resolve to a registered application")]
    UnknownClientId,
    #[error("redirect_uri is not registered for this application")]
    InvalidRedirectUri,
    #[error("user_role is not a configured role")]
    InvalidUserRole,
    #[error("response_type must be 'code' or 'token'")]
    UnsupportedResponseType,
}

impl ValidationError {
    /// Stable machine-readable code surfaced to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::UnknownClientId => "unknown_client_id",
            ValidationError::InvalidRedirectUri => "invalid_redirect_uri",
            ValidationError::InvalidUserRole => "invalid_user_role",
            ValidationError::UnsupportedResponseType => "unsupported_response_type",
        }
    }
}

/// Bearer-token introspection failures.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum IntrospectionError {
    #[error("Authorization header is missing")]
    MissingAuthorizationHeader,
    #[error("Authorization header does not carry a Bearer token")]
    MissingAuthorizationBearer,
    #[error("access token is not known")]
    UnknownAccessToken,
}

impl IntrospectionError {
    pub fn code(&self) -> &'static str {
        match self {
            IntrospectionError::MissingAuthorizationHeader => "missing_authorization_header",
            IntrospectionError::MissingAuthorizationBearer => "missing_authorization_bearer",
            IntrospectionError::UnknownAccessToken => "unknown_access_token",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            IntrospectionError::MissingAuthorizationHeader
            | IntrospectionError::MissingAuthorizationBearer => StatusCode::UNAUTHORIZED,
            IntrospectionError::UnknownAccessToken => StatusCode::FORBIDDEN,
        }
    }
}

/// Grant storage failures.
///
/// `AllocationExhausted` means the fixed collision-retry budget ran out,
/// which points at a broken random source or an undersized token space.
/// Callers surface it as a server error and never retry it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token allocation exhausted after {attempts} attempts")]
    AllocationExhausted { attempts: usize },
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),
}
