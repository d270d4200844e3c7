//! Authorization provider HTTP endpoints.
//!
//! Implements the provider's external surface:
//! - Authorize endpoint (authorization-code and implicit flows)
//! - UserInfo endpoint (bearer-token introspection)

use crate::entity::owner::{self, Projectable};
use crate::error::{IntrospectionError, StoreError, ValidationError};
use crate::provider::{PROVIDER_TAG, ProviderState, flow, session, validate};
use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Creates the provider router.
pub fn router(state: ProviderState) -> OpenApiRouter {
    OpenApiRouter::new()
        .routes(routes!(authorize))
        .routes(routes!(user_info))
        .with_state(state)
}

// =============================================================================
// Endpoints
// =============================================================================

/// Authorization endpoint.
///
/// Validates the request against the registered applications and roles, hands
/// unauthenticated callers to the role's external sign-in surface, and issues
/// the grant: a fresh authorization code (`response_type=code`) or an access
/// token (`response_type=token`, honoring the reuse policy).
#[tracing::instrument(skip(state, headers))]
#[utoipa::path(
    get,
    path = "/authorize",
    tag = PROVIDER_TAG,
    operation_id = "Authorize",
    summary = "Initiate an authorization grant flow",
    description = "Starts the authorization-code or implicit grant flow for a registered \
                   client application. Unauthenticated callers are redirected to the sign-in \
                   surface configured for the requested role; the flow is re-entered from \
                   scratch once they return.\n\n\
                   On success the caller is redirected to `redirect_uri` with `?code=<token>` \
                   (code flow) or `#access_token=<token>` (implicit flow) appended.",
    params(validate::AuthorizeParams),
    responses(
        (status = 303, description = "Redirect: to the sign-in surface, to the client with a grant, or to the client with an error fragment (implicit flow)"),
        (status = 422, description = "Validation failure; body carries the machine-readable code (`unknown_client_id`, `invalid_redirect_uri`, `invalid_user_role`, `unsupported_response_type`)"),
        (status = 500, description = "Grant storage failure"),
    )
)]
pub async fn authorize(
    State(state): State<ProviderState>,
    headers: HeaderMap,
    Query(params): Query<validate::AuthorizeParams>,
) -> Response {
    let request = match validate::validate_authorize(&state.config.provider, &params) {
        Ok(request) => request,
        Err(err) => return rejection(&state, &params, err),
    };

    // Hand off to the external login surface when the caller is not
    // authenticated for the requested role. The original request terminates
    // here; a fresh request re-enters validation after sign-in.
    let owner =
        match session::authenticated_owner(state.db.as_ref(), &headers, &request.role.name).await {
            Ok(Some(owner)) => owner,
            Ok(None) => return Redirect::to(&request.role.sign_in_url).into_response(),
            Err(err) => return server_error(err.into()),
        };

    let reuse = state.config.provider.reuse_access_tokens;
    match flow::issue_grant(&state.grants(), reuse, &request, &owner.reference()).await {
        Ok(target) => Redirect::to(&target).into_response(),
        Err(err) => server_error(err),
    }
}

/// UserInfo endpoint.
///
/// Resolves an `Authorization: Bearer <token>` header to the owner the token
/// was issued for and returns the owner's provider view keyed by its role
/// name.
#[tracing::instrument(skip(state, headers))]
#[utoipa::path(
    get,
    path = "/userinfo",
    tag = PROVIDER_TAG,
    operation_id = "UserInfo",
    summary = "Resolve a bearer token to its owner",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "Owner representation keyed by role name"),
        (status = 401, description = "Missing Authorization header or Bearer scheme"),
        (status = 403, description = "Token is not a known access token"),
        (status = 500, description = "Owner reference no longer resolves"),
    )
)]
pub async fn user_info(State(state): State<ProviderState>, headers: HeaderMap) -> Response {
    let token = match bearer_token(&headers) {
        Ok(token) => token,
        Err(err) => return introspection_error(err),
    };

    let record = match state.grants().find_access_token(token).await {
        Ok(Some(record)) => record,
        Ok(None) => return introspection_error(IntrospectionError::UnknownAccessToken),
        Err(err) => return server_error(err.into()),
    };

    let owner = match owner::find_by_reference(state.db.as_ref(), &record.owner).await {
        Ok(Some(owner)) => owner,
        Ok(None) => {
            tracing::error!(owner = %record.owner, "access token references a missing owner");
            return server_error_response();
        }
        Err(err) => return server_error(err.into()),
    };

    // Audit trail for token use.
    tracing::info!(
        access_token = %record.token,
        request_ip = %requester_ip(&headers),
        request_user_agent = %requester_agent(&headers),
        "user info ok"
    );

    let mut body = serde_json::Map::new();
    body.insert(owner.role.clone(), owner.provider_view());
    (StatusCode::OK, Json(serde_json::Value::Object(body))).into_response()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Render a validation failure per the flow-specific policy.
///
/// The implicit flow reports failures after the client is known by
/// redirecting to the client with an `#error=` fragment; everything else is
/// a direct 422 carrying the machine-readable code as its body. An unknown
/// client is never redirected to, since the redirect target cannot be
/// trusted before the client is known.
fn rejection(
    state: &ProviderState,
    params: &validate::AuthorizeParams,
    err: ValidationError,
) -> Response {
    let implicit = matches!(
        validate::ResponseType::parse(&params.response_type),
        Some(validate::ResponseType::Token)
    );
    if implicit && let Some(app) = state.config.provider.app_by_client_id(&params.client_id) {
        // A redirect URI that failed membership is untrusted; fall back to
        // the first registered one for that app.
        let target = match err {
            ValidationError::InvalidRedirectUri => app.first_redirect_uri(),
            ValidationError::InvalidUserRole => Some(params.redirect_uri.as_str()),
            _ => None,
        };
        if let Some(target) = target {
            return Redirect::to(&format!("{}#error={}", target, err.code())).into_response();
        }
    }
    (StatusCode::UNPROCESSABLE_ENTITY, err.code()).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, IntrospectionError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(IntrospectionError::MissingAuthorizationHeader)?;
    value
        .strip_prefix("Bearer ")
        .ok_or(IntrospectionError::MissingAuthorizationBearer)
}

fn introspection_error(err: IntrospectionError) -> Response {
    (err.status(), Json(json!({ "error": err.code() }))).into_response()
}

fn server_error(err: StoreError) -> Response {
    tracing::error!("grant storage failure: {err}");
    server_error_response()
}

fn server_error_response() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "server_error" })),
    )
        .into_response()
}

fn requester_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn requester_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}
