//! Authenticated-principal resolution.
//!
//! The login surface is an external collaborator: it signs principals in and
//! writes session rows. The provider only reads the session cookie here and
//! defers to the role's sign-in URL when no matching session exists. Nothing
//! about the authorization flow is persisted across that hand-off; the
//! resumed request re-enters validation from scratch.

use crate::entity::{owner, session};
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait};

/// Cookie carrying the login-session token.
pub const SESSION_COOKIE: &str = "provider_session";

/// Extract the session cookie value from the request headers.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    raw.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Resolve the caller to an owner authenticated for `role`.
///
/// Returns `None` when there is no session, the session belongs to a
/// different role, or its owner reference no longer resolves; all of those
/// defer the caller to the role's sign-in surface.
pub async fn authenticated_owner(
    db: &DatabaseConnection,
    headers: &HeaderMap,
    role: &str,
) -> Result<Option<owner::Model>, DbErr> {
    let Some(token) = session_token(headers) else {
        return Ok(None);
    };
    let Some(session) = session::Entity::find_by_id(&token).one(db).await? else {
        return Ok(None);
    };
    if session.role != role {
        return Ok(None);
    }
    owner::find_by_reference(db, &session.owner).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn session_token_parses_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; provider_session=abc123; lang=en"),
        );
        assert_eq!(session_token(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn session_token_absent_without_cookie() {
        assert_eq!(session_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_token(&headers), None);
    }
}
