//! Grant flow orchestration.
//!
//! A request walks `Validating -> AwaitingAuthentication -> Issuing`.
//! Validation and the authentication hand-off live in their own modules;
//! this one covers the `Issuing` step: deciding between reusing an access
//! token and minting a new grant, and building the client redirect target.
//!
//! There is no retry at this layer. Collision retries happen inside the
//! token store and are invisible here; a store failure is terminal for the
//! request.

use crate::error::StoreError;
use crate::provider::grants::GrantStore;
use crate::provider::validate::{ResponseType, ValidatedAuthorize};

/// Issue the grant for a validated, authenticated request and return the
/// redirect target for the client.
///
/// `reuse_access_tokens` is injected per call so flow behavior is a pure
/// function of its inputs. It only affects the implicit flow; codes are
/// minted fresh on every request.
pub async fn issue_grant(
    grants: &GrantStore,
    reuse_access_tokens: bool,
    request: &ValidatedAuthorize<'_>,
    owner: &str,
) -> Result<String, StoreError> {
    match request.response_type {
        ResponseType::Code => {
            let code = grants.issue_auth_code(&request.app.name, owner).await?;
            tracing::info!(
                app_name = %request.app.name,
                owner = %owner,
                "authorization code issued"
            );
            Ok(format!("{}?code={}", request.redirect_uri, code.token))
        }
        ResponseType::Token => {
            let existing = if reuse_access_tokens {
                grants
                    .current_access_token(&request.app.name, owner)
                    .await
                    .map_err(StoreError::Database)?
            } else {
                None
            };
            let record = match existing {
                Some(record) => record,
                None => {
                    let record = grants.issue_access_token(&request.app.name, owner).await?;
                    tracing::info!(
                        app_name = %request.app.name,
                        owner = %owner,
                        "access token issued"
                    );
                    record
                }
            };
            Ok(format!(
                "{}#access_token={}",
                request.redirect_uri,
                urlencoding::encode(&record.token)
            ))
        }
    }
}
