//! Principal extractor
//!
//! Resolves the Authorization header into `Option<CurrentUser>` without ever
//! rejecting the request: authentication failure is a data outcome, and the
//! service layer decides whether an anonymous caller may proceed.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;

/// The caller's authentication context
///
/// `AuthContext(None)` is an anonymous caller - whether because no
/// credential was sent or because the credential failed verification.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Option<CurrentUser>);

impl FromRequestParts<ServerState> for AuthContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Reuse an already-resolved principal on this request
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(Self(Some(user.clone())));
        }

        let auth_header = parts
            .headers
            .get(http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok());

        let user = state.jwt_service.resolve(auth_header);

        match &user {
            Some(user) => {
                parts.extensions.insert(user.clone());
            }
            None if auth_header.is_some() => {
                security_log!(
                    "WARN",
                    "auth_failed",
                    uri = format!("{:?}", parts.uri)
                );
            }
            None => {}
        }

        Ok(Self(user))
    }
}
