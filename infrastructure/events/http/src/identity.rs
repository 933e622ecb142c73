use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderName, request::Parts},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use user_models::SessionIdentity;

pub const DEFAULT_IDENTITY_HEADER: &str = "x-user-id";

/// Where the fronting auth proxy puts the authenticated user id
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub header: HeaderName,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            header: HeaderName::from_static(DEFAULT_IDENTITY_HEADER),
        }
    }
}

/// Resolve the request's identity once and attach it as an extension.
/// A missing or malformed header leaves the request anonymous.
pub async fn resolve_identity(
    State(config): State<IdentityConfig>, mut request: Request, next: Next,
) -> Response {
    let identity = request
        .headers()
        .get(&config.header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| match value.parse::<SessionIdentity>() {
            Ok(identity) => Some(identity),
            Err(error) => {
                debug!(%error, "Ignoring malformed identity header");
                None
            }
        });

    if let Some(identity) = identity {
        request.extensions_mut().insert(identity);
    }

    next.run(request).await
}

/// The caller's identity, if any. Never rejects.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Option<SessionIdentity>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts, _state: &S,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<SessionIdentity>().copied()))
    }
}
