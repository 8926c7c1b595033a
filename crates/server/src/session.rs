use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::warn;

use service::session::{Role, Session};

use crate::routes::ServerState;

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Option<String>,
    role: Option<String>,
    #[allow(dead_code)]
    exp: Option<usize>,
}

/// Caller session decoded from `Authorization: Bearer <token>` with a
/// fallback to the `auth_token` cookie. A missing or rejected token yields
/// an anonymous, role-less session: only the role-gated exam paths care,
/// and an anonymous caller takes their open path.
pub struct CallerSession(pub Session);

fn bearer_or_cookie_token(parts: &Parts) -> Option<String> {
    let authz = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if let Some(h) = authz {
        if let Some(token) = h.strip_prefix("Bearer ") {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
        warn!(authz = %h, "invalid Authorization format (expect Bearer)");
    }

    // Cookie fallback: scan the raw Cookie header for auth_token
    let cookie_header = parts
        .headers
        .get(axum::http::header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    for part in cookie_header.split(';') {
        if let Some(rest) = part.trim().strip_prefix("auth_token=") {
            if !rest.is_empty() {
                return Some(rest.to_string());
            }
        }
    }
    None
}

pub fn decode_session(parts: &Parts, jwt_secret: &str) -> Session {
    let anonymous = Session { user_id: String::new(), role: None };
    let Some(token) = bearer_or_cookie_token(parts) else {
        return anonymous;
    };

    let key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<Claims>(&token, &key, &validation) {
        Ok(data) => Session {
            user_id: data.claims.sub.unwrap_or_default(),
            role: data.claims.role.as_deref().and_then(Role::from_claim),
        },
        Err(e) => {
            warn!(err = %e, "session token rejected; treating caller as anonymous");
            anonymous
        }
    }
}

#[axum::async_trait]
impl FromRequestParts<ServerState> for CallerSession {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        Ok(CallerSession(decode_session(parts, &state.auth.jwt_secret)))
    }
}
