//! Session token codec.
//!
//! DESIGN
//! ======
//! A token is standard base64 over the JSON payload
//! `{userId, email, plan, exp}`. Decoding reports every failure (bad base64,
//! bad JSON, unknown plan, past expiry) as `None`; callers treat all of them as
//! "no session".
//!
//! TRADE-OFFS
//! ==========
//! This is a transport encoding, not a security boundary: nothing is signed,
//! so anyone can mint a token. A deployment with real accounts must issue
//! MAC-protected or asymmetrically signed tokens and verify them server-side.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::net::types::{DAY_MS, PlanTier, User};
use crate::util::clock;

/// Lifetime of a freshly issued token.
pub const TOKEN_TTL_MS: i64 = 7 * DAY_MS;

/// Claims carried inside a token. Derived from `User`, never authoritative.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: String,
    pub email: String,
    pub plan: PlanTier,
    /// Absolute expiry in milliseconds since the Unix epoch.
    pub exp: i64,
}

impl TokenPayload {
    #[must_use]
    pub fn for_user(user: &User, now_ms: i64) -> Self {
        Self {
            user_id: user.id.clone(),
            email: user.email.clone(),
            plan: user.plan,
            exp: now_ms.saturating_add(TOKEN_TTL_MS),
        }
    }
}

/// Encode a token for `user`, expiring [`TOKEN_TTL_MS`] from now.
#[must_use]
pub fn encode_token(user: &User) -> String {
    encode_token_at(user, clock::now_ms())
}

#[must_use]
pub fn encode_token_at(user: &User, now_ms: i64) -> String {
    encode_payload(&TokenPayload::for_user(user, now_ms))
}

#[must_use]
pub fn encode_payload(payload: &TokenPayload) -> String {
    // Strings and integers always serialize.
    let json = serde_json::to_vec(payload).unwrap_or_default();
    STANDARD.encode(json)
}

/// Decode `token`, rejecting malformed input and expired payloads.
#[must_use]
pub fn decode_token(token: &str) -> Option<TokenPayload> {
    decode_token_at(token, clock::now_ms())
}

#[must_use]
pub fn decode_token_at(token: &str, now_ms: i64) -> Option<TokenPayload> {
    let bytes = match STANDARD.decode(token.trim()) {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::debug!(error = %err, "token is not base64");
            return None;
        }
    };
    let payload: TokenPayload = match serde_json::from_slice(&bytes) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::debug!(error = %err, "token payload is not valid JSON");
            return None;
        }
    };
    if payload.exp < now_ms {
        tracing::debug!(user_id = %payload.user_id, "token expired");
        return None;
    }
    Some(payload)
}
