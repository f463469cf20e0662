//! Access token inspection. The console never verifies signatures (the
//! backends do); it only reads the `exp` claim to decide whether a refresh is
//! due. Token contents must not be logged.

use base64ct::{Base64Unpadded, Base64UrlUnpadded, Encoding};
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    Malformed,
    #[error("token payload is not valid base64")]
    Encoding,
    #[error("token payload is not a JSON claims object")]
    Claims,
    #[error("token has no numeric exp claim")]
    MissingExpiry,
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<f64>,
}

/// Returns the `exp` claim (seconds since the epoch) of a JWT-shaped token.
///
/// # Errors
/// Returns a `TokenError` when the token cannot be split, decoded or parsed,
/// or carries no `exp` claim.
pub fn expires_at(token: &str) -> Result<f64, TokenError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(TokenError::Malformed)?;

    let bytes = decode_segment(payload)?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|_| TokenError::Claims)?;

    claims
        .exp
        .filter(|exp| exp.is_finite())
        .ok_or(TokenError::MissingExpiry)
}

/// True when `now` (seconds since the epoch) is at or past the token's expiry.
///
/// # Errors
/// Propagates decode failures from [`expires_at`].
pub fn is_expired_at(token: &str, now: u64) -> Result<bool, TokenError> {
    let exp = expires_at(token)?;
    #[allow(clippy::cast_precision_loss)]
    let now = now as f64;
    Ok(now >= exp)
}

/// [`is_expired_at`] against the system clock.
///
/// # Errors
/// Propagates decode failures from [`expires_at`].
pub fn is_expired(token: &str) -> Result<bool, TokenError> {
    is_expired_at(token, unix_now())
}

#[must_use]
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// JWT segments are base64url without padding, but some issuers pad or use the
/// standard alphabet; accept all of them.
fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let trimmed = segment.trim_end_matches('=');
    Base64UrlUnpadded::decode_vec(trimmed)
        .or_else(|_| Base64Unpadded::decode_vec(trimmed))
        .map_err(|_| TokenError::Encoding)
}
