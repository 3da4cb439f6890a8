//! Bearer token verification.
//!
//! Verification is the only path that may authenticate a request. It does no
//! logging; callers decide what to report.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use thiserror::Error;

use crate::{Denial, IdentityClaims};

/// Scheme prefix expected at the start of the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("no bearer token provided")]
    Missing,

    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

impl From<TokenError> for Denial {
    fn from(value: TokenError) -> Self {
        match value {
            TokenError::Missing => Denial::MissingToken,
            TokenError::Expired => Denial::TokenExpired,
            TokenError::Invalid(_) => Denial::TokenInvalid,
        }
    }
}

/// Token word of an `Authorization` header: the second space-separated word.
///
/// Words after the token are ignored.
pub(crate) fn token_word(header: &str) -> Option<&str> {
    header.split(' ').nth(1)
}

/// Token from a `Bearer ` header; `None` for any other scheme.
pub fn bearer_token(authorization: Option<&str>) -> Option<&str> {
    let header = authorization.filter(|h| h.starts_with(BEARER_PREFIX))?;
    token_word(header)
}

/// HS256 token validator bound to the process-wide signing secret.
#[derive(Clone)]
pub struct TokenValidator {
    key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn hs256(secret: impl AsRef<[u8]>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens without `exp` never expire; audience is not part of the contract.
        validation.required_spec_claims.clear();
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            key: DecodingKey::from_secret(secret.as_ref()),
            validation,
        }
    }

    /// Verify the header's bearer token and decode its claims.
    pub fn validate(&self, authorization: Option<&str>) -> Result<IdentityClaims, TokenError> {
        let token = bearer_token(authorization).ok_or(TokenError::Missing)?;

        let claims = jsonwebtoken::decode::<IdentityClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        // A token is already expired in the second named by `exp`.
        if matches!(claims.exp, Some(exp) if exp <= Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }
}

impl core::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TokenValidator")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}
