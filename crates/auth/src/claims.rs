use serde::{Deserialize, Serialize};

use crate::SubjectId;

/// Token claims (transport-agnostic).
///
/// The subject lives under `id.cpf`; anything else the issuer put in the `id`
/// object is kept in `extra` and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityClaims {
    pub id: IdentityPayload,

    /// Expiration (seconds since the unix epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued-at (seconds since the unix epoch).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityPayload {
    pub cpf: SubjectId,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IdentityClaims {
    pub fn new(cpf: impl Into<SubjectId>) -> Self {
        Self {
            id: IdentityPayload {
                cpf: cpf.into(),
                extra: serde_json::Map::new(),
            },
            exp: None,
            iat: None,
        }
    }

    /// Set `iat` to `issued_at` and `exp` to `issued_at + ttl`.
    pub fn valid_for(mut self, issued_at: chrono::DateTime<chrono::Utc>, ttl: chrono::Duration) -> Self {
        self.iat = Some(issued_at.timestamp());
        self.exp = Some((issued_at + ttl).timestamp());
        self
    }

    pub fn subject(&self) -> &SubjectId {
        &self.id.cpf
    }
}
