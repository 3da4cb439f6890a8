//! Unverified subject extraction for audit attribution.
//!
//! Nothing here authenticates anything. The result is only ever used to label
//! an access log record, and every failure collapses to `None`.

use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;

use crate::SubjectId;
use crate::token::token_word;

#[derive(Deserialize)]
struct UnverifiedClaims {
    id: UnverifiedIdentity,
}

#[derive(Deserialize)]
struct UnverifiedIdentity {
    cpf: SubjectId,
}

/// Read `id.cpf` from the header's token without checking signature or expiry.
///
/// The token is taken as the second space-separated word of the header,
/// whatever the scheme.
pub fn peek_subject(authorization: Option<&str>) -> Option<SubjectId> {
    let token = token_word(authorization?)?;

    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<UnverifiedClaims>(token, &DecodingKey::from_secret(&[]), &validation)
        .ok()
        .map(|data| data.claims.id.cpf)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use jsonwebtoken::{EncodingKey, Header};

    use super::*;
    use crate::IdentityClaims;

    fn mint(secret: &str, claims: &IdentityClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn reads_subject_from_foreign_and_expired_tokens() {
        let claims = IdentityClaims::new("98765432100")
            .valid_for(Utc::now() - Duration::days(1), Duration::minutes(1));
        let header = format!("Bearer {}", mint("someone-else", &claims));

        assert_eq!(peek_subject(Some(header.as_str())), Some(SubjectId::new("98765432100")));
    }

    #[test]
    fn ignores_scheme_name() {
        let header = format!("Token {}", mint("s", &IdentityClaims::new("42")));
        assert_eq!(peek_subject(Some(header.as_str())), Some(SubjectId::new("42")));
    }

    #[test]
    fn failures_collapse_to_none() {
        assert_eq!(peek_subject(None), None);
        assert_eq!(peek_subject(Some("Bearer")), None);
        assert_eq!(peek_subject(Some("Bearer garbage")), None);
        assert_eq!(peek_subject(Some("Bearer a.b.c")), None);
    }
}
