use axum::extract::OriginalUri;
use axum::http::{Request, header};

use routeguard_auth::{IdentityClaims, Role, SubjectId, UserRecord};

/// The parts of an HTTP request the gate looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    pub method: String,
    /// Path without the query string (route matching).
    pub path: String,
    /// Path plus query string as received (public check and audit).
    pub original_url: String,
    /// Raw `Authorization` header, if present and valid UTF-8.
    pub authorization: Option<String>,
}

impl RequestInfo {
    pub fn new(method: &str, original_url: &str, authorization: Option<&str>) -> Self {
        let path = original_url
            .split_once('?')
            .map_or(original_url, |(path, _)| path);

        Self {
            method: method.to_string(),
            path: path.to_string(),
            original_url: original_url.to_string(),
            authorization: authorization.map(str::to_string),
        }
    }

    pub fn from_request<B>(req: &Request<B>) -> Self {
        let uri = req
            .extensions()
            .get::<OriginalUri>()
            .map_or(req.uri(), |original| &original.0);

        let original_url = uri
            .path_and_query()
            .map_or_else(|| uri.path(), |pq| pq.as_str());

        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Self::new(req.method().as_str(), original_url, authorization)
    }
}

/// Authenticated identity for an accepted request.
///
/// Inserted into request extensions by the gate; absent on public endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    pub cpf: SubjectId,
    pub name: String,
    pub role: Role,
    pub claims: IdentityClaims,
}

impl AuthenticatedUser {
    pub fn new(user: UserRecord, claims: IdentityClaims) -> Self {
        Self {
            cpf: user.cpf,
            name: user.name,
            role: user.role,
            claims,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn splits_path_from_query() {
        let info = RequestInfo::new("GET", "/users/1?expand=role", Some("Bearer x"));
        assert_eq!(info.path, "/users/1");
        assert_eq!(info.original_url, "/users/1?expand=role");
        assert_eq!(info.authorization.as_deref(), Some("Bearer x"));
    }

    #[test]
    fn reads_method_uri_and_header_from_request() {
        let req = Request::builder()
            .method("DELETE")
            .uri("/roles/9?force=true")
            .header(header::AUTHORIZATION, "Bearer abc")
            .body(Body::empty())
            .unwrap();

        let info = RequestInfo::from_request(&req);
        assert_eq!(info.method, "DELETE");
        assert_eq!(info.path, "/roles/9");
        assert_eq!(info.original_url, "/roles/9?force=true");
        assert_eq!(info.authorization.as_deref(), Some("Bearer abc"));
    }

    #[test]
    fn non_utf8_header_is_treated_as_absent() {
        let req = Request::builder()
            .uri("/")
            .header(header::AUTHORIZATION, &b"Bearer \xff"[..])
            .body(Body::empty())
            .unwrap();

        assert_eq!(RequestInfo::from_request(&req).authorization, None);
    }
}
