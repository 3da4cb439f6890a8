//! Route → permission table.
//!
//! The table is authored as ordered groups of child routes. At load time it is
//! flattened into one ordered list of compiled entries; lookup returns the
//! first entry whose pattern and verb both match. Later entries that overlap
//! an earlier one are never reached, and that is not an error: authors order
//! the table by specificity themselves.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::RequiredPermissions;

/// A parent path and its ordered child routes, as written in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteGroup {
    pub parent_path: String,
    #[serde(default)]
    pub child_routes: Vec<RouteEntry>,
}

/// One configured route.
///
/// An empty `path` denotes the parent path itself. Segments beginning with `:`
/// are parameters matching exactly one non-empty path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub path: String,
    pub method: String,
    #[serde(default)]
    pub permissions: Option<RequiredPermissions>,
}

#[derive(Debug, Error)]
pub enum RouteTableError {
    #[error("route table is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("route '{path}' has an empty method")]
    EmptyMethod { path: String },

    #[error("route '{path}' does not compile to a pattern: {source}")]
    InvalidPattern {
        path: String,
        #[source]
        source: regex::Error,
    },
}

/// A flattened, precompiled table entry.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    full_path: String,
    method: String,
    required: Option<RequiredPermissions>,
    pattern: Regex,
}

impl CompiledRoute {
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn required(&self) -> Option<&RequiredPermissions> {
        self.required.as_ref()
    }

    pub fn matches(&self, path: &str, verb: &str) -> bool {
        self.method == verb && self.pattern.is_match(path)
    }
}

/// Immutable, ordered route table. Built once at startup and shared.
#[derive(Debug, Clone, Default)]
pub struct RoutePermissionTable {
    routes: Vec<CompiledRoute>,
}

impl RoutePermissionTable {
    pub fn compile(groups: &[RouteGroup]) -> Result<Self, RouteTableError> {
        let mut routes = Vec::new();

        for group in groups {
            for child in &group.child_routes {
                let full_path = format!("{}{}", group.parent_path, child.path);

                let method = child.method.trim().to_ascii_uppercase();
                if method.is_empty() {
                    return Err(RouteTableError::EmptyMethod { path: full_path });
                }

                let pattern = compile_pattern(&full_path).map_err(|source| {
                    RouteTableError::InvalidPattern {
                        path: full_path.clone(),
                        source,
                    }
                })?;

                routes.push(CompiledRoute {
                    full_path,
                    method,
                    required: child.permissions.clone(),
                    pattern,
                });
            }
        }

        Ok(Self { routes })
    }

    pub fn from_json_str(json: &str) -> Result<Self, RouteTableError> {
        let groups: Vec<RouteGroup> = serde_json::from_str(json)?;
        Self::compile(&groups)
    }

    /// First entry matching `path` (no query string) and `verb`.
    pub fn find(&self, path: &str, verb: &str) -> Option<&CompiledRoute> {
        self.routes.iter().find(|route| route.matches(path, verb))
    }

    /// Permission requirement for a request; `None` means authentication alone
    /// is sufficient.
    pub fn resolve(&self, path: &str, verb: &str) -> Option<&RequiredPermissions> {
        self.find(path, verb).and_then(CompiledRoute::required)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// `/users/:id` → `^/users/[^/]+$`. Literal text is escaped.
fn compile_pattern(full_path: &str) -> Result<Regex, regex::Error> {
    let mut pattern = String::from("^");

    for (i, segment) in full_path.split('/').enumerate() {
        if i > 0 {
            pattern.push('/');
        }
        if i > 0 && segment.len() > 1 && segment.starts_with(':') {
            pattern.push_str("[^/]+");
        } else {
            pattern.push_str(&regex::escape(segment));
        }
    }

    pattern.push('$');
    Regex::new(&pattern)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Permission;

    fn entry(path: &str, method: &str, permissions: Option<RequiredPermissions>) -> RouteEntry {
        RouteEntry {
            path: path.to_string(),
            method: method.to_string(),
            permissions,
        }
    }

    fn one(p: &'static str) -> Option<RequiredPermissions> {
        Some(RequiredPermissions::One(Permission::new(p)))
    }

    fn users_table() -> RoutePermissionTable {
        RoutePermissionTable::compile(&[RouteGroup {
            parent_path: "/users".to_string(),
            child_routes: vec![
                entry("", "GET", one("list:users")),
                entry("/:id", "GET", one("read:users")),
                entry("/special", "GET", None),
                entry("/:id", "PUT", Some(RequiredPermissions::All(vec![
                    Permission::new("read:users"),
                    Permission::new("write:users"),
                ]))),
            ],
        }])
        .unwrap()
    }

    #[test]
    fn empty_child_path_is_parent_itself() {
        let table = users_table();
        assert_eq!(table.resolve("/users", "GET"), one("list:users").as_ref());
        assert_eq!(table.resolve("/users/", "GET"), None);
    }

    #[test]
    fn parameter_matches_exactly_one_segment() {
        let table = users_table();
        assert_eq!(table.resolve("/users/42", "GET"), one("read:users").as_ref());
        assert!(table.find("/users/42/roles", "GET").is_none());
        assert!(table.find("/users//", "GET").is_none());
    }

    #[test]
    fn earlier_entry_shadows_later_one() {
        let table = users_table();
        let route = table.find("/users/special", "GET").unwrap();
        assert_eq!(route.full_path(), "/users/:id");
        assert_eq!(table.resolve("/users/special", "GET"), one("read:users").as_ref());
    }

    #[test]
    fn verb_must_match() {
        let table = users_table();
        let required = table.resolve("/users/7", "PUT").unwrap();
        assert_eq!(required.as_slice().len(), 2);
        assert!(table.find("/users/7", "DELETE").is_none());
    }

    #[test]
    fn pattern_is_anchored() {
        let table = users_table();
        assert!(table.find("/api/users/7", "GET").is_none());
        assert!(table.find("/users/7x/y", "GET").is_none());
    }

    #[test]
    fn first_match_wins_across_groups() {
        let table = RoutePermissionTable::from_json_str(
            r#"[
                {"parentPath": "/reports", "childRoutes": [
                    {"path": "/:kind", "method": "GET", "permissions": "read:reports"}
                ]},
                {"parentPath": "/reports/daily", "childRoutes": [
                    {"path": "", "method": "GET"}
                ]}
            ]"#,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("/reports/daily", "GET"), one("read:reports").as_ref());
    }

    #[test]
    fn literal_text_is_not_a_regex() {
        let table = RoutePermissionTable::from_json_str(
            r#"[{"parentPath": "/files", "childRoutes": [
                {"path": "/report.pdf", "method": "get", "permissions": ["read:files"]}
            ]}]"#,
        )
        .unwrap();

        assert!(table.find("/files/report.pdf", "GET").is_some());
        assert!(table.find("/files/reportXpdf", "GET").is_none());
    }

    #[test]
    fn empty_method_is_rejected() {
        let err = RoutePermissionTable::compile(&[RouteGroup {
            parent_path: "/x".to_string(),
            child_routes: vec![entry("", "  ", None)],
        }])
        .unwrap_err();
        assert!(matches!(err, RouteTableError::EmptyMethod { .. }));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = RoutePermissionTable::from_json_str("{").unwrap_err();
        assert!(matches!(err, RouteTableError::Parse(_)));
    }

    proptest! {
        #[test]
        fn earlier_parameter_route_always_wins(
            segment in "[a-z0-9]{1,12}",
            later in "[a-z]{1,8}",
        ) {
            let table = RoutePermissionTable::compile(&[RouteGroup {
                parent_path: "/items".to_string(),
                child_routes: vec![
                    entry("/:id", "GET", one("read:items")),
                    entry(&format!("/{later}"), "GET", None),
                ],
            }])
            .unwrap();

            let path = format!("/items/{segment}");
            prop_assert_eq!(table.find(&path, "GET").unwrap().full_path(), "/items/:id");
        }

        #[test]
        fn resolution_is_deterministic(path in "(/[a-z:]{0,6}){0,4}") {
            let table = users_table();
            prop_assert_eq!(table.resolve(&path, "GET"), table.resolve(&path, "GET"));
        }
    }
}
