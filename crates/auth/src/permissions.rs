use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque action tags (e.g. "read:users"). A role grants a set
/// of them; a route may require zero, one or many.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Permission requirement attached to a route entry.
///
/// Configuration may declare either a single permission or a list; both forms
/// deserialize from the same `permissions` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredPermissions {
    One(Permission),
    All(Vec<Permission>),
}

impl RequiredPermissions {
    /// Normalise to a slice: a single permission becomes a one-element list.
    pub fn as_slice(&self) -> &[Permission] {
        match self {
            RequiredPermissions::One(p) => core::slice::from_ref(p),
            RequiredPermissions::All(ps) => ps,
        }
    }

    /// A single empty permission (`"permissions": ""`) declares nothing.
    pub fn is_unset(&self) -> bool {
        matches!(self, RequiredPermissions::One(p) if p.as_str().is_empty())
    }
}

impl From<Permission> for RequiredPermissions {
    fn from(value: Permission) -> Self {
        Self::One(value)
    }
}

impl From<Vec<Permission>> for RequiredPermissions {
    fn from(value: Vec<Permission>) -> Self {
        Self::All(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_permission_normalises_to_one_element() {
        let req: RequiredPermissions = serde_json::from_str(r#""read:users""#).unwrap();
        assert_eq!(req.as_slice(), &[Permission::new("read:users")]);
    }

    #[test]
    fn list_form_keeps_declared_order() {
        let req: RequiredPermissions =
            serde_json::from_str(r#"["read:users", "write:users"]"#).unwrap();
        let names: Vec<&str> = req.as_slice().iter().map(Permission::as_str).collect();
        assert_eq!(names, vec!["read:users", "write:users"]);
    }

    #[test]
    fn only_a_blank_single_permission_is_unset() {
        let blank: RequiredPermissions = serde_json::from_str(r#""""#).unwrap();
        assert!(blank.is_unset());

        let listed: RequiredPermissions = serde_json::from_str(r#"[""]"#).unwrap();
        assert!(!listed.is_unset());
        assert!(!RequiredPermissions::from(Permission::new("read:users")).is_unset());
    }
}
