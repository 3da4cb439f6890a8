use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::Permission;

/// Role embedded in a user record.
///
/// The role owns the set of actions its holders are allowed to perform; route
/// requirements are checked against this set verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub allowed_actions: BTreeSet<Permission>,
}

impl Role {
    pub fn new<I, P>(name: impl Into<String>, allowed_actions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self {
            name: name.into(),
            allowed_actions: allowed_actions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allows(&self, permission: &Permission) -> bool {
        self.allowed_actions.contains(permission)
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.name)
    }
}
