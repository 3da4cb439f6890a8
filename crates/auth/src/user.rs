//! User record as seen by the gate.
//!
//! Users and roles are owned by an external store; this crate only reads the
//! snapshot returned by a lookup.

use serde::{Deserialize, Serialize};

use crate::{Role, SubjectId};

// ─────────────────────────────────────────────────────────────────────────────
// User Status
// ─────────────────────────────────────────────────────────────────────────────

/// Registration status of a user account.
///
/// Only `Accepted` users may authenticate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Pending => "pending",
            UserStatus::Accepted => "accepted",
            UserStatus::Rejected => "rejected",
        }
    }
}

impl core::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for UserStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(UserStatus::Pending),
            "accepted" => Ok(UserStatus::Accepted),
            "rejected" => Ok(UserStatus::Rejected),
            other => Err(format!("unknown user status '{other}'")),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User Record
// ─────────────────────────────────────────────────────────────────────────────

/// A user together with its embedded role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub cpf: SubjectId,
    #[serde(default)]
    pub name: String,
    pub status: UserStatus,
    pub role: Role,
}

impl UserRecord {
    pub fn new(cpf: impl Into<SubjectId>, status: UserStatus, role: Role) -> Self {
        Self {
            cpf: cpf.into(),
            name: String::new(),
            status,
            role,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.status == UserStatus::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_lowercase_names() {
        for status in [UserStatus::Pending, UserStatus::Accepted, UserStatus::Rejected] {
            assert_eq!(status.as_str().parse::<UserStatus>(), Ok(status));
        }
        assert!("ACCEPTED".parse::<UserStatus>().is_err());
    }

    #[test]
    fn only_accepted_status_is_accepted() {
        let role = Role::new("viewer", ["read:users"]);
        assert!(UserRecord::new("123", UserStatus::Accepted, role.clone()).is_accepted());
        assert!(!UserRecord::new("123", UserStatus::Pending, role.clone()).is_accepted());
        assert!(!UserRecord::new("123", UserStatus::Rejected, role).is_accepted());
    }
}
