use std::collections::HashMap;
use std::sync::RwLock;

use routeguard_auth::{SubjectId, UserRecord, UserStatus};

use super::r#trait::UserStore;
use crate::StoreError;

/// In-memory user store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<SubjectId, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let store = Self::new();
        for user in users {
            store.upsert(user);
        }
        store
    }

    /// Insert or replace a user (keyed by `cpf`).
    pub fn upsert(&self, user: UserRecord) {
        if let Ok(mut map) = self.users.write() {
            map.insert(user.cpf.clone(), user);
        }
    }

    pub fn remove(&self, cpf: &SubjectId) -> Option<UserRecord> {
        self.users.write().ok()?.remove(cpf)
    }
}

#[async_trait::async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_user_with_role(
        &self,
        cpf: &SubjectId,
        statuses: &[UserStatus],
    ) -> Result<Option<UserRecord>, StoreError> {
        let map = self
            .users
            .read()
            .map_err(|_| StoreError::unavailable("user map lock poisoned"))?;

        Ok(map
            .get(cpf)
            .filter(|user| statuses.contains(&user.status))
            .cloned())
    }
}
