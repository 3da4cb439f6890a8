use std::sync::Arc;

use routeguard_auth::{SubjectId, UserRecord, UserStatus};

use crate::StoreError;

/// Read-only user/role lookup.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// Find the user with `cpf` whose status is one of `statuses`, role included.
    ///
    /// `Ok(None)` means no such user in any of the requested statuses.
    async fn find_user_with_role(
        &self,
        cpf: &SubjectId,
        statuses: &[UserStatus],
    ) -> Result<Option<UserRecord>, StoreError>;
}

#[async_trait::async_trait]
impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    async fn find_user_with_role(
        &self,
        cpf: &SubjectId,
        statuses: &[UserStatus],
    ) -> Result<Option<UserRecord>, StoreError> {
        (**self).find_user_with_role(cpf, statuses).await
    }
}
