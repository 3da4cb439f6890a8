//! Postgres-backed user lookup.
//!
//! Expects `users(cpf, name, status, role_id)` joined to
//! `roles(id, name, allowed_actions text[])`.

use routeguard_auth::{Role, SubjectId, UserRecord, UserStatus};
use sqlx::{PgPool, Row};

use super::r#trait::UserStore;
use crate::StoreError;

pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    async fn find_user_with_role(
        &self,
        cpf: &SubjectId,
        statuses: &[UserStatus],
    ) -> Result<Option<UserRecord>, StoreError> {
        let statuses: Vec<String> = statuses.iter().map(|s| s.as_str().to_string()).collect();

        let row = sqlx::query(
            r#"
            SELECT
                u.cpf,
                u.name,
                u.status,
                r.name AS role_name,
                r.allowed_actions
            FROM users u
            JOIN roles r ON r.id = u.role_id
            WHERE u.cpf = $1 AND u.status = ANY($2)
            LIMIT 1
            "#,
        )
        .bind(cpf.as_str())
        .bind(statuses)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            tracing::debug!(cpf = %cpf, "no user with requested status");
            return Ok(None);
        };

        let status: String = row.try_get("status")?;
        let status = status.parse::<UserStatus>().map_err(StoreError::decode)?;
        let allowed_actions: Vec<String> = row.try_get("allowed_actions")?;

        Ok(Some(UserRecord {
            cpf: SubjectId::new(row.try_get::<String, _>("cpf")?),
            name: row.try_get::<Option<String>, _>("name")?.unwrap_or_default(),
            status,
            role: Role::new(row.try_get::<String, _>("role_name")?, allowed_actions),
        }))
    }
}
