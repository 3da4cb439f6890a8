//! Postgres-backed access log.
//!
//! Writes to `user_endpoint_access_logs`; rows are never updated.

use sqlx::PgPool;

use super::r#trait::{AccessLogRecord, AccessLogStore};
use crate::StoreError;

pub struct PostgresAccessLogStore {
    pool: PgPool,
}

impl PostgresAccessLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccessLogStore for PostgresAccessLogStore {
    async fn create(&self, record: AccessLogRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO user_endpoint_access_logs (
                id,
                endpoint,
                http_verb,
                attempt_timestamp,
                user_cpf,
                is_accepted,
                message,
                service
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(record.id)
        .bind(record.endpoint)
        .bind(record.http_verb)
        .bind(record.attempt_timestamp)
        .bind(record.user_cpf.map(String::from))
        .bind(record.is_accepted)
        .bind(record.message)
        .bind(record.service)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
