use std::sync::Arc;

use chrono::{DateTime, Utc};
use routeguard_auth::SubjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::StoreError;

/// A single gate decision, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessLogRecord {
    pub id: Uuid,

    /// Original URL, query string included.
    pub endpoint: String,
    pub http_verb: String,
    pub attempt_timestamp: DateTime<Utc>,

    /// Subject read from the token without verification; `None` when unreadable.
    #[serde(rename = "userCPF")]
    pub user_cpf: Option<SubjectId>,

    pub is_accepted: bool,
    pub message: Option<String>,

    /// Tag identifying the subsystem that produced the record.
    pub service: String,
}

/// Append-only sink for access log records.
#[async_trait::async_trait]
pub trait AccessLogStore: Send + Sync {
    async fn create(&self, record: AccessLogRecord) -> Result<(), StoreError>;
}

#[async_trait::async_trait]
impl<S> AccessLogStore for Arc<S>
where
    S: AccessLogStore + ?Sized,
{
    async fn create(&self, record: AccessLogRecord) -> Result<(), StoreError> {
        (**self).create(record).await
    }
}
