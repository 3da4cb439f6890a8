//! Best-effort access log recording.
//!
//! Every gated request produces exactly one record. A failed write is reported
//! on the operational log and otherwise ignored: audit outages must not turn
//! into request failures.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use routeguard_auth::{Decision, peek_subject};
use routeguard_infra::{AccessLogRecord, AccessLogStore};

use crate::context::RequestInfo;

#[derive(Clone)]
pub struct AccessLogRecorder {
    store: Arc<dyn AccessLogStore>,
    service: String,
}

impl AccessLogRecorder {
    pub fn new(store: Arc<dyn AccessLogStore>, service: impl Into<String>) -> Self {
        Self {
            store,
            service: service.into(),
        }
    }

    /// Build the record for a decision. The subject is read from the header
    /// without verification, whatever the decision was.
    pub fn build_record(&self, request: &RequestInfo, decision: &Decision) -> AccessLogRecord {
        AccessLogRecord {
            id: Uuid::now_v7(),
            endpoint: request.original_url.clone(),
            http_verb: request.method.clone(),
            attempt_timestamp: Utc::now(),
            user_cpf: peek_subject(request.authorization.as_deref()),
            is_accepted: decision.is_accepted(),
            message: decision.message().map(str::to_string),
            service: self.service.clone(),
        }
    }

    /// Persist one record. Never fails.
    pub async fn record(&self, request: &RequestInfo, decision: &Decision) {
        let record = self.build_record(request, decision);
        let id = record.id;

        if let Err(e) = self.store.create(record).await {
            tracing::error!(
                error = %e,
                record_id = %id,
                method = %request.method,
                endpoint = %request.original_url,
                "failed to write access log record"
            );
        }
    }
}

impl core::fmt::Debug for AccessLogRecorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AccessLogRecorder")
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
