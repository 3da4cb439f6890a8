use std::collections::VecDeque;
use std::sync::RwLock;

use super::r#trait::{AccessLogRecord, AccessLogStore};
use crate::StoreError;

/// In-memory access log for tests/dev. Records are kept in write order.
///
/// A bounded store drops its oldest record once `capacity` is reached.
#[derive(Debug, Default)]
pub struct InMemoryAccessLogStore {
    records: RwLock<VecDeque<AccessLogRecord>>,
    capacity: Option<usize>,
}

impl InMemoryAccessLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most the `capacity` most recent records.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            records: RwLock::default(),
            capacity: Some(capacity),
        }
    }

    pub fn records(&self) -> Vec<AccessLogRecord> {
        self.records
            .read()
            .map(|r| r.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<AccessLogRecord> {
        self.records.read().ok()?.back().cloned()
    }
}

#[async_trait::async_trait]
impl AccessLogStore for InMemoryAccessLogStore {
    async fn create(&self, record: AccessLogRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::unavailable("access log lock poisoned"))?;
        records.push_back(record);
        if let Some(capacity) = self.capacity {
            while records.len() > capacity {
                records.pop_front();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use routeguard_auth::SubjectId;
    use uuid::Uuid;

    use super::*;

    fn record(endpoint: &str, accepted: bool) -> AccessLogRecord {
        AccessLogRecord {
            id: Uuid::now_v7(),
            endpoint: endpoint.to_string(),
            http_verb: "GET".to_string(),
            attempt_timestamp: Utc::now(),
            user_cpf: Some(SubjectId::new("1")),
            is_accepted: accepted,
            message: (!accepted).then(|| "Permissão negada!".to_string()),
            service: "Role".to_string(),
        }
    }

    #[tokio::test]
    async fn keeps_records_in_write_order() {
        let store = InMemoryAccessLogStore::new();
        assert!(store.is_empty());

        store.create(record("/a", true)).await.unwrap();
        store.create(record("/b?x=1", false)).await.unwrap();

        let endpoints: Vec<String> = store.records().into_iter().map(|r| r.endpoint).collect();
        assert_eq!(endpoints, vec!["/a", "/b?x=1"]);
        assert_eq!(store.last().unwrap().message.as_deref(), Some("Permissão negada!"));
    }

    #[tokio::test]
    async fn bounded_store_drops_oldest_records() {
        let store = InMemoryAccessLogStore::bounded(2);

        for endpoint in ["/a", "/b", "/c"] {
            store.create(record(endpoint, true)).await.unwrap();
        }

        let endpoints: Vec<String> = store.records().into_iter().map(|r| r.endpoint).collect();
        assert_eq!(endpoints, vec!["/b", "/c"]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let json = serde_json::to_value(record("/", true)).unwrap();
        for key in ["endpoint", "httpVerb", "attemptTimestamp", "userCPF", "isAccepted", "message", "service"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json["message"].is_null());
    }
}
