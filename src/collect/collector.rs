//! Result sinks and the in-memory collector

use std::collections::HashMap;

use parking_lot::RwLock;

use super::record::AlertRecord;
use crate::execution::state::AlertState;

/// Destination for normalized alert records
pub trait AlertSink: Send + Sync {
    /// Accept one record for the given cluster. Delivery guarantees are
    /// the sink's responsibility.
    fn put(&self, cluster: &str, record: AlertRecord);
}

/// In-memory sink buffering the latest record per (cluster, alert name)
/// until a forwarder drains it
#[derive(Debug, Default)]
pub struct AlertCollector {
    /// cluster -> alert name -> latest record
    buffer: RwLock<HashMap<String, HashMap<String, AlertRecord>>>,
}

impl AlertCollector {
    pub fn new() -> Self {
        Self {
            buffer: RwLock::new(HashMap::new()),
        }
    }

    /// Remove and return all buffered records
    pub fn drain(&self) -> Vec<AlertRecord> {
        let mut buffer = self.buffer.write();
        buffer
            .drain()
            .flat_map(|(_, by_name)| by_name.into_values())
            .collect()
    }

    /// Number of buffered records
    pub fn len(&self) -> usize {
        self.buffer.read().values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for AlertCollector {
    fn put(&self, cluster: &str, record: AlertRecord) {
        let name = record.name.clone().unwrap_or_default();
        let mut buffer = self.buffer.write();
        buffer
            .entry(cluster.to_string())
            .or_default()
            .insert(name, record);
    }
}

/// Sink that emits records through tracing, leveled by state
pub struct LogSink;

impl AlertSink for LogSink {
    fn put(&self, cluster: &str, record: AlertRecord) {
        match record.state {
            AlertState::Critical | AlertState::Warning => tracing::warn!(
                cluster = %cluster,
                alert = ?record.name,
                state = %record.state,
                "{}",
                record.text
            ),
            AlertState::Unknown => tracing::debug!(
                cluster = %cluster,
                alert = ?record.name,
                state = %record.state,
                "{}",
                record.text
            ),
            AlertState::Ok => tracing::info!(
                cluster = %cluster,
                alert = ?record.name,
                state = %record.state,
                "{}",
                record.text
            ),
        }
    }
}
