//! Spotter: Agent-Side Alert Check Execution
//!
//! The alert-check core of a monitoring agent: definitions describe what
//! to watch, concrete checks plug in through a single-method trait, and
//! every execution produces exactly one normalized record regardless of
//! how the check behaves.
//!
//! # Features
//!
//! - **Fail-Closed Execution**: check failures, missing templates, and
//!   placeholder mismatches degrade to UNKNOWN records, never errors
//! - **Reporting Templates**: per-state text with positional placeholders
//! - **Parameterized Configuration**: `{{path.to.value}}` references
//!   resolved against a runtime value table
//! - **Definition Files**: JSON definition loading
//! - **Collector + Forwarder**: in-memory buffering with periodic HTTP
//!   batch delivery
//! - **Background Runner**: interval-driven execution of registered alerts
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! use spotter::{parse_definitions, AlertCollector, AlertExecutor, AlertState};
//! use spotter::{AlertCheck, CheckError, LookupResolver};
//!
//! struct HeartbeatCheck;
//!
//! impl AlertCheck for HeartbeatCheck {
//!     fn perform_check(
//!         &mut self,
//!         _resolver: &mut LookupResolver,
//!     ) -> Result<(AlertState, Vec<String>), CheckError> {
//!         Ok((AlertState::Ok, vec!["0.003".to_string()]))
//!     }
//! }
//!
//! let definitions = parse_definitions(r#"{
//!     "definitions": [{
//!         "name": "agent_heartbeat",
//!         "label": "Agent Heartbeat",
//!         "interval": 2,
//!         "source": {
//!             "reporting": { "ok": { "text": "Heartbeat OK: {0}s" } }
//!         }
//!     }]
//! }"#).unwrap();
//!
//! let collector = Arc::new(AlertCollector::new());
//! let definition = definitions.into_iter().next().unwrap();
//! let mut executor = AlertExecutor::new(definition, Box::new(HeartbeatCheck));
//! executor.attach_runtime(collector.clone(), HashMap::new());
//! executor.set_cluster("prod", "host-01");
//! executor.execute();
//!
//! let records = collector.drain();
//! assert_eq!(records[0].text, "Heartbeat OK: 0.003s");
//! ```

pub mod collect;
pub mod definition;
pub mod execution;

// Re-export commonly used types
pub use collect::{AlertCollector, AlertRecord, AlertSink, LogSink, ResultForwarder};
pub use definition::{load_definitions, parse_definitions, AlertDefinition, AlertSource};
pub use execution::{AlertCheck, AlertExecutor, AlertRunner, AlertState, CheckError, LookupResolver};
