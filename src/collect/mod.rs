//! Result collection and forwarding

pub mod collector;
pub mod forwarder;
pub mod record;

pub use collector::{AlertCollector, AlertSink, LogSink};
pub use forwarder::{ForwarderError, ResultForwarder};
pub use record::AlertRecord;
