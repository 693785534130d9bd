//! Normalized alert result record

use serde::{Deserialize, Serialize};

use crate::execution::state::AlertState;

/// Uniform record emitted for every alert execution.
///
/// Metadata-derived fields are `None` (serialized as null) when the
/// definition does not carry the key. Records are never mutated after
/// emission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub name: Option<String>,
    pub label: Option<String>,
    pub state: AlertState,
    /// Reporting template formatted with the check's result arguments
    pub text: String,
    pub cluster: String,
    pub host: String,
    pub service: Option<String>,
    pub component: Option<String>,
    /// Emission time, unix millis
    pub timestamp: i64,
}
