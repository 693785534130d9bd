//! Health state classification for check results

use std::fmt;

use serde::{Deserialize, Serialize};

/// Health state produced by an alert check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl AlertState {
    /// Uppercase wire form of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertState::Ok => "OK",
            AlertState::Warning => "WARNING",
            AlertState::Critical => "CRITICAL",
            AlertState::Unknown => "UNKNOWN",
        }
    }

    /// Lowercase key used to select a reporting template
    pub fn reporting_key(&self) -> &'static str {
        match self {
            AlertState::Ok => "ok",
            AlertState::Warning => "warning",
            AlertState::Critical => "critical",
            AlertState::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AlertState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
