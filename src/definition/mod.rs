//! Alert definitions: metadata, reporting templates, and file loading

pub mod alert;
pub mod loader;

pub use alert::{AlertDefinition, AlertSource, ReportingTemplate};
pub use loader::{load_definitions, parse_definitions, DefinitionError};
