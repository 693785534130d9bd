//! Alert execution and result normalization
//!
//! The executor wraps one concrete check and guarantees that every
//! execution produces exactly one well-formed record, no matter how the
//! check itself behaves.

use std::collections::HashMap;
use std::sync::Arc;

use crate::collect::collector::AlertSink;
use crate::collect::record::AlertRecord;
use crate::definition::alert::AlertDefinition;

use super::lookup::LookupResolver;
use super::state::AlertState;

/// Reporting text used when the check fails or no template matches
const DEFAULT_TEXT: &str = "Unknown {0}";

/// Alert check errors
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("{0}")]
    Failed(String),

    #[error("Missing configuration value: {0}")]
    MissingConfig(String),

    #[error("I/O failure: {0}")]
    Io(#[from] std::io::Error),
}

/// The check-specific hook every concrete alert variant implements.
///
/// Returns the health state plus the ordered arguments for that state's
/// reporting template. The resolver gives parameterized-configuration
/// access; keys registered through it persist for the life of the
/// executor instance.
pub trait AlertCheck: Send + Sync {
    fn perform_check(
        &mut self,
        resolver: &mut LookupResolver,
    ) -> Result<(AlertState, Vec<String>), CheckError>;
}

impl<F> AlertCheck for F
where
    F: FnMut(&mut LookupResolver) -> Result<(AlertState, Vec<String>), CheckError> + Send + Sync,
{
    fn perform_check(
        &mut self,
        resolver: &mut LookupResolver,
    ) -> Result<(AlertState, Vec<String>), CheckError> {
        (self)(resolver)
    }
}

/// Runs one alert check and emits a normalized record to the sink.
///
/// `execute` is fail-closed: check failures, missing templates, and
/// formatting mismatches all degrade to an UNKNOWN record instead of
/// surfacing to the scheduler. Missing metadata and configuration values
/// degrade to nulls rather than aborting the run.
pub struct AlertExecutor {
    definition: AlertDefinition,
    check: Box<dyn AlertCheck>,
    resolver: LookupResolver,
    sink: Option<Arc<dyn AlertSink>>,
    cluster: String,
    host: String,
}

impl AlertExecutor {
    pub fn new(definition: AlertDefinition, check: Box<dyn AlertCheck>) -> Self {
        Self {
            definition,
            check,
            resolver: LookupResolver::new(),
            sink: None,
            cluster: String::new(),
            host: String::new(),
        }
    }

    /// Inject the result sink and runtime configuration values. These
    /// become known only after the executor exists, so they are attached
    /// separately from construction.
    pub fn attach_runtime(
        &mut self,
        sink: Arc<dyn AlertSink>,
        config_values: HashMap<String, String>,
    ) {
        self.sink = Some(sink);
        self.resolver.set_values(config_values);
    }

    /// Record the cluster/host identifiers used to tag emitted records
    pub fn set_cluster(&mut self, cluster: impl Into<String>, host: impl Into<String>) {
        self.cluster = cluster.into();
        self.host = host.into();
    }

    /// The definition's run interval, clamped to a minimum of 1
    pub fn interval(&self) -> u64 {
        self.definition.interval()
    }

    pub fn definition(&self) -> &AlertDefinition {
        &self.definition
    }

    /// Lookup keys accumulated across this executor's executions
    pub fn lookup_keys(&self) -> &[String] {
        self.resolver.keys()
    }

    /// Run the check once and emit exactly one record. Never panics and
    /// never returns an error; every failure mode collapses into an
    /// UNKNOWN record with a human-readable cause.
    pub fn execute(&mut self) {
        let (state, args, template) = match self.check.perform_check(&mut self.resolver) {
            Ok((state, args)) => {
                let template = self
                    .definition
                    .reporting_text(state)
                    .unwrap_or(DEFAULT_TEXT)
                    .to_string();
                (state, args, template)
            }
            Err(e) => {
                tracing::error!(
                    alert = ?self.definition.find_value("name"),
                    error = %e,
                    "alert check failed"
                );
                (AlertState::Unknown, vec![e.to_string()], DEFAULT_TEXT.to_string())
            }
        };

        // A template whose placeholders exceed the argument list falls
        // back to the default text, and failing that to a bare marker.
        let text = format_text(&template, &args)
            .or_else(|| format_text(DEFAULT_TEXT, &args))
            .unwrap_or_else(|| "Unknown".to_string());

        let record = AlertRecord {
            name: self.definition.find_value("name"),
            label: self.definition.find_value("label"),
            state,
            text,
            cluster: self.cluster.clone(),
            host: self.host.clone(),
            service: self.definition.find_value("service"),
            component: self.definition.find_value("componentName"),
            timestamp: chrono::Utc::now().timestamp_millis(),
        };

        match &self.sink {
            Some(sink) => sink.put(&self.cluster, record),
            None => tracing::warn!(
                alert = ?record.name,
                "no result sink attached, dropping alert record"
            ),
        }
    }
}

/// Substitute positional `{N}` placeholders with the argument list.
/// Returns `None` when a placeholder has no matching argument.
fn format_text(template: &str, args: &[String]) -> Option<String> {
    let re = regex::Regex::new(r"\{(\d+)\}").ok()?;
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in re.captures_iter(template) {
        let token = caps.get(0)?;
        let index: usize = caps.get(1)?.as_str().parse().ok()?;
        let arg = args.get(index)?;
        out.push_str(&template[last..token.start()]);
        out.push_str(arg);
        last = token.end();
    }

    out.push_str(&template[last..]);
    Some(out)
}
