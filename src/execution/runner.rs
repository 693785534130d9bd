//! Background runner executing registered alerts on their intervals

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tokio::time::interval;

use super::executor::AlertExecutor;

/// Runs registered alert executors on a background task, each on its own
/// definition-supplied interval (in minutes)
pub struct AlertRunner {
    /// Executors keyed by alert name
    executors: Arc<RwLock<HashMap<String, AlertExecutor>>>,
    /// Shutdown signal sender
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl AlertRunner {
    pub fn new() -> Self {
        Self {
            executors: Arc::new(RwLock::new(HashMap::new())),
            shutdown_tx: None,
        }
    }

    /// Register an executor under its definition's name. A nameless
    /// definition is registered under the empty key and overwrites any
    /// previous nameless registration.
    pub fn register(&self, executor: AlertExecutor) {
        let name = executor.definition().find_value("name").unwrap_or_default();
        if name.is_empty() {
            tracing::warn!("registering alert executor with no name");
        }
        let mut executors = self.executors.write();
        executors.insert(name, executor);
    }

    /// Unregister an executor by alert name
    pub fn unregister(&self, name: &str) -> Option<AlertExecutor> {
        let mut executors = self.executors.write();
        executors.remove(name)
    }

    /// Names of all registered alerts
    pub fn names(&self) -> Vec<String> {
        let executors = self.executors.read();
        executors.keys().cloned().collect()
    }

    /// Start the background loop; `tick` controls how often due-ness is
    /// evaluated, not how often individual alerts run
    pub fn start(&mut self, tick: Duration) -> tokio::task::JoinHandle<()> {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        self.shutdown_tx = Some(shutdown_tx);

        let executors = Arc::clone(&self.executors);

        tokio::spawn(async move {
            let mut ticker = interval(tick);
            let mut last_runs: HashMap<String, Instant> = HashMap::new();

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        Self::run_due(&executors, &mut last_runs);
                    }
                    _ = shutdown_rx.recv() => {
                        tracing::info!("alert runner shutting down");
                        break;
                    }
                }
            }
        })
    }

    /// Stop the background loop
    pub async fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(()).await;
        }
    }

    /// Execute every alert whose interval has elapsed. Each execution is
    /// fail-closed, so one misbehaving check cannot take down the loop.
    fn run_due(
        executors: &Arc<RwLock<HashMap<String, AlertExecutor>>>,
        last_runs: &mut HashMap<String, Instant>,
    ) {
        let due: Vec<String> = {
            let executors = executors.read();
            executors
                .iter()
                .filter(|(name, executor)| {
                    let period = Duration::from_secs(executor.interval() * 60);
                    last_runs
                        .get(*name)
                        .map(|t| t.elapsed() >= period)
                        .unwrap_or(true)
                })
                .map(|(name, _)| name.clone())
                .collect()
        };

        for name in due {
            last_runs.insert(name.clone(), Instant::now());

            let mut executors = executors.write();
            if let Some(executor) = executors.get_mut(&name) {
                tracing::debug!(alert = %name, "running alert check");
                executor.execute();
            }
        }
    }
}

impl Default for AlertRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collect::collector::AlertCollector;
    use crate::execution::executor::{AlertCheck, CheckError};
    use crate::execution::lookup::LookupResolver;
    use crate::execution::state::AlertState;
    use crate::definition::alert::{AlertDefinition, AlertSource};
    use serde_json::json;

    struct AlwaysOk;

    impl AlertCheck for AlwaysOk {
        fn perform_check(
            &mut self,
            _resolver: &mut LookupResolver,
        ) -> Result<(AlertState, Vec<String>), CheckError> {
            Ok((AlertState::Ok, vec!["fine".to_string()]))
        }
    }

    fn executor(name: &str, collector: Arc<AlertCollector>) -> AlertExecutor {
        let meta = match json!({ "name": name, "interval": 1 }) {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let definition = AlertDefinition::new(meta, AlertSource::default());
        let mut executor = AlertExecutor::new(definition, Box::new(AlwaysOk));
        executor.attach_runtime(collector, HashMap::new());
        executor.set_cluster("c1", "h1");
        executor
    }

    #[test]
    fn test_register_and_unregister() {
        let runner = AlertRunner::new();
        let collector = Arc::new(AlertCollector::new());
        runner.register(executor("cpu_check", collector.clone()));
        runner.register(executor("mem_check", collector));

        let mut names = runner.names();
        names.sort();
        assert_eq!(names, ["cpu_check", "mem_check"]);

        assert!(runner.unregister("cpu_check").is_some());
        assert!(runner.unregister("cpu_check").is_none());
        assert_eq!(runner.names(), ["mem_check"]);
    }

    #[tokio::test]
    async fn test_runner_executes_due_alerts() {
        let collector = Arc::new(AlertCollector::new());
        let mut runner = AlertRunner::new();
        runner.register(executor("cpu_check", collector.clone()));

        let handle = runner.start(Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(60)).await;
        runner.stop().await;
        let _ = handle.await;

        // first tick runs every alert once; the 1-minute interval keeps
        // it from running again within this test
        let records = collector.drain();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, Some("cpu_check".to_string()));
        assert_eq!(records[0].state, AlertState::Ok);
    }
}
