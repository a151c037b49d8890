use std::{sync::Arc, time::Duration};

use dce_model::PodStatus;
use tracing::{debug, error, instrument, trace, warn};

use crate::{
    HookConfig,
    chain::{HookReport, bounded, resolve},
    error::HookError,
    hook::{HookStage, PodStatusHook, StatusData},
    registry::Extensions,
};

/// Pod status hooks resolved in execution order.
///
/// A failure flagged `fail_exec` aborts the sequence; any other failure is
/// logged, recorded and the next hook runs. A timed out hook counts as a
/// best-effort failure.
#[derive(Clone, Default)]
pub struct StatusHookChain {
    hooks: Vec<(String, Arc<dyn PodStatusHook>)>,
    timeout: Option<Duration>,
}

impl StatusHookChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `cfg.pod_status_hooks` against the registry.
    pub fn from_config(ext: &Extensions, cfg: &HookConfig) -> Self {
        let hooks = resolve(&ext.pod_status_hooks, &cfg.pod_status_hooks);
        debug!(target: "dce.plugin.status", hooks = hooks.len(), "status hook chain resolved");
        Self {
            hooks,
            timeout: cfg.hook_timeout(),
        }
    }

    pub fn with_hook(mut self, name: impl Into<String>, hook: Arc<dyn PodStatusHook>) -> Self {
        self.hooks.push((name.into(), hook));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    #[instrument(level = "debug", skip_all, fields(%status))]
    pub async fn execute(
        &self,
        status: PodStatus,
        data: &StatusData,
    ) -> Result<HookReport, HookError> {
        let stage = HookStage::PodStatus;
        let mut report = HookReport::new();

        if self.hooks.is_empty() {
            trace!(target: "dce.plugin.status", "no status hooks configured; skipping");
            return Ok(report);
        }

        for (name, hook) in &self.hooks {
            trace!(target: "dce.plugin.status", hook = %name, "running status hook");
            match bounded(self.timeout, stage, name, hook.execute(status, data)).await {
                Ok(Ok(())) => {}
                Ok(Err(failure)) if failure.fail_exec => {
                    error!(target: "dce.plugin.status", hook = %name, error = %failure.error, "status hook failed; aborting");
                    return Err(HookError::plugin(name, stage, failure.error));
                }
                Ok(Err(failure)) => {
                    warn!(target: "dce.plugin.status", hook = %name, error = %failure.error, "status hook failed; continuing");
                    report.push(name, stage, failure.error);
                }
                Err(timeout) => {
                    warn!(target: "dce.plugin.status", hook = %name, error = %timeout, "status hook timed out; continuing");
                    report.push(name, stage, timeout);
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dce_model::TaskInfo;
    use std::sync::Mutex;

    use crate::{HookFailure, PluginError};

    type Seen = Arc<Mutex<Vec<(String, PodStatus)>>>;

    enum Outcome {
        Ok,
        Fatal,
        Soft,
        Hang,
    }

    struct Recorder {
        name: &'static str,
        seen: Seen,
        outcome: Outcome,
    }

    impl Recorder {
        fn arc(name: &'static str, seen: &Seen, outcome: Outcome) -> Arc<dyn PodStatusHook> {
            Arc::new(Self {
                name,
                seen: Arc::clone(seen),
                outcome,
            })
        }
    }

    #[async_trait]
    impl PodStatusHook for Recorder {
        async fn execute(&self, status: PodStatus, data: &StatusData) -> Result<(), HookFailure> {
            let task = data
                .downcast_ref::<TaskInfo>()
                .ok_or_else(|| HookFailure::fatal(PluginError::InvalidInput("not a task".into())))?;
            self.seen
                .lock()
                .unwrap()
                .push((format!("{}@{}", self.name, task.task_id), status));

            match self.outcome {
                Outcome::Ok => Ok(()),
                Outcome::Fatal => Err(HookFailure::fatal(PluginError::failed("fatal"))),
                Outcome::Soft => Err(HookFailure::best_effort(PluginError::failed("soft"))),
                Outcome::Hang => {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    Ok(())
                }
            }
        }
    }

    fn seen_names(seen: &Seen) -> Vec<String> {
        seen.lock().unwrap().iter().map(|(n, _)| n.clone()).collect()
    }

    #[tokio::test]
    async fn empty_chain_is_noop() {
        let chain = StatusHookChain::new();
        let task = TaskInfo::new("t1", "web");
        let report = chain.execute(PodStatus::Running, &task).await.unwrap();
        assert!(report.is_clean());
    }

    #[tokio::test]
    async fn all_hooks_see_status_and_payload() {
        let seen = Seen::default();
        let chain = StatusHookChain::new()
            .with_hook("a", Recorder::arc("a", &seen, Outcome::Ok))
            .with_hook("b", Recorder::arc("b", &seen, Outcome::Ok));
        let task = TaskInfo::new("t1", "web");

        let report = chain.execute(PodStatus::Starting, &task).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(
            seen.lock().unwrap().clone(),
            vec![
                ("a@t1".to_string(), PodStatus::Starting),
                ("b@t1".to_string(), PodStatus::Starting),
            ]
        );
    }

    #[tokio::test]
    async fn best_effort_failure_continues() {
        let seen = Seen::default();
        let chain = StatusHookChain::new()
            .with_hook("soft", Recorder::arc("soft", &seen, Outcome::Soft))
            .with_hook("after", Recorder::arc("after", &seen, Outcome::Ok));
        let task = TaskInfo::new("t1", "web");

        let report = chain.execute(PodStatus::Running, &task).await.unwrap();
        assert_eq!(seen_names(&seen), vec!["soft@t1", "after@t1"]);
        assert_eq!(report.len(), 1);
        assert_eq!(report.failures()[0].plugin, "soft");
        assert_eq!(report.failures()[0].error, "soft");
    }

    #[tokio::test]
    async fn fatal_failure_aborts() {
        let seen = Seen::default();
        let chain = StatusHookChain::new()
            .with_hook("fatal", Recorder::arc("fatal", &seen, Outcome::Fatal))
            .with_hook("after", Recorder::arc("after", &seen, Outcome::Ok));
        let task = TaskInfo::new("t1", "web");

        let err = chain.execute(PodStatus::Failed, &task).await.unwrap_err();
        assert_eq!(seen_names(&seen), vec!["fatal@t1"]);
        assert_eq!(err.plugin_name(), Some("fatal"));
        assert_eq!(err.stage(), HookStage::PodStatus);
    }

    #[tokio::test]
    async fn wrong_payload_is_reported_by_hook() {
        let seen = Seen::default();
        let chain =
            StatusHookChain::new().with_hook("a", Recorder::arc("a", &seen, Outcome::Ok));

        let err = chain
            .execute(PodStatus::Running, &"not a task")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HookError::Plugin {
                source: PluginError::InvalidInput(_),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn timed_out_hook_is_best_effort() {
        let seen = Seen::default();
        let chain = StatusHookChain::new()
            .with_hook("hang", Recorder::arc("hang", &seen, Outcome::Hang))
            .with_hook("after", Recorder::arc("after", &seen, Outcome::Ok))
            .with_timeout(Duration::from_millis(20));
        let task = TaskInfo::new("t1", "web");

        let report = chain.execute(PodStatus::Running, &task).await.unwrap();
        assert_eq!(seen_names(&seen), vec!["hang@t1", "after@t1"]);
        assert_eq!(report.len(), 1);
        assert!(report.failures()[0].error.contains("timed out"));
    }

    #[test]
    fn from_config_resolves_registered_hooks() {
        let seen = Seen::default();
        let ext = Extensions::new();
        ext.register_pod_status_hook("journal", Recorder::arc("journal", &seen, Outcome::Ok));

        let cfg = HookConfig::new().with_pod_status_hooks(["missing", "journal"]);
        let chain = StatusHookChain::from_config(&ext, &cfg);
        assert_eq!(chain.names(), vec!["journal"]);
    }

    #[test]
    fn from_config_runs_repeated_hook_once() {
        let seen = Seen::default();
        let ext = Extensions::new();
        ext.register_pod_status_hook("journal", Recorder::arc("journal", &seen, Outcome::Ok));
        ext.register_pod_status_hook("audit", Recorder::arc("audit", &seen, Outcome::Ok));

        let cfg = HookConfig::new().with_pod_status_hooks(["journal", "audit", "journal"]);
        let chain = StatusHookChain::from_config(&ext, &cfg);
        assert_eq!(chain.names(), vec!["journal", "audit"]);
    }
}
