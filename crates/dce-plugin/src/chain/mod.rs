//! Ordered execution of registered hooks.

mod report;
pub use report::{HookReport, ReportEntry};

mod status;
pub use status::StatusHookChain;

use std::{collections::HashSet, future::Future, path::PathBuf, sync::Arc, time::Duration};

use dce_model::{ExecutorId, PodStatus, TaskInfo};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument, trace, warn};

use crate::{
    ExecutorDriver, HookConfig, HookContext,
    error::{HookError, PluginError},
    hook::{ComposePlugin, HookStage},
    registry::{ExtensionPoint, Extensions},
};

/// Await `fut`, failing with [`HookError::Timeout`] once `limit` elapses.
pub(crate) async fn bounded<F: Future>(
    limit: Option<Duration>,
    stage: HookStage,
    plugin: &str,
    fut: F,
) -> Result<F::Output, HookError> {
    match limit {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| HookError::Timeout {
                plugin: plugin.to_string(),
                stage,
                timeout_ms: whole_millis(limit),
            }),
        None => Ok(fut.await),
    }
}

/// Milliseconds in `limit`, saturating at `u64::MAX`.
pub(crate) fn whole_millis(limit: Duration) -> u64 {
    u64::try_from(limit.as_millis()).unwrap_or(u64::MAX)
}

/// Look up `names` in order; unknown names are logged and skipped.
///
/// A name listed more than once resolves only at its first position.
pub(crate) fn resolve<T: ?Sized>(
    point: &ExtensionPoint<T>,
    names: &[String],
) -> Vec<(String, Arc<T>)> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| {
            let first = seen.insert(name.as_str());
            if !first {
                warn!(target: "dce.plugin.chain", kind = point.kind(), name = %name, "extension listed twice; keeping first position");
            }
            first
        })
        .filter_map(|name| match point.lookup(name) {
            Some(ext) => Some((name.clone(), ext)),
            None => {
                warn!(target: "dce.plugin.chain", kind = point.kind(), name = %name, "configured extension is not registered; skipping");
                None
            }
        })
        .collect()
}

/// Compose plugins resolved in execution order.
///
/// Launch stages stop at the first failing plugin.
/// Kill and shutdown stages run every plugin and collect failures in a [`HookReport`].
#[derive(Clone, Default)]
pub struct ComposeChain {
    plugins: Vec<(String, Arc<dyn ComposePlugin>)>,
    timeout: Option<Duration>,
}

impl ComposeChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `cfg.plugin_order` against the registry.
    pub fn from_config(ext: &Extensions, cfg: &HookConfig) -> Self {
        let plugins = resolve(&ext.compose_plugins, &cfg.plugin_order);
        debug!(target: "dce.plugin.chain", plugins = plugins.len(), "compose chain resolved");
        Self {
            plugins,
            timeout: cfg.hook_timeout(),
        }
    }

    /// Append a plugin under its own name.
    pub fn with_plugin(mut self, plugin: Arc<dyn ComposePlugin>) -> Self {
        self.plugins.push((plugin.name().to_string(), plugin));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    #[instrument(level = "debug", skip_all, fields(stage = "pre_image_pull", task = %task.task_id))]
    pub async fn pre_image_pull(
        &self,
        ctx: &mut HookContext,
        compose_files: &mut Vec<PathBuf>,
        executor_id: &ExecutorId,
        task: &mut TaskInfo,
    ) -> Result<(), HookError> {
        self.image_pull_stage(HookStage::PreImagePull, ctx, compose_files, executor_id, task)
            .await
    }

    #[instrument(level = "debug", skip_all, fields(stage = "post_image_pull", task = %task.task_id))]
    pub async fn post_image_pull(
        &self,
        ctx: &mut HookContext,
        compose_files: &mut Vec<PathBuf>,
        executor_id: &ExecutorId,
        task: &mut TaskInfo,
    ) -> Result<(), HookError> {
        self.image_pull_stage(HookStage::PostImagePull, ctx, compose_files, executor_id, task)
            .await
    }

    /// Run post-launch hooks and return the resulting pod status.
    ///
    /// A plugin reporting a failure status stops the chain and that status is returned.
    /// An empty chain reports [`PodStatus::Running`].
    #[instrument(level = "debug", skip_all, fields(stage = "post_launch", task = %task.task_id))]
    pub async fn post_launch(
        &self,
        ctx: &mut HookContext,
        compose_files: &[PathBuf],
        task: &TaskInfo,
    ) -> Result<PodStatus, HookError> {
        let stage = HookStage::PostLaunch;
        let cancel = ctx.cancellation().clone();
        let mut status = PodStatus::Running;

        for (name, plugin) in &self.plugins {
            trace!(target: "dce.plugin.chain", plugin = %name, %stage, "running hook");
            let fut = plugin.post_launch_task(ctx, compose_files, task);
            status = self
                .call(stage, name, Some(&cancel), fut)
                .await
                .inspect_err(|e| error!(target: "dce.plugin.chain", plugin = %name, error = %e, "hook failed"))?;

            if status.is_failure() {
                warn!(target: "dce.plugin.chain", plugin = %name, %status, "plugin reported failed pod");
                return Ok(status);
            }
        }
        Ok(status)
    }

    #[instrument(level = "debug", skip_all, fields(stage = "pre_kill", task = %task.task_id))]
    pub async fn pre_kill(&self, task: &TaskInfo) -> HookReport {
        self.kill_stage(HookStage::PreKill, task).await
    }

    #[instrument(level = "debug", skip_all, fields(stage = "post_kill", task = %task.task_id))]
    pub async fn post_kill(&self, task: &TaskInfo) -> HookReport {
        self.kill_stage(HookStage::PostKill, task).await
    }

    #[instrument(level = "debug", skip_all, fields(stage = "shutdown"))]
    pub async fn shutdown(&self, driver: &dyn ExecutorDriver) -> HookReport {
        let stage = HookStage::Shutdown;
        let mut report = HookReport::new();

        for (name, plugin) in &self.plugins {
            trace!(target: "dce.plugin.chain", plugin = %name, %stage, "running hook");
            if let Err(e) = self.call(stage, name, None, plugin.shutdown(driver)).await {
                warn!(target: "dce.plugin.chain", plugin = %name, error = %e, "shutdown hook failed; continuing");
                report.push(name, stage, e);
            }
        }
        report
    }

    async fn image_pull_stage(
        &self,
        stage: HookStage,
        ctx: &mut HookContext,
        compose_files: &mut Vec<PathBuf>,
        executor_id: &ExecutorId,
        task: &mut TaskInfo,
    ) -> Result<(), HookError> {
        let cancel = ctx.cancellation().clone();

        for (name, plugin) in &self.plugins {
            trace!(target: "dce.plugin.chain", plugin = %name, %stage, "running hook");
            let fut = match stage {
                HookStage::PreImagePull => {
                    plugin.launch_task_pre_image_pull(ctx, compose_files, executor_id, task)
                }
                _ => plugin.launch_task_post_image_pull(ctx, compose_files, executor_id, task),
            };
            self.call(stage, name, Some(&cancel), fut)
                .await
                .inspect_err(|e| error!(target: "dce.plugin.chain", plugin = %name, error = %e, "hook failed"))?;
        }
        Ok(())
    }

    async fn kill_stage(&self, stage: HookStage, task: &TaskInfo) -> HookReport {
        let mut report = HookReport::new();

        for (name, plugin) in &self.plugins {
            trace!(target: "dce.plugin.chain", plugin = %name, %stage, "running hook");
            let fut = match stage {
                HookStage::PreKill => plugin.pre_kill_task(task),
                _ => plugin.post_kill_task(task),
            };
            if let Err(e) = self.call(stage, name, None, fut).await {
                warn!(target: "dce.plugin.chain", plugin = %name, error = %e, "kill hook failed; continuing");
                report.push(name, stage, e);
            }
        }
        report
    }

    async fn call<T, F>(
        &self,
        stage: HookStage,
        plugin: &str,
        cancel: Option<&CancellationToken>,
        fut: F,
    ) -> Result<T, HookError>
    where
        F: Future<Output = Result<T, PluginError>>,
    {
        let guarded = async {
            bounded(self.timeout, stage, plugin, fut)
                .await?
                .map_err(|e| HookError::plugin(plugin, stage, e))
        };

        match cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => Err(HookError::Cancelled { stage }),
                res = guarded => res,
            },
            None => guarded.await,
        }
    }
}
