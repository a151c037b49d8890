use std::{any::Any, fmt, path::PathBuf};

use async_trait::async_trait;
use dce_model::{ExecutorId, PodStatus, TaskInfo};
use serde::{Deserialize, Serialize};

use crate::{ExecutorDriver, HookContext, PluginError};

/// Untyped payload handed to status hooks alongside the status.
///
/// The executor passes the pod's [`TaskInfo`]; hooks downcast to what they expect.
pub type StatusData = dyn Any + Send + Sync;

/// A named plugin hooking into the launch/kill cycle of a composed pod.
///
/// Every hook has a no-op default so a plugin only implements the stages it
/// cares about. A returned error means "this hook failed"; what happens next
/// is decided by the caller (see [`ComposeChain`](crate::ComposeChain)).
#[async_trait]
pub trait ComposePlugin: Send + Sync {
    /// Name the plugin is registered and configured under.
    fn name(&self) -> &str;

    /// Runs before the pod's images are pulled.
    ///
    /// May rewrite the compose file list and the task descriptor.
    async fn launch_task_pre_image_pull(
        &self,
        _ctx: &mut HookContext,
        _compose_files: &mut Vec<PathBuf>,
        _executor_id: &ExecutorId,
        _task: &mut TaskInfo,
    ) -> Result<(), PluginError> {
        Ok(())
    }

    /// Runs after the pod's images are pulled.
    async fn launch_task_post_image_pull(
        &self,
        _ctx: &mut HookContext,
        _compose_files: &mut Vec<PathBuf>,
        _executor_id: &ExecutorId,
        _task: &mut TaskInfo,
    ) -> Result<(), PluginError> {
        Ok(())
    }

    /// Runs once the pod is launched and reports the pod status the plugin observed.
    async fn post_launch_task(
        &self,
        _ctx: &mut HookContext,
        _compose_files: &[PathBuf],
        _task: &TaskInfo,
    ) -> Result<PodStatus, PluginError> {
        Ok(PodStatus::Running)
    }

    /// Runs before a kill is sent for the task.
    async fn pre_kill_task(&self, _task: &TaskInfo) -> Result<(), PluginError> {
        Ok(())
    }

    /// Runs after a kill was sent for the task.
    async fn post_kill_task(&self, _task: &TaskInfo) -> Result<(), PluginError> {
        Ok(())
    }

    /// Runs when the executor shuts the pod down.
    async fn shutdown(&self, _driver: &dyn ExecutorDriver) -> Result<(), PluginError> {
        Ok(())
    }
}

/// Callback invoked whenever a pod's status changes during launch.
#[async_trait]
pub trait PodStatusHook: Send + Sync {
    /// Handle a status change.
    ///
    /// On failure the returned [`HookFailure`] says whether the remaining hooks
    /// must be skipped and the execution failed, or whether the hook ran in a
    /// best-effort manner and the sequence may continue.
    async fn execute(&self, status: PodStatus, data: &StatusData) -> Result<(), HookFailure>;
}

/// Failure of a [`PodStatusHook`].
#[derive(Debug)]
pub struct HookFailure {
    /// Abort the surrounding hook sequence and fail the execution.
    pub fail_exec: bool,
    pub error: PluginError,
}

impl HookFailure {
    pub fn fatal(error: impl Into<PluginError>) -> Self {
        Self {
            fail_exec: true,
            error: error.into(),
        }
    }

    pub fn best_effort(error: impl Into<PluginError>) -> Self {
        Self {
            fail_exec: false,
            error: error.into(),
        }
    }
}

impl fmt::Display for HookFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fail_exec {
            write!(f, "{} (fatal)", self.error)
        } else {
            write!(f, "{}", self.error)
        }
    }
}

impl std::error::Error for HookFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Point of the pod lifecycle a hook runs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookStage {
    PreImagePull,
    PostImagePull,
    PostLaunch,
    PreKill,
    PostKill,
    Shutdown,
    PodStatus,
}

impl HookStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            HookStage::PreImagePull => "pre_image_pull",
            HookStage::PostImagePull => "post_image_pull",
            HookStage::PostLaunch => "post_launch",
            HookStage::PreKill => "pre_kill",
            HookStage::PostKill => "post_kill",
            HookStage::Shutdown => "shutdown",
            HookStage::PodStatus => "pod_status",
        }
    }
}

impl fmt::Display for HookStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    #[async_trait]
    impl ComposePlugin for Noop {
        fn name(&self) -> &str {
            "noop"
        }
    }

    #[tokio::test]
    async fn default_hooks_succeed() {
        let plugin = Noop;
        let mut ctx = HookContext::new();
        let mut files = vec![PathBuf::from("docker-compose.yml")];
        let exec = ExecutorId::from("exec-1");
        let mut task = TaskInfo::new("task-1", "web");

        plugin
            .launch_task_pre_image_pull(&mut ctx, &mut files, &exec, &mut task)
            .await
            .unwrap();
        plugin
            .launch_task_post_image_pull(&mut ctx, &mut files, &exec, &mut task)
            .await
            .unwrap();
        let status = plugin.post_launch_task(&mut ctx, &files, &task).await.unwrap();
        assert_eq!(status, PodStatus::Running);
        plugin.pre_kill_task(&task).await.unwrap();
        plugin.post_kill_task(&task).await.unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn failure_flavours() {
        let fatal = HookFailure::fatal(PluginError::failed("boom"));
        assert!(fatal.fail_exec);
        assert_eq!(fatal.to_string(), "boom (fatal)");

        let soft = HookFailure::best_effort(PluginError::failed("meh"));
        assert!(!soft.fail_exec);
        assert_eq!(soft.to_string(), "meh");
    }

    #[test]
    fn stage_names() {
        assert_eq!(HookStage::PreImagePull.to_string(), "pre_image_pull");
        assert_eq!(
            serde_json::to_string(&HookStage::PodStatus).unwrap(),
            r#""pod_status""#
        );
    }
}
