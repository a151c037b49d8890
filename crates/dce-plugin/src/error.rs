use thiserror::Error;

use crate::hook::HookStage;

/// Error returned by a single plugin hook.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("{0}")]
    Failed(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("executor driver: {0}")]
    Driver(#[from] DriverError),
    #[error("cancelled")]
    Cancelled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PluginError {
    pub fn failed(reason: impl Into<String>) -> Self {
        PluginError::Failed(reason.into())
    }
}

/// Error returned by an [`ExecutorDriver`](crate::ExecutorDriver).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error("driver is not running")]
    NotRunning,
    #[error("driver was aborted")]
    Aborted,
    #[error("send failed: {0}")]
    Send(String),
}

/// Error produced while running a chain of hooks.
#[derive(Error, Debug)]
pub enum HookError {
    #[error("plugin {plugin} failed at {stage}: {source}")]
    Plugin {
        plugin: String,
        stage: HookStage,
        #[source]
        source: PluginError,
    },
    #[error("plugin {plugin} timed out at {stage} after {timeout_ms}ms")]
    Timeout {
        plugin: String,
        stage: HookStage,
        timeout_ms: u64,
    },
    #[error("hook execution cancelled at {stage}")]
    Cancelled { stage: HookStage },
}

impl HookError {
    pub(crate) fn plugin(plugin: &str, stage: HookStage, source: PluginError) -> Self {
        HookError::Plugin {
            plugin: plugin.to_string(),
            stage,
            source,
        }
    }

    pub fn stage(&self) -> HookStage {
        match self {
            HookError::Plugin { stage, .. }
            | HookError::Timeout { stage, .. }
            | HookError::Cancelled { stage } => *stage,
        }
    }

    /// Name of the plugin that failed, if the failure is attributable to one.
    pub fn plugin_name(&self) -> Option<&str> {
        match self {
            HookError::Plugin { plugin, .. } | HookError::Timeout { plugin, .. } => Some(plugin),
            HookError::Cancelled { .. } => None,
        }
    }
}
