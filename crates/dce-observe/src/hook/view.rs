use dce_model::{PodStatus, TaskInfo};
use tracing::{debug, error, info, warn};

#[inline]
pub fn message_for(status: PodStatus) -> &'static str {
    match status {
        // launch
        PodStatus::Staging => "pod staged; waiting for launch",
        PodStatus::Starting => "pod is starting",
        PodStatus::Running => "pod is running",

        // terminal
        PodStatus::Finished => "pod finished",
        PodStatus::Killed => "pod killed",

        // failures
        PodStatus::Failed => "pod failed",
        PodStatus::PullFailed => "pod failed to pull images",
        PodStatus::ComposeCheckFailed => "pod compose files failed validation",
    }
}

/// Log a status change at a level derived from the status.
#[inline]
pub fn log_status(status: PodStatus, task: Option<&TaskInfo>) {
    let msg = message_for(status);
    let task_id = task.map(|t| t.task_id.as_str()).unwrap_or("unknown");

    match status {
        PodStatus::Staging | PodStatus::Starting => {
            debug!(target: "dce.pod.status", task = task_id, %status, "{msg}")
        }
        PodStatus::Running | PodStatus::Finished => {
            info!(target: "dce.pod.status", task = task_id, %status, "{msg}")
        }
        PodStatus::Killed => warn!(target: "dce.pod.status", task = task_id, %status, "{msg}"),
        PodStatus::Failed | PodStatus::PullFailed | PodStatus::ComposeCheckFailed => {
            error!(target: "dce.pod.status", task = task_id, %status, "{msg}")
        }
    }
}
