use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ModelError, TaskState};

/// Status of a composed pod as reported to status hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PodStatus {
    /// Pod accepted, nothing started yet.
    #[serde(rename = "POD_STAGING")]
    Staging,
    /// Images pulled, containers are being started.
    #[serde(rename = "POD_STARTING")]
    Starting,
    /// All containers are up.
    #[serde(rename = "POD_RUNNING")]
    Running,
    /// A container exited abnormally.
    #[serde(rename = "POD_FAILED")]
    Failed,
    /// Pod was killed on request.
    #[serde(rename = "POD_KILLED")]
    Killed,
    /// All containers exited cleanly.
    #[serde(rename = "POD_FINISHED")]
    Finished,
    /// Image pull failed.
    #[serde(rename = "POD_PULL_FAILED")]
    PullFailed,
    /// Compose files failed validation.
    #[serde(rename = "POD_COMPOSE_CHECK_FAILED")]
    ComposeCheckFailed,
}

impl PodStatus {
    pub const ALL: [PodStatus; 8] = [
        PodStatus::Staging,
        PodStatus::Starting,
        PodStatus::Running,
        PodStatus::Failed,
        PodStatus::Killed,
        PodStatus::Finished,
        PodStatus::PullFailed,
        PodStatus::ComposeCheckFailed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PodStatus::Staging => "POD_STAGING",
            PodStatus::Starting => "POD_STARTING",
            PodStatus::Running => "POD_RUNNING",
            PodStatus::Failed => "POD_FAILED",
            PodStatus::Killed => "POD_KILLED",
            PodStatus::Finished => "POD_FINISHED",
            PodStatus::PullFailed => "POD_PULL_FAILED",
            PodStatus::ComposeCheckFailed => "POD_COMPOSE_CHECK_FAILED",
        }
    }

    /// Returns `true` if the pod won't transition further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PodStatus::Failed
                | PodStatus::Killed
                | PodStatus::Finished
                | PodStatus::PullFailed
                | PodStatus::ComposeCheckFailed
        )
    }

    /// Returns `true` for statuses that end the pod with an error.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            PodStatus::Failed | PodStatus::PullFailed | PodStatus::ComposeCheckFailed
        )
    }

    /// Task state reported upstream for this pod status.
    pub fn task_state(&self) -> TaskState {
        match self {
            PodStatus::Staging => TaskState::Staging,
            PodStatus::Starting => TaskState::Starting,
            PodStatus::Running => TaskState::Running,
            PodStatus::Finished => TaskState::Finished,
            PodStatus::Killed => TaskState::Killed,
            PodStatus::Failed | PodStatus::PullFailed | PodStatus::ComposeCheckFailed => {
                TaskState::Failed
            }
        }
    }
}

impl fmt::Display for PodStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PodStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim();
        PodStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(norm))
            .ok_or_else(|| ModelError::UnknownPodStatus(s.to_string()))
    }
}
