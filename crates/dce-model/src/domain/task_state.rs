use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{ModelError, TaskId};

/// Task state as understood by the cluster resource manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskState {
    #[serde(rename = "TASK_STAGING")]
    Staging,
    #[serde(rename = "TASK_STARTING")]
    Starting,
    #[serde(rename = "TASK_RUNNING")]
    Running,
    #[serde(rename = "TASK_FINISHED")]
    Finished,
    #[serde(rename = "TASK_FAILED")]
    Failed,
    #[serde(rename = "TASK_KILLED")]
    Killed,
    #[serde(rename = "TASK_LOST")]
    Lost,
    #[serde(rename = "TASK_ERROR")]
    Error,
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Staging => "TASK_STAGING",
            TaskState::Starting => "TASK_STARTING",
            TaskState::Running => "TASK_RUNNING",
            TaskState::Finished => "TASK_FINISHED",
            TaskState::Failed => "TASK_FAILED",
            TaskState::Killed => "TASK_KILLED",
            TaskState::Lost => "TASK_LOST",
            TaskState::Error => "TASK_ERROR",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskState {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TASK_STAGING" => Ok(TaskState::Staging),
            "TASK_STARTING" => Ok(TaskState::Starting),
            "TASK_RUNNING" => Ok(TaskState::Running),
            "TASK_FINISHED" => Ok(TaskState::Finished),
            "TASK_FAILED" => Ok(TaskState::Failed),
            "TASK_KILLED" => Ok(TaskState::Killed),
            "TASK_LOST" => Ok(TaskState::Lost),
            "TASK_ERROR" => Ok(TaskState::Error),
            _ => Err(ModelError::UnknownTaskState(s.to_string())),
        }
    }
}

/// Status update an executor driver sends upstream for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatusUpdate {
    pub task_id: TaskId,
    pub state: TaskState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TaskStatusUpdate {
    pub fn new(task_id: TaskId, state: TaskState) -> Self {
        Self {
            task_id,
            state,
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrips_display() {
        for st in [
            TaskState::Staging,
            TaskState::Running,
            TaskState::Lost,
            TaskState::Error,
        ] {
            assert_eq!(st.to_string().parse::<TaskState>(), Ok(st));
        }
        assert!("TASK_UNKNOWN".parse::<TaskState>().is_err());
    }

    #[test]
    fn status_update_skips_empty_message() {
        let update = TaskStatusUpdate::new(TaskId::from("t1"), TaskState::Killed);
        let json = serde_json::to_string(&update).unwrap();
        assert_eq!(json, r#"{"taskId":"t1","state":"TASK_KILLED"}"#);

        let with_msg = update.with_message("killed by user");
        let json = serde_json::to_string(&with_msg).unwrap();
        assert!(json.contains(r#""message":"killed by user""#));
    }
}
