use serde::{Deserialize, Serialize};

use crate::{AgentId, ExecutorId, Labels, TaskId};

/// Task descriptor handed to every compose plugin hook.
///
/// Only the fields the hooks consume are modelled here; the full descriptor
/// is owned by the cluster resource manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    /// Unique task identifier.
    pub task_id: TaskId,
    /// Human readable task name.
    pub name: String,
    /// Agent the task was placed on.
    #[serde(default)]
    pub agent_id: AgentId,
    /// Executor the task belongs to, when already assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_id: Option<ExecutorId>,
    /// Task labels.
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    /// Opaque payload attached by the framework.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl TaskInfo {
    pub fn new(task_id: impl Into<TaskId>, name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            name: name.into(),
            agent_id: AgentId::default(),
            executor_id: None,
            labels: Labels::new(),
            data: None,
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<AgentId>) -> Self {
        self.agent_id = agent_id.into();
        self
    }

    pub fn with_executor(mut self, executor_id: impl Into<ExecutorId>) -> Self {
        self.executor_id = Some(executor_id.into());
        self
    }

    pub fn with_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.labels.push(key, value);
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }
}
