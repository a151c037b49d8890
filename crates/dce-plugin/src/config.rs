use std::{collections::HashSet, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid hook config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("plugin listed more than once: {0}")]
    DuplicatePlugin(String),
}

/// Which hooks run, in which order, and how long each may take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HookConfig {
    /// Compose plugins, in execution order.
    pub plugin_order: Vec<String>,
    /// Pod status hooks, in execution order.
    pub pod_status_hooks: Vec<String>,
    /// Upper bound for a single hook call. `None` means unbounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook_timeout_ms: Option<u64>,
}

impl HookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plugin_order<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.plugin_order = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_pod_status_hooks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pod_status_hooks = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_hook_timeout_ms(mut self, ms: u64) -> Self {
        self.hook_timeout_ms = Some(ms);
        self
    }

    pub fn hook_timeout(&self) -> Option<Duration> {
        self.hook_timeout_ms.map(Duration::from_millis)
    }

    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        let cfg: HookConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Split a comma separated list such as `"general, metrics"`. Blank items are dropped.
    pub fn parse_list(s: &str) -> Vec<String> {
        s.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Reject names listed twice in the same list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for list in [&self.plugin_order, &self.pod_status_hooks] {
            let mut seen = HashSet::new();
            for name in list {
                if !seen.insert(name.as_str()) {
                    return Err(ConfigError::DuplicatePlugin(name.clone()));
                }
            }
        }
        Ok(())
    }
}
