use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Per-launch context shared by the hooks of one pod.
///
/// The same context is passed to every launch hook of a pod, so values
/// inserted by an early hook are visible to the ones that run later.
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    cancel: CancellationToken,
    values: HashMap<String, Value>,
}

impl HookContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use an externally owned token; cancelling it aborts the running chain.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    #[inline]
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Insert a value, returning the previous one under the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Deserialize the value stored under `key`; `None` if absent or of another shape.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn insert_get_remove() {
        let mut ctx = HookContext::new();
        assert!(ctx.is_empty());

        assert!(ctx.insert("network", "bridge").is_none());
        assert_eq!(ctx.insert("network", "host"), Some(json!("bridge")));
        assert!(ctx.contains("network"));
        assert_eq!(ctx.get("network"), Some(&json!("host")));
        assert_eq!(ctx.len(), 1);

        assert_eq!(ctx.remove("network"), Some(json!("host")));
        assert!(!ctx.contains("network"));
    }

    #[test]
    fn get_as_deserializes_typed_values() {
        let mut ctx = HookContext::new();
        ctx.insert("ports", json!([8080, 8443]));

        let ports: Option<Vec<u16>> = ctx.get_as("ports");
        assert_eq!(ports, Some(vec![8080, 8443]));

        let wrong: Option<String> = ctx.get_as("ports");
        assert!(wrong.is_none());
    }

    #[test]
    fn external_token_drives_cancellation() {
        let token = CancellationToken::new();
        let ctx = HookContext::new().with_cancellation(token.clone());
        assert!(!ctx.is_cancelled());

        token.cancel();
        assert!(ctx.is_cancelled());
    }
}
