use serde::{Deserialize, Serialize};

/// A single `key=value` label attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    key: String,
    value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Labels carried by a task descriptor.
///
/// Stored as an ordered list and serialized as a plain array.
/// Plugins read them to decide whether they apply to a given pod.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(pub Vec<KeyValue>);

impl Labels {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValue> {
        self.0.iter()
    }

    /// Get the value for a key, returning the last matching entry.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|kv| kv.key() == key)
            .map(|kv| kv.value())
    }

    /// Append a label. Later entries shadow earlier ones in [`Labels::get`].
    pub fn push<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.0.push(KeyValue::new(key, value));
    }
}

#[cfg(test)]
mod tests {
    use super::Labels;

    #[test]
    fn new_is_empty() {
        let labels = Labels::new();
        assert!(labels.is_empty());
        assert!(labels.get("FOO").is_none());
    }

    #[test]
    fn push_and_override_last_wins() {
        let mut labels = Labels::new();
        labels.push("network", "bridge");
        labels.push("team", "infra");
        labels.push("network", "host");

        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get("network"), Some("host"));
        assert_eq!(labels.get("team"), Some("infra"));
        assert!(labels.get("zone").is_none());
    }

    #[test]
    fn serializes_as_array() {
        let mut labels = Labels::new();
        labels.push("team", "infra");

        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"[{"key":"team","value":"infra"}]"#);

        let back: Labels = serde_json::from_str(&json).unwrap();
        assert_eq!(back, labels);
    }
}
