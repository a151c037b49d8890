use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a task assigned by the cluster manager.
    TaskId
);

string_id!(
    /// Identifier of the executor instance running a pod.
    ExecutorId
);

string_id!(
    /// Identifier of the agent (host) the task was placed on.
    AgentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_as_str_match() {
        let id = TaskId::from("task-1");
        assert_eq!(id.as_str(), "task-1");
        assert_eq!(id.to_string(), "task-1");
    }

    #[test]
    fn serde_is_transparent() {
        let id = ExecutorId::new("exec-7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, r#""exec-7""#);

        let back: ExecutorId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
