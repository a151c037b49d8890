use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown pod status: {0}")]
    UnknownPodStatus(String),
    #[error("unknown task state: {0}")]
    UnknownTaskState(String),
}
