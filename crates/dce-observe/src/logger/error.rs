use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoggerError {
    #[error("invalid logger format: {0} (expected: text|json|journald)")]
    InvalidFormat(String),
    #[error("journald is not supported on this platform or the feature is disabled")]
    JournaldNotSupported,
    #[error("executor logger has already been initialized")]
    AlreadyInitialized,
    #[error("failed to initialize executor logger: {0}")]
    InitializationFailed(String),
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    /// The `logging` section of the executor config could not be read.
    #[error("invalid executor logging config: {0}")]
    InvalidConfig(String),
}
