use std::io::IsTerminal;

use serde::Deserialize;

use crate::logger::{error::LoggerError, format::LoggerFormat, log::mk_filter};

/// Syslog identifier used for journald entries unless configured otherwise.
pub const DEFAULT_SYSLOG_IDENTIFIER: &str = "dce-executor";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggerConfig {
    pub format: LoggerFormat,
    /// `EnvFilter` directive, e.g. `info` or `info,dce.plugin=debug`.
    pub level: String,
    pub with_targets: bool,
    pub use_color: bool,
    /// Only used by the journald format.
    pub syslog_identifier: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        let use_color = cfg!(test) || std::io::stdout().is_terminal();
        Self {
            format: LoggerFormat::Text,
            level: "info".to_string(),
            with_targets: true,
            use_color,
            syslog_identifier: DEFAULT_SYSLOG_IDENTIFIER.to_string(),
        }
    }
}

impl LoggerConfig {
    /// Parse the executor's `logging` config section and [`validate`](Self::validate) it.
    pub fn from_json(raw: &str) -> Result<Self, LoggerError> {
        let cfg: Self =
            serde_json::from_str(raw).map_err(|e| LoggerError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check the settings [`logger_init`](crate::logger_init) would reject, without
    /// installing anything.
    pub fn validate(&self) -> Result<(), LoggerError> {
        mk_filter(&self.level)?;
        if self.format == LoggerFormat::Journald {
            if !cfg!(all(target_os = "linux", feature = "journald")) {
                return Err(LoggerError::JournaldNotSupported);
            }
            if self.syslog_identifier.trim().is_empty() {
                return Err(LoggerError::InvalidConfig(
                    "syslogIdentifier must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_json_fills_defaults() {
        let cfg = LoggerConfig::from_json(r#"{"format":"json","level":"debug"}"#).unwrap();
        assert_eq!(cfg.format, LoggerFormat::Json);
        assert_eq!(cfg.level, "debug");
        assert!(cfg.with_targets);
        assert_eq!(cfg.syslog_identifier, DEFAULT_SYSLOG_IDENTIFIER);
    }

    #[test]
    fn from_json_rejects_malformed_section() {
        let err = LoggerConfig::from_json(r#"{"format":"xml"}"#).unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfig(_)));
        assert!(err.to_string().starts_with("invalid executor logging config"));
    }

    #[test]
    fn from_json_rejects_bad_level() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"level":"dce=loud"}"#),
            Err(LoggerError::InvalidLogLevel(ref s)) if s == "dce=loud"
        ));
    }

    #[cfg(not(all(target_os = "linux", feature = "journald")))]
    #[test]
    fn journald_config_requires_feature() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"format":"journald"}"#),
            Err(LoggerError::JournaldNotSupported)
        ));
    }

    #[cfg(all(target_os = "linux", feature = "journald"))]
    #[test]
    fn journald_config_needs_identifier() {
        assert!(matches!(
            LoggerConfig::from_json(r#"{"format":"journald","syslogIdentifier":" "}"#),
            Err(LoggerError::InvalidConfig(_))
        ));
    }
}
