use serde::Serialize;

/// The level of the engine's log. Compiled documents always log warnings.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// `"warning"` : The engine has encountered some problems, usually
    /// external problems, which do not affect the normal operation
    /// but may affect the user experience. It contains all the `"error"` content.
    #[serde(rename = "warning")]
    Warning,
}

/// `LogObject` The corresponding configuration file `log` entries.
///
/// ```json
/// {
///     "access": "",
///     "error": "",
///     "loglevel": "warning"
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// The file address of the access log. Empty means stdout.
    pub access: String,
    /// The file address of the error log. Empty means stdout.
    pub error: String,
    /// The level of the log. The default value is `"warning"`.
    #[serde(rename = "loglevel")]
    pub log_level: LogLevel,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            access: String::new(),
            error: String::new(),
            log_level: LogLevel::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    pub fn test_serialize_log_level() {
        assert_eq!(to_value(LogLevel::Warning).unwrap(), json!("warning"));
    }

    #[test]
    pub fn test_serialize_default_log() {
        let log = to_value(Log::default()).unwrap();
        assert_eq!(
            log,
            json!({
                "access": "",
                "error": "",
                "loglevel": "warning"
            })
        );
    }
}
