//! Settings loaded once from `.env` and the process environment.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_LOG_FILE: &str = "logs/mock_shop.jsonl";

static SETTINGS: OnceLock<Settings> = OnceLock::new();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("Failed to read env file: {0}")]
    EnvFile(#[from] dotenvy::Error),
}

/// Minimum level for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" | "CRITICAL" => Ok(LogLevel::Error),
            _ => Err(s.to_string()),
        }
    }
}

/// Application settings.
///
/// Key names are matched case-insensitively and unknown keys are ignored.
#[derive(Clone)]
pub struct Settings {
    /// Required.
    pub openai_api_key: String,
    pub anthropic_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub debug: bool,
    pub log_level: LogLevel,
    /// Append-only JSON-lines log target.
    pub log_file: PathBuf,
}

impl Settings {
    /// Process-wide settings, loaded on first use and never changed after.
    pub fn global() -> Result<&'static Settings, ConfigError> {
        if let Some(settings) = SETTINGS.get() {
            return Ok(settings);
        }
        let loaded = Self::load()?;
        Ok(SETTINGS.get_or_init(|| loaded))
    }

    /// Loads `.env` from the working directory, then the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Some(Path::new(DEFAULT_ENV_FILE)))
    }

    /// Process environment values override values from `env_file`. A missing
    /// env file is not an error.
    pub fn load_from(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut vars = match env_file {
            Some(path) => read_env_file(path)?,
            None => Vec::new(),
        };
        vars.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );
        Self::from_vars(vars)
    }

    /// Builds settings from key/value pairs. Later pairs win.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_ascii_uppercase(), v.into()))
            .collect();
        let non_blank = |key: &str| {
            vars.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let openai_api_key = non_blank("OPENAI_API_KEY").ok_or(ConfigError::MissingVar("OPENAI_API_KEY"))?;

        let debug = match non_blank("DEBUG") {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue { key: "DEBUG", value: raw })?,
            None => false,
        };

        let log_level = match non_blank("LOG_LEVEL") {
            Some(raw) => raw
                .parse::<LogLevel>()
                .map_err(|value| ConfigError::InvalidValue { key: "LOG_LEVEL", value })?,
            None => LogLevel::default(),
        };

        Ok(Self {
            openai_api_key,
            anthropic_api_key: non_blank("ANTHROPIC_API_KEY"),
            google_api_key: non_blank("GOOGLE_API_KEY"),
            groq_api_key: non_blank("GROQ_API_KEY"),
            debug,
            log_level,
            log_file: non_blank("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
        })
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Settings")
            .field("openai_api_key", &"<redacted>")
            .field("anthropic_api_key", &redact(&self.anthropic_api_key))
            .field("google_api_key", &redact(&self.google_api_key))
            .field("groq_api_key", &redact(&self.groq_api_key))
            .field("debug", &self.debug)
            .field("log_level", &self.log_level)
            .field("log_file", &self.log_file)
            .finish()
    }
}

/// Reads `KEY=value` pairs from a dotenv file without touching the process
/// environment.
pub(crate) fn read_env_file(path: &Path) -> Result<Vec<(String, String)>, ConfigError> {
    match dotenvy::from_path_iter(path) {
        Ok(iter) => Ok(iter.collect::<Result<Vec<_>, _>>()?),
        Err(e) if e.not_found() => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "t" | "y" => Some(true),
        "0" | "false" | "no" | "off" | "f" | "n" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_api_key_fails_fast() {
        let err = Settings::from_vars([("LOG_LEVEL", "DEBUG")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));

        let err = Settings::from_vars([("OPENAI_API_KEY", "   ")]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_vars([("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert_eq!(settings.openai_api_key, "sk-test");
        assert_eq!(settings.anthropic_api_key, None);
        assert!(!settings.debug);
        assert_eq!(settings.log_level, LogLevel::Info);
        assert_eq!(settings.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_keys_are_case_insensitive_and_later_wins() {
        let settings = Settings::from_vars([
            ("openai_api_key", "from-file"),
            ("OPENAI_API_KEY", "from-env"),
            ("Groq_Api_Key", "gsk"),
            ("debug", "Yes"),
            ("log_level", "warning"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();
        assert_eq!(settings.openai_api_key, "from-env");
        assert_eq!(settings.groq_api_key.as_deref(), Some("gsk"));
        assert!(settings.debug);
        assert_eq!(settings.log_level, LogLevel::Warning);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        let err = Settings::from_vars([("OPENAI_API_KEY", "sk"), ("DEBUG", "maybe")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "DEBUG", .. }));

        let err = Settings::from_vars([("OPENAI_API_KEY", "sk"), ("LOG_LEVEL", "chatty")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for LOG_LEVEL: \"chatty\"");
    }

    #[test]
    fn test_critical_maps_to_error() {
        assert_eq!("critical".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!(LogLevel::Warning.as_directive(), "warn");
    }

    #[test]
    fn test_debug_output_redacts_keys() {
        let settings = Settings::from_vars([("OPENAI_API_KEY", "sk-secret"), ("GOOGLE_API_KEY", "g-secret")]).unwrap();
        let rendered = format!("{:?}", settings);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_env_file_is_parsed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "OPENAI_API_KEY=sk-from-file").unwrap();
        writeln!(file, "LOG_LEVEL=\"DEBUG\"").unwrap();

        let vars = read_env_file(file.path()).unwrap();
        let settings = Settings::from_vars(vars).unwrap();
        assert_eq!(settings.openai_api_key, "sk-from-file");
        assert_eq!(settings.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_missing_env_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let vars = read_env_file(&dir.path().join(".env")).unwrap();
        assert!(vars.is_empty());
    }
}
