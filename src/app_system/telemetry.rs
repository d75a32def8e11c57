use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use std::fmt::Write as _;
use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::uptime;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{fmt, EnvFilter};
use crate::config::Settings;

/// Name of the field `Logger` packs its key-values into.
const LOGGER_FIELDS: &str = "fields";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to open log file: {0}")]
    LogFile(#[from] io::Error),
    #[error("Tracing already initialized: {0}")]
    Init(#[from] TryInitError),
}

/// Builds the level filter. `RUST_LOG` wins over the configured level.
pub fn env_filter(settings: &Settings) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.log_level.as_directive()))
}

/// Configure tracing once at startup for the entire process.
///
/// Two sinks share one filter: a compact console layer with uptime
/// timestamps, and a JSON-lines layer appended to `settings.log_file`.
/// Debug mode adds source locations to the console output.
///
/// ```bash
/// LOG_LEVEL=DEBUG cargo run    # configured level
/// RUST_LOG=mock_shop::clients=debug,info cargo run    # per-module override
/// ```
pub fn setup_tracing(settings: &Settings) -> Result<(), TelemetryError> {
    if let Some(parent) = settings.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&settings.log_file)?;

    let console = fmt::layer()
        .with_timer(uptime())
        .with_file(settings.debug)
        .with_line_number(settings.debug)
        .compact();

    let json_lines = fmt::layer()
        .event_format(JsonLines)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter(settings))
        .with(console)
        .with(json_lines)
        .try_init()?;
    Ok(())
}

/// One flat JSON object per event.
///
/// `Logger` key-values become top-level keys next to `timestamp`, `level`,
/// `target`, `event` and the names of the enclosing spans.
pub struct JsonLines;

impl<S, N> FormatEvent<S, N> for JsonLines
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut record = Map::new();
        event.record(&mut FieldVisitor(&mut record));

        // Reserved keys win over spliced key-values.
        let meta = event.metadata();
        let level = if *meta.level() == Level::WARN {
            "warning".to_string()
        } else {
            meta.level().as_str().to_ascii_lowercase()
        };
        record.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)),
        );
        record.insert("level".to_string(), Value::String(level));
        record.insert("target".to_string(), Value::String(meta.target().to_string()));
        if let Some(scope) = ctx.event_scope() {
            let spans: Vec<Value> = scope
                .from_root()
                .map(|span| Value::String(span.name().to_string()))
                .collect();
            record.insert("spans".to_string(), Value::Array(spans));
        }

        writeln!(writer, "{}", Value::Object(record))
    }
}

struct FieldVisitor<'a>(&'a mut Map<String, Value>);

impl FieldVisitor<'_> {
    fn insert(&mut self, field: &Field, value: Value) {
        match field.name() {
            "message" => {
                self.0.insert("event".to_string(), value);
            }
            LOGGER_FIELDS => match value {
                Value::String(raw) => match serde_json::from_str::<Value>(&raw) {
                    Ok(Value::Object(fields)) => self.0.extend(fields),
                    _ => {
                        self.0.insert(LOGGER_FIELDS.to_string(), Value::String(raw));
                    }
                },
                other => {
                    self.0.insert(LOGGER_FIELDS.to_string(), other);
                }
            },
            name => {
                self.0.insert(name.to_string(), value);
            }
        }
    }
}

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::String(format!("{:?}", value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, value.into());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, value.into());
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, value.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::get_logger;
    use serde_json::json;

    fn records(contents: &str) -> Vec<Value> {
        contents
            .lines()
            .map(|line| serde_json::from_str(line).expect("each line is one JSON object"))
            .collect()
    }

    #[test]
    fn test_logger_fields_are_top_level_keys() {
        let out = tempfile::NamedTempFile::new().unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(JsonLines)
                .with_writer(Mutex::new(out.reopen().unwrap())),
        );

        tracing::subscriber::with_default(subscriber, || {
            let _span = tracing::info_span!("checkout").entered();
            get_logger("tools.account").warning("order_failed_out_of_stock", json!({ "product_id": 4 }));
        });

        let records = records(&fs::read_to_string(out.path()).unwrap());
        let record = records
            .iter()
            .find(|r| r["event"] == "order_failed_out_of_stock")
            .expect("event written");
        assert_eq!(record["product_id"], 4);
        assert_eq!(record["logger"], "tools.account");
        assert_eq!(record["level"], "warning");
        assert_eq!(record["spans"], json!(["checkout"]));
        assert!(record.get(LOGGER_FIELDS).is_none());
    }

    #[test]
    fn test_reserved_keys_win_over_logger_fields() {
        let out = tempfile::NamedTempFile::new().unwrap();
        let subscriber = tracing_subscriber::registry().with(
            fmt::layer()
                .event_format(JsonLines)
                .with_writer(Mutex::new(out.reopen().unwrap())),
        );

        tracing::subscriber::with_default(subscriber, || {
            get_logger("test").error("clash", json!({ "level": "quiet", "attempt": 2 }));
        });

        let records = records(&fs::read_to_string(out.path()).unwrap());
        let record = records.iter().find(|r| r["event"] == "clash").expect("event written");
        assert_eq!(record["level"], "error");
        assert_eq!(record["attempt"], 2);
    }

    // The only test that installs the process-wide subscriber.
    #[test]
    fn test_setup_tracing_appends_json_lines_once() {
        let dir = tempfile::tempdir().unwrap();
        let log_file = dir.path().join("nested").join("mock_shop.jsonl");
        let settings = Settings::from_vars([
            ("OPENAI_API_KEY", "sk-test".to_string()),
            ("LOG_LEVEL", "DEBUG".to_string()),
            ("LOG_FILE", log_file.display().to_string()),
        ])
        .unwrap();

        setup_tracing(&settings).unwrap();
        assert!(dir.path().join("nested").is_dir());

        get_logger("telemetry").warning("tracing_ready", json!({ "request_id": "req_1" }));
        let records = records(&fs::read_to_string(&log_file).unwrap());
        let record = records
            .iter()
            .find(|r| r["event"] == "tracing_ready")
            .expect("event appended to log file");
        assert_eq!(record["request_id"], "req_1");
        assert_eq!(record["logger"], "telemetry");

        assert!(matches!(setup_tracing(&settings), Err(TelemetryError::Init(_))));
    }
}
