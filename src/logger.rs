//! Key-value event logging on top of `tracing`.
//!
//! ```rust,ignore
//! let log = get_logger("checkout");
//! log.info("order_placed", json!({ "order_id": 4, "quantity": 2 }));
//!
//! Logger::scope(async {
//!     Logger::bind_context(json!({ "request_id": "req_123" }));
//!     log.info("processing", json!({}));   // carries request_id
//!     Logger::clear_context();
//! })
//! .await;
//! ```

use serde_json::{Map, Value};
use std::cell::RefCell;
use std::future::Future;
use std::sync::{LazyLock, Mutex, PoisonError};

pub type Fields = Map<String, Value>;

tokio::task_local! {
    static REQUEST_CONTEXT: RefCell<Fields>;
}

/// Used when no [`Logger::scope`] is active.
static PROCESS_CONTEXT: LazyLock<Mutex<Fields>> = LazyLock::new(Default::default);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Debug,
    Info,
    Warning,
    Error,
}

/// Named logger. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
}

pub fn get_logger(name: impl Into<String>) -> Logger {
    Logger::new(name)
}

impl Logger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn debug(&self, event: &str, fields: Value) {
        self.emit(Level::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: Value) {
        self.emit(Level::Info, event, fields);
    }

    pub fn warning(&self, event: &str, fields: Value) {
        self.emit(Level::Warning, event, fields);
    }

    pub fn error(&self, event: &str, fields: Value) {
        self.emit(Level::Error, event, fields);
    }

    /// Error-level event carrying the error and its source chain.
    pub fn exception(&self, event: &str, err: &dyn std::error::Error, fields: Value) {
        let mut fields = into_fields(fields);
        fields.insert("error".to_string(), Value::String(err.to_string()));
        let chain: Vec<Value> = std::iter::successors(err.source(), |e| e.source())
            .map(|e| Value::String(e.to_string()))
            .collect();
        if !chain.is_empty() {
            fields.insert("error_chain".to_string(), Value::Array(chain));
        }
        self.emit(Level::Error, event, Value::Object(fields));
    }

    /// Runs `fut` with its own request context, starting empty.
    pub async fn scope<F: Future>(fut: F) -> F::Output {
        REQUEST_CONTEXT.scope(RefCell::new(Fields::new()), fut).await
    }

    /// Binds key-values to every later event until cleared.
    pub fn bind_context(fields: Value) {
        let fields = into_fields(fields);
        with_context(|ctx| ctx.extend(fields));
    }

    pub fn clear_context() {
        with_context(|ctx| ctx.clear());
    }

    pub fn context() -> Fields {
        with_context(|ctx| ctx.clone())
    }

    /// Bound context overlaid with the call's own fields.
    pub fn merged(&self, fields: Value) -> Fields {
        let mut merged = Self::context();
        merged.extend(into_fields(fields));
        merged
    }

    fn emit(&self, level: Level, event: &str, fields: Value) {
        let fields = Value::Object(self.merged(fields));
        let logger = self.name.as_str();
        match level {
            Level::Debug => tracing::debug!(logger, fields = %fields, "{}", event),
            Level::Info => tracing::info!(logger, fields = %fields, "{}", event),
            Level::Warning => tracing::warn!(logger, fields = %fields, "{}", event),
            Level::Error => tracing::error!(logger, fields = %fields, "{}", event),
        }
    }
}

fn with_context<R>(f: impl FnOnce(&mut Fields) -> R) -> R {
    if REQUEST_CONTEXT.try_with(|_| ()).is_ok() {
        REQUEST_CONTEXT.with(|ctx| f(&mut ctx.borrow_mut()))
    } else {
        let mut ctx = PROCESS_CONTEXT.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut ctx)
    }
}

fn into_fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        Value::Null => Fields::new(),
        other => {
            let mut map = Fields::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
