use crate::convert::ScalarConverters;
use crate::error::LoggerError;
use crate::file_sink::FileSink;
use crate::record::{to_mapping, ModelRecord};
use crate::sink::LineSink;
use crate::value::{FieldValue, LogValue, RecordMap};
use chrono::Local;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File used when no path is configured.
pub const DEFAULT_LOG_FILE: &str = "default.txt";

/// Format of the timestamp prefix put in front of plain messages.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Settings for a file-backed [`RecordLogger`].
///
/// **Fields**
/// - `path`: target file, `default.txt` unless set.
/// - `delete_existing`: remove the file at construction so the log
///   starts empty.
/// - `with_timestamp`: prefix every plain message with the time the
///   logger was created. The prefix is captured once and does not change
///   between calls.
///
/// Deserializes with every field optional, so it can sit inside a host
/// application's own config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    pub path: PathBuf,
    pub delete_existing: bool,
    pub with_timestamp: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_FILE),
            delete_existing: false,
            with_timestamp: false,
        }
    }
}

impl LoggerConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn deleting_existing(mut self, delete: bool) -> Self {
        self.delete_existing = delete;
        self
    }

    pub fn timestamped(mut self, enabled: bool) -> Self {
        self.with_timestamp = enabled;
        self
    }
}

/// One unit written by [`RecordLogger::write_entry`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    /// Written as a single (optionally timestamp-prefixed) line.
    Text(String),
    /// Mappings and sequences are written as pretty JSON; a bare scalar
    /// is written like text.
    Value(LogValue),
}

impl From<&str> for LogEntry {
    fn from(value: &str) -> Self {
        LogEntry::Text(value.to_string())
    }
}

impl From<String> for LogEntry {
    fn from(value: String) -> Self {
        LogEntry::Text(value)
    }
}

impl From<LogValue> for LogEntry {
    fn from(value: LogValue) -> Self {
        LogEntry::Value(value)
    }
}

impl From<FieldValue> for LogEntry {
    fn from(value: FieldValue) -> Self {
        LogEntry::Value(LogValue::Scalar(value))
    }
}

impl From<RecordMap> for LogEntry {
    fn from(value: RecordMap) -> Self {
        LogEntry::Value(LogValue::Map(value))
    }
}

impl From<Vec<RecordMap>> for LogEntry {
    fn from(value: Vec<RecordMap>) -> Self {
        LogEntry::Value(LogValue::from(value))
    }
}

/// Appends plain messages and converted model records to a log target.
///
/// Every call renders one entry and appends it through the sink; the
/// only state kept between calls is the sink, the converter table and
/// the fixed timestamp prefix.
#[derive(Debug)]
pub struct RecordLogger<S = FileSink> {
    sink: S,
    timestamp_prefix: String,
    converters: ScalarConverters,
}

impl RecordLogger<FileSink> {
    /// Create a logger writing to the file described by `config`.
    ///
    /// **Errors**
    /// - `LoggerError::Io` if an existing file had to be deleted and
    ///   could not be.
    pub fn new(config: LoggerConfig) -> Result<Self, LoggerError> {
        let sink = FileSink::new(config.path, config.delete_existing)?;
        Ok(Self::with_sink(sink, config.with_timestamp))
    }

    /// Logger appending to `path` with default settings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, LoggerError> {
        Self::new(LoggerConfig::new(path))
    }

    pub fn path(&self) -> &Path {
        self.sink.path()
    }
}

impl<S: LineSink> RecordLogger<S> {
    /// Wrap an arbitrary sink. With `with_timestamp`, the current local
    /// time is captured now and used as the prefix of every plain
    /// message.
    pub fn with_sink(sink: S, with_timestamp: bool) -> Self {
        let timestamp_prefix = if with_timestamp {
            Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string()
        } else {
            String::new()
        };

        RecordLogger {
            sink,
            timestamp_prefix,
            converters: ScalarConverters::default(),
        }
    }

    /// Replace the scalar converter table.
    pub fn with_converters(mut self, converters: ScalarConverters) -> Self {
        self.converters = converters;
        self
    }

    pub fn converters(&self) -> &ScalarConverters {
        &self.converters
    }

    /// Mutable access for registering additional converters.
    pub fn converters_mut(&mut self) -> &mut ScalarConverters {
        &mut self.converters
    }

    /// Prefix of plain messages; empty when timestamps are disabled.
    pub fn timestamp_prefix(&self) -> &str {
        &self.timestamp_prefix
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Convert a record into a plain mapping. See
    /// [`to_mapping`](crate::record::to_mapping).
    pub fn convert_to_mapping<R>(&self, record: &R, include_relationships: bool) -> Result<RecordMap, LoggerError>
    where
        R: ModelRecord + ?Sized,
    {
        to_mapping(record, include_relationships)
    }

    /// Convert one record and append it as a JSON object.
    pub fn log_record<R>(&self, record: &R, include_relationships: bool) -> Result<(), LoggerError>
    where
        R: ModelRecord + ?Sized,
    {
        let map = self.convert_to_mapping(record, include_relationships)?;
        self.write_entry(map)
    }

    /// Convert every record with the same relationship setting and append
    /// them together as one JSON array, in iteration order.
    pub fn log_records<'a, R, I>(&self, records: I, include_relationships: bool) -> Result<(), LoggerError>
    where
        R: ModelRecord + ?Sized + 'a,
        I: IntoIterator<Item = &'a R>,
    {
        let maps = records
            .into_iter()
            .map(|record| self.convert_to_mapping(record, include_relationships))
            .collect::<Result<Vec<_>, _>>()?;
        self.write_entry(maps)
    }

    /// Render `entry` and append it to the target.
    ///
    /// Mappings and sequences (including JSON objects and arrays held in
    /// a [`FieldValue::Json`]) become pretty JSON followed by a newline.
    /// Text and bare scalars become one line with the timestamp prefix.
    /// Nothing is written when rendering fails.
    pub fn write_entry(&self, entry: impl Into<LogEntry>) -> Result<(), LoggerError> {
        let text = self.render(entry.into())?;
        self.sink.append(&text)?;
        Ok(())
    }

    /// Same as [`write_entry`](Self::write_entry).
    pub fn log_message(&self, message: impl Into<LogEntry>) -> Result<(), LoggerError> {
        self.write_entry(message)
    }

    /// Text that [`write_entry`](Self::write_entry) would append.
    pub fn render(&self, entry: LogEntry) -> Result<String, LoggerError> {
        match entry {
            LogEntry::Text(text) => Ok(format!("{}{}\n", self.timestamp_prefix, text)),
            // JSON objects and arrays are mappings and sequences, so they
            // take the pretty JSON path below.
            LogEntry::Value(LogValue::Scalar(scalar)) if !is_json_container(&scalar) => Ok(format!(
                "{}{}\n",
                self.timestamp_prefix,
                self.converters.render_text(&scalar)
            )),
            LogEntry::Value(value) => {
                let mut json = self.converters.to_pretty_json(&value).map_err(|e| {
                    if let LoggerError::Unserializable { type_name } = &e {
                        warn!(type_name = *type_name, "log entry holds a value without JSON conversion");
                    }
                    e
                })?;
                json.push('\n');
                Ok(json)
            }
        }
    }
}

fn is_json_container(value: &FieldValue) -> bool {
    matches!(
        value,
        FieldValue::Json(serde_json::Value::Object(_) | serde_json::Value::Array(_))
    )
}
