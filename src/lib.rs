pub mod error;
pub mod value;
pub mod record;
pub mod convert;
pub mod dynamic;
mod macros;

pub mod sink;
pub mod file_sink;
pub mod noop_sink;
pub mod logger;

pub mod init;

pub use convert::ScalarConverters;
pub use error::LoggerError;
pub use logger::{LogEntry, LoggerConfig, RecordLogger};
pub use record::{FieldEnumerable, ModelRecord, RelationEnumerable};
pub use value::{FieldValue, LogValue, RecordMap};
