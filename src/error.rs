/// Error type returned by record conversion and log writes.
///
/// Nothing is recovered locally: every variant is handed back to the
/// caller as-is, and a failed write may leave a partial line behind.
#[derive(thiserror::Error, Debug)]
pub enum LoggerError {
    /// The value passed as a record does not expose a field/relationship
    /// schema.
    #[error("not a recognized record: {0}")]
    SchemaIntrospection(String),

    /// A value reachable from a structured entry has no JSON
    /// representation and no registered converter.
    #[error("Object of type {type_name} is not JSON serializable")]
    Unserializable { type_name: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl LoggerError {
    pub fn schema(reason: impl Into<String>) -> Self {
        LoggerError::SchemaIntrospection(reason.into())
    }
}
