use crate::sink::LineSink;
use std::io;

/// A sink that simply drops all entries.
///
/// Useful for checking that records serialize (converter coverage)
/// without touching the file system.
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl LineSink for NoopSink {
    fn append(&self, _entry: &str) -> io::Result<()> {
        Ok(())
    }
}
