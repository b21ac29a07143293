use std::io;

/// Destination for rendered log entries.
///
/// The logger renders each entry completely (including its trailing
/// newline) before calling `append`, so a serialization failure never
/// reaches the sink.
pub trait LineSink: Send + Sync {
    /// Append one rendered entry.
    ///
    /// **Parameters**
    /// - `entry`: the entry text, newline-terminated. JSON entries span
    ///   several lines.
    ///
    /// **Returns**
    /// - `Ok(())` once the text was handed to the backend.
    /// - `Err(..)` on any I/O failure. The logger passes it to the caller
    ///   without retrying.
    fn append(&self, entry: &str) -> io::Result<()>;
}

impl<S: LineSink + ?Sized> LineSink for &S {
    fn append(&self, entry: &str) -> io::Result<()> {
        (**self).append(entry)
    }
}

impl<S: LineSink + ?Sized> LineSink for Box<S> {
    fn append(&self, entry: &str) -> io::Result<()> {
        (**self).append(entry)
    }
}
