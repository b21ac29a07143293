use crate::sink::LineSink;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Text file target that is opened in append mode for every entry and
/// closed again before `append` returns. No handle is held between
/// calls, and there is no locking against other writers of the same
/// path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Create a sink for `path`.
    ///
    /// With `delete_existing`, a file already at `path` is removed now,
    /// before any entry is written. A missing file is not an error.
    pub fn new(path: impl Into<PathBuf>, delete_existing: bool) -> io::Result<Self> {
        let path = path.into();

        if delete_existing {
            match fs::remove_file(&path) {
                Ok(()) => info!(path = %path.display(), "removed existing log file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        Ok(FileSink { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn append(&self, entry: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(entry.as_bytes())?;
        debug!(path = %self.path.display(), bytes = entry.len(), "appended log entry");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_without_truncating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        let sink = FileSink::new(&path, false).unwrap();
        sink.append("one\n").unwrap();
        sink.append("two\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn delete_of_missing_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let sink = FileSink::new(&path, true).unwrap();
        assert!(!sink.path().exists());
    }

    #[test]
    fn keeps_existing_content_unless_asked() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keep.txt");
        fs::write(&path, "old\n").unwrap();
        FileSink::new(&path, false).unwrap().append("new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "old\nnew\n");
    }
}
