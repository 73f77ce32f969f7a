//! Logging setup
//!
//! stdout carries the MCP protocol, so logs go to stderr or, when a log
//! file is configured, to that file.

use linear_mcp::LogLevel;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

/// A thread-safe writer that flushes and syncs the log file on every write.
///
/// Log lines are on disk as soon as they are written, so a server killed by
/// its client still leaves a complete log behind.
///
/// # Example
///
/// ```no_run
/// use std::fs::File;
/// use std::io::Write;
/// use std::sync::{Arc, Mutex};
/// use linear_mcp_cli::logging::FileWriterGuard;
///
/// let file = File::create("log.txt").unwrap();
/// let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
/// guard.write_all(b"Log message\n").unwrap();
/// ```
#[derive(Clone)]
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Pick the effective level from the command-line flags and `LOG_LEVEL`
pub fn effective_level(verbose: bool, quiet: bool, configured: LogLevel) -> LogLevel {
    if quiet {
        LogLevel::Error
    } else if verbose {
        LogLevel::Debug
    } else {
        configured
    }
}

/// Install the global tracing subscriber
pub fn init_logging(level: LogLevel, log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::new(level.as_directive());

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let guard = FileWriterGuard::new(Arc::new(Mutex::new(file)));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(move || guard.clone())
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_file_writer_guard_writes_through() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let mut guard = FileWriterGuard::new(Arc::new(Mutex::new(file.reopen().unwrap())));

        guard.write_all(b"first line\n").unwrap();
        guard.flush().unwrap();

        let mut contents = String::new();
        file.reopen().unwrap().read_to_string(&mut contents).unwrap();
        assert_eq!(contents, "first line\n");
    }

    #[test]
    fn test_flags_override_configured_level() {
        assert_eq!(effective_level(false, false, LogLevel::Warn), LogLevel::Warn);
        assert_eq!(effective_level(true, false, LogLevel::Warn), LogLevel::Debug);
        assert_eq!(effective_level(false, true, LogLevel::Debug), LogLevel::Error);
    }
}
