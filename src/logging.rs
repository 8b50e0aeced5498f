use std::env;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Where logs go unless `--log` says otherwise. The terminal is busy
/// drawing the matrix, so they cannot share it.
pub fn default_log_path() -> PathBuf {
    PathBuf::from(format!(
        "{}/.local/share/pomodoro_matrix/pomodoro.log",
        env::var("HOME").unwrap_or_else(|_| ".".to_string())
    ))
}

/// Open `path` for appending, creating missing parent directories.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Install the global subscriber, writing to `path`. Falls back to stderr
/// when the file cannot be opened.
pub fn init(verbose: bool, path: &Path) {
    let log_level = if verbose { "debug" } else { "info" };
    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());

    let (writer, ansi, failure) = match open_log_file(path) {
        Ok(file) => (BoxMakeWriter::new(Mutex::new(file)), false, None),
        Err(e) => (BoxMakeWriter::new(io::stderr), true, Some(e)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .compact()
        .init();

    if let Some(e) = failure {
        warn!("Cannot write log file {}, logging to stderr: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_log_path_is_under_local_share() {
        let path = default_log_path();
        assert!(path.ends_with(".local/share/pomodoro_matrix/pomodoro.log"));
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/logs/pomodoro.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_in_current_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.log");
        assert!(open_log_file(&file).is_ok());
        assert!(open_log_file(dir.path()).is_err());
    }
}
