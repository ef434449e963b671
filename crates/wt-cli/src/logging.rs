//! Log file setup.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Returns `~/.wakatime.log`.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".wakatime.log"))
}

/// Level filter: `debug` when verbose, else `RUST_LOG` or `info`.
fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Initializes tracing to append to `logfile` (or the default log file).
///
/// Calling it again once a subscriber is installed is a no-op.
pub fn init(logfile: Option<&Path>, verbose: bool) -> Result<PathBuf> {
    let path = logfile
        .map(Path::to_path_buf)
        .or_else(default_log_path)
        .context("could not determine log file location")?;
    let file = open_log_file(&path)?;

    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();

    Ok(path)
}

/// Initializes tracing to stderr, for when the log file is unusable.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_is_in_home() {
        let path = default_log_path().unwrap();
        assert_eq!(path.file_name().unwrap(), ".wakatime.log");
    }

    #[test]
    fn test_open_log_file_creates_parent_directories() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("logs/nested/wakatime.log");

        open_log_file(&path).unwrap();

        assert!(path.is_file());
    }

    #[test]
    fn test_open_log_file_appends() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("wakatime.log");
        std::fs::write(&path, "existing line\n").unwrap();

        {
            use std::io::Write;
            let mut file = open_log_file(&path).unwrap();
            writeln!(file, "new line").unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "existing line\nnew line\n");
    }

    #[test]
    fn test_init_fails_for_unwritable_location() {
        let temp = tempfile::tempdir().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let result = init(Some(&blocker.join("wakatime.log")), false);
        assert!(result.is_err());
    }
}
