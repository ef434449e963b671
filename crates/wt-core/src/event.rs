//! Coding activity events reported by editor plugins.

use std::path::PathBuf;

use chrono::Utc;

/// One reported unit of coding activity for a single file.
///
/// `project` and `tags` are not stored here; they are derived from the
/// target file's location by [`crate::ProjectDetector`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Absolute path of the file the action happened in.
    pub target_file: PathBuf,
    /// Floating-point unix epoch seconds.
    pub timestamp: f64,
    /// End of the action, turning it into a duration.
    ///
    /// Kept as the caller supplied it; the API accepts it verbatim.
    pub endtime: Option<String>,
    /// The action was triggered by writing the file.
    pub is_write: bool,
    /// Editor plugin name and version, appended to the User-Agent.
    pub plugin: Option<String>,
}

impl Event {
    /// Creates an event for `target_file` stamped with the current time.
    pub fn new(target_file: impl Into<PathBuf>) -> Self {
        Self {
            target_file: target_file.into(),
            timestamp: now_epoch_seconds(),
            endtime: None,
            is_write: false,
            plugin: None,
        }
    }

    /// Overrides the event timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Returns true when the target is an existing regular file.
    ///
    /// Events whose target is missing are dropped without contacting the API.
    pub fn target_exists(&self) -> bool {
        self.target_file.is_file()
    }
}

/// Current time as floating-point unix epoch seconds.
#[expect(
    clippy::cast_precision_loss,
    reason = "microsecond epoch values fit well within f64 precision"
)]
pub fn now_epoch_seconds() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
