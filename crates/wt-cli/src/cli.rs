//! Command-line argument definitions.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use wt_core::Event;

/// Event appender for wakatime, automatic time tracking for text editors.
///
/// Invoked by editor plugins once per file action. Exit codes: 0 sent,
/// 2 usage or missing api key, 101 file does not exist, 102 api error.
#[derive(Parser)]
#[command(name = "wakatime", version, about, long_about = None)]
pub struct Cli {
    /// Absolute path to file for current action.
    #[arg(long, value_name = "FILE")]
    pub file: PathBuf,

    /// Floating-point unix epoch timestamp; uses current time by default.
    #[arg(long, value_name = "TIME", value_parser = parse_timestamp)]
    pub time: Option<f64>,

    /// End timestamp turning this action into a duration.
    #[arg(long, value_name = "TIME")]
    pub endtime: Option<String>,

    /// Note action was triggered from writing to a file.
    #[arg(long)]
    pub write: bool,

    /// Text editor plugin name and version for the User-Agent header.
    #[arg(long)]
    pub plugin: Option<String>,

    /// API key; uses `api_key` from ~/.wakatime.conf by default.
    #[arg(long)]
    pub key: Option<String>,

    /// Log file path; defaults to ~/.wakatime.log.
    #[arg(long, value_name = "PATH")]
    pub logfile: Option<PathBuf>,

    /// Config file path; defaults to ~/.wakatime.conf.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Turn on debug messages in the log file.
    #[arg(long)]
    pub verbose: bool,
}

/// Parses `--time`, rejecting values JSON cannot represent.
fn parse_timestamp(value: &str) -> Result<f64, String> {
    let time: f64 = value
        .trim()
        .parse()
        .map_err(|err| format!("invalid timestamp: {err}"))?;
    if time.is_finite() {
        Ok(time)
    } else {
        Err(format!("timestamp must be a finite number, got {value}"))
    }
}

impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("file", &self.file)
            .field("time", &self.time)
            .field("endtime", &self.endtime)
            .field("write", &self.write)
            .field("plugin", &self.plugin)
            .field("key", &self.key.as_ref().map(|_| "[REDACTED]"))
            .field("logfile", &self.logfile)
            .field("config", &self.config)
            .field("verbose", &self.verbose)
            .finish()
    }
}

impl Cli {
    /// Builds the event described by the arguments.
    ///
    /// The file path is made absolute with symlinks resolved when it exists.
    pub fn event(&self) -> Event {
        let target_file = std::fs::canonicalize(&self.file)
            .or_else(|_| std::path::absolute(&self.file))
            .unwrap_or_else(|_| self.file.clone());

        let mut event = Event::new(target_file);
        if let Some(time) = self.time {
            event = event.at(time);
        }
        event.endtime.clone_from(&self.endtime);
        event.is_write = self.write;
        event.plugin.clone_from(&self.plugin);
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_all_flags() {
        let cli = Cli::try_parse_from([
            "wakatime",
            "--file",
            "/tmp/a.rs",
            "--time",
            "1700000000.25",
            "--endtime",
            "1700000100",
            "--write",
            "--plugin",
            "vim-wakatime/0.2.1",
            "--key",
            "secret-key",
            "--logfile",
            "/tmp/wakatime.log",
            "--config",
            "/tmp/wakatime.conf",
            "--verbose",
        ])
        .unwrap();

        assert_eq!(cli.file, PathBuf::from("/tmp/a.rs"));
        assert_eq!(cli.time, Some(1_700_000_000.25));
        assert_eq!(cli.endtime.as_deref(), Some("1700000100"));
        assert!(cli.write);
        assert!(cli.verbose);
        assert_eq!(cli.plugin.as_deref(), Some("vim-wakatime/0.2.1"));
    }

    #[test]
    fn test_file_is_required() {
        assert!(Cli::try_parse_from(["wakatime", "--write"]).is_err());
    }

    #[test]
    fn test_time_must_be_numeric() {
        assert!(Cli::try_parse_from(["wakatime", "--file", "/tmp/a.rs", "--time", "soon"]).is_err());
    }

    #[test]
    fn test_time_must_be_finite() {
        for value in ["NaN", "nan", "inf", "-inf", "infinity"] {
            let result = Cli::try_parse_from(["wakatime", "--file", "/tmp/a.rs", "--time", value]);
            assert!(result.is_err(), "accepted --time {value}");
        }
    }

    #[test]
    fn test_non_finite_time_is_usage_error() {
        let err = Cli::try_parse_from(["wakatime", "--file", "/tmp/a.rs", "--time", "NaN"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_event_uses_given_time_and_flags() {
        let cli = Cli::try_parse_from([
            "wakatime",
            "--file",
            "/no/such/dir/a.rs",
            "--time",
            "42.5",
            "--write",
        ])
        .unwrap();

        let event = cli.event();
        assert!((event.timestamp - 42.5).abs() < f64::EPSILON);
        assert!(event.is_write);
        assert_eq!(event.target_file, PathBuf::from("/no/such/dir/a.rs"));
    }

    #[test]
    fn test_event_resolves_relative_paths() {
        let cli = Cli::try_parse_from(["wakatime", "--file", "relative/a.rs"]).unwrap();
        assert!(cli.event().target_file.is_absolute());
    }

    #[test]
    fn test_debug_redacts_key() {
        let cli =
            Cli::try_parse_from(["wakatime", "--file", "/tmp/a.rs", "--key", "secret-key"]).unwrap();
        let debug = format!("{cli:?}");
        assert!(!debug.contains("secret-key"));
    }
}
