use std::path::PathBuf;

use clap::{ArgAction, Parser};
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};

/// Log files are named `weekly-digest.<date>.log`.
const LOG_FILE_PREFIX: &str = "weekly-digest";
const LOG_FILE_SUFFIX: &str = "log";
/// Daily files kept in the log directory before the oldest is removed.
const LOG_FILES_KEPT: usize = 14;

#[derive(Debug, Parser)]
#[command(name = "weekly-digest")]
#[command(version)]
#[command(about = "Posts the coming week of calendar events to a webhook, one message per day")]
pub struct Cli {
    /// Directory containing weekly-digest.yaml (or .yml/.toml/.json)
    #[arg(long, value_name = "DIR", default_value = ".", env = "DIGEST_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Also write logs to daily rotated files in this directory
    #[arg(long, value_name = "DIR", env = "DIGEST_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, env = "DIGEST_VERBOSITY")]
    pub verbose: u8,

    /// Run one poll cycle per calendar and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set.
    pub fn log_filter(&self) -> String {
        let level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        format!("warn,digest_core={level},digest_poller={level},weekly_digest={level}")
    }

    /// Rotating log file writer, if a log directory was given.
    pub fn log_file_appender(&self) -> Result<Option<RollingFileAppender>, InitError> {
        let Some(dir) = &self.log_dir else {
            return Ok(None);
        };

        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .filename_suffix(LOG_FILE_SUFFIX)
            .max_log_files(LOG_FILES_KEPT)
            .build(dir)
            .map(Some)
    }
}
