use std::path::Path;
use std::time::Duration;

use chrono::Weekday;
use config::{Config, Environment, File};
use digest_core::Week;
use serde::Deserialize;

use crate::error::{PollerError, PollerResult};

/// File name (without extension) looked up in the config directory.
/// Any format the `config` crate understands works: yaml, yml, toml, json.
pub const CONFIG_FILE_STEM: &str = "weekly-digest";

/// Environment overrides use `DIGEST__SECTION__KEY`, e.g. `DIGEST__GOOGLE__TOKEN`.
pub const ENV_PREFIX: &str = "DIGEST";

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const DEFAULT_POLL_HOURS: u64 = 3;
const DEFAULT_LOOKAHEAD_DAYS: u32 = 7;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct DigestConfig {
    #[serde(default)]
    pub google: GoogleConfig,

    /// Calendars to poll, each in its own task
    #[serde(default)]
    pub calendars: Vec<CalendarConfig>,

    /// Labels printed as day headers
    #[serde(default)]
    pub days: DayNames,

    /// Seconds before a calendar or webhook request is abandoned
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_http_timeout_secs() -> u64 {
    DEFAULT_HTTP_TIMEOUT_SECS
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleConfig {
    /// API key for the Calendar v3 REST API
    #[serde(default)]
    pub token: String,

    #[serde(default = "default_api_base")]
    pub api_base: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// Google calendar id, e.g. `abc123@group.calendar.google.com`
    pub id: String,

    /// Webhook URL the rendered days are posted to
    pub webhook: String,

    /// Name used in logs, defaults to the id
    #[serde(default)]
    pub name: Option<String>,

    /// Hours between polls; 0 means the default of 3 hours
    #[serde(default)]
    pub time: u64,

    #[serde(default = "default_lookahead_days")]
    pub lookahead_days: u32,
}

fn default_lookahead_days() -> u32 {
    DEFAULT_LOOKAHEAD_DAYS
}

impl CalendarConfig {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn poll_interval(&self) -> Duration {
        let hours = if self.time == 0 {
            DEFAULT_POLL_HOURS
        } else {
            self.time
        };
        Duration::from_secs(hours * 60 * 60)
    }

    pub fn lookahead(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.lookahead_days))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DayNames {
    pub mon: String,
    pub tue: String,
    pub wed: String,
    pub thu: String,
    pub fri: String,
    pub sat: String,
    pub sun: String,
}

impl Default for DayNames {
    fn default() -> Self {
        let english = Week::<String>::english_labels();
        Self {
            mon: english[Weekday::Mon].clone(),
            tue: english[Weekday::Tue].clone(),
            wed: english[Weekday::Wed].clone(),
            thu: english[Weekday::Thu].clone(),
            fri: english[Weekday::Fri].clone(),
            sat: english[Weekday::Sat].clone(),
            sun: english[Weekday::Sun].clone(),
        }
    }
}

impl DayNames {
    pub fn labels(&self) -> Week<String> {
        Week::from_fn(|day| {
            let label = match day {
                Weekday::Mon => &self.mon,
                Weekday::Tue => &self.tue,
                Weekday::Wed => &self.wed,
                Weekday::Thu => &self.thu,
                Weekday::Fri => &self.fri,
                Weekday::Sat => &self.sat,
                Weekday::Sun => &self.sun,
            };
            label.clone()
        })
    }
}

impl DigestConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    /// Load `weekly-digest.*` from `config_dir` (optional) and overlay
    /// `DIGEST__*` environment variables.
    pub fn load(config_dir: &Path) -> PollerResult<Self> {
        let file = config_dir.join(CONFIG_FILE_STEM);

        let config: DigestConfig = Config::builder()
            .add_source(File::with_name(&file.to_string_lossy()).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PollerResult<()> {
        if self.google.token.trim().is_empty() {
            return Err(PollerError::Config(
                "google.token must be set (or DIGEST__GOOGLE__TOKEN)".to_string(),
            ));
        }

        if self.http_timeout_secs == 0 {
            return Err(PollerError::Config(
                "http_timeout_secs must be greater than zero".to_string(),
            ));
        }

        for (index, calendar) in self.calendars.iter().enumerate() {
            if calendar.id.trim().is_empty() {
                return Err(PollerError::Config(format!(
                    "calendars[{}]: id must not be empty",
                    index
                )));
            }
            if calendar.webhook.trim().is_empty() {
                return Err(PollerError::Config(format!(
                    "calendar {}: webhook must not be empty",
                    calendar.display_name()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calendar(time: u64) -> CalendarConfig {
        CalendarConfig {
            id: "team@group.calendar.google.com".to_string(),
            webhook: "https://discord.com/api/webhooks/1/abc".to_string(),
            name: None,
            time,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }

    #[test]
    fn test_poll_interval_defaults_to_three_hours() {
        assert_eq!(calendar(0).poll_interval(), Duration::from_secs(3 * 3600));
        assert_eq!(calendar(5).poll_interval(), Duration::from_secs(5 * 3600));
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut cal = calendar(0);
        assert_eq!(cal.display_name(), "team@group.calendar.google.com");
        cal.name = Some("Team".to_string());
        assert_eq!(cal.display_name(), "Team");
    }

    #[test]
    fn test_day_names_default_to_english() {
        let labels = DayNames::default().labels();
        assert_eq!(labels[Weekday::Wed], "Wednesday");
    }

    #[test]
    fn test_validate_requires_token() {
        let config = DigestConfig {
            google: GoogleConfig::default(),
            calendars: vec![calendar(0)],
            days: DayNames::default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        };
        assert!(matches!(config.validate(), Err(PollerError::Config(_))));
    }

    #[test]
    fn test_validate_requires_webhook() {
        let mut cal = calendar(0);
        cal.webhook = String::new();
        let config = DigestConfig {
            google: GoogleConfig {
                token: "key".to_string(),
                ..Default::default()
            },
            calendars: vec![cal],
            days: DayNames::default(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = DigestConfig {
            google: GoogleConfig {
                token: "key".to_string(),
                ..Default::default()
            },
            calendars: vec![calendar(0)],
            days: DayNames::default(),
            http_timeout_secs: 0,
        };
        assert!(matches!(config.validate(), Err(PollerError::Config(_))));
        assert_eq!(
            DigestConfig {
                http_timeout_secs: 12,
                ..config
            }
            .http_timeout(),
            Duration::from_secs(12)
        );
    }
}
