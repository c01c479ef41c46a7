//! TOML configuration for the CLI.
//!
//! ```toml
//! data = "branches.json"
//!
//! [hours]
//! weekday_open = "09:00"
//! weekday_close = "17:00"
//! saturday_open = "09:00"
//! saturday_close = "13:00"
//!
//! [booking]
//! timezone = "America/Chicago"
//! max_days_ahead = 30
//! ```
//!
//! Every key is optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use branch_slots::{OperatingHours, SlotTime, Window, DEFAULT_MAX_DAYS_AHEAD};
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// JSON directory file; the built-in data is used when unset.
    pub data: Option<PathBuf>,
    #[serde(default)]
    pub hours: HoursConfig,
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HoursConfig {
    pub weekday_open: SlotTime,
    pub weekday_close: SlotTime,
    // Kept separate from weekday_open even though both default to 09:00.
    pub saturday_open: SlotTime,
    pub saturday_close: SlotTime,
}

impl Default for HoursConfig {
    fn default() -> Self {
        let hours = OperatingHours::default();
        Self {
            weekday_open: hours.weekday.open,
            weekday_close: hours.weekday.close,
            saturday_open: hours.saturday.open,
            saturday_close: hours.saturday.close,
        }
    }
}

impl HoursConfig {
    pub fn operating_hours(&self) -> Result<OperatingHours> {
        let weekday = Window::new(self.weekday_open, self.weekday_close)
            .context("invalid [hours] weekday window")?;
        let saturday = Window::new(self.saturday_open, self.saturday_close)
            .context("invalid [hours] saturday window")?;
        Ok(OperatingHours::new(weekday, saturday))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    /// IANA zone used to decide what "today" is.
    pub timezone: String,
    pub max_days_ahead: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            max_days_ahead: DEFAULT_MAX_DAYS_AHEAD,
        }
    }
}

impl BookingConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("invalid [booking] timezone {:?}: {e}", self.timezone))
    }

    /// The current calendar date in the configured zone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).context("failed to parse config")?;
        config.hours.operating_hours()?;
        config.booking.timezone()?;
        Ok(config)
    }

    /// Load `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("in config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }
}
