//! Agency-wide tunables.
//!
//! # Responsibility
//! - Hold page sizes and business constants used by views and services.
//! - Load overrides from a JSON file where every field is optional.
//!
//! # Invariants
//! - A validated config never carries a zero page size.
//! - VAT is a whole percentage in `0..=100`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Page sizes and business constants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct AgencyConfig {
    pub claims_page_size: usize,
    pub renewals_page_size: usize,
    pub team_page_size: usize,
    pub inbox_page_size: usize,
    pub tasks_page_size: usize,
    /// Default due date offset for tasks created from emails.
    pub task_due_days: u32,
    pub vat_percent: u32,
    pub top_clients: usize,
    pub trend_months: u32,
}

impl Default for AgencyConfig {
    fn default() -> Self {
        Self {
            claims_page_size: 5,
            renewals_page_size: 10,
            team_page_size: 9,
            inbox_page_size: 50,
            tasks_page_size: 20,
            task_due_days: 7,
            vat_percent: 16,
            top_clients: 5,
            trend_months: 6,
        }
    }
}

impl AgencyConfig {
    /// Reads a JSON config file; absent fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| ConfigError::Io {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let config = Self::from_json(&raw)?;
        log::info!(
            "event=config_load module=config status=ok path={}",
            path.display()
        );
        Ok(config)
    }

    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let page_sizes = [
            ("claimsPageSize", self.claims_page_size),
            ("renewalsPageSize", self.renewals_page_size),
            ("teamPageSize", self.team_page_size),
            ("inboxPageSize", self.inbox_page_size),
            ("tasksPageSize", self.tasks_page_size),
        ];
        if let Some((field, _)) = page_sizes.iter().find(|(_, size)| *size == 0) {
            return Err(ConfigError::ZeroPageSize(*field));
        }
        if self.vat_percent > 100 {
            return Err(ConfigError::VatOutOfRange(self.vat_percent));
        }
        if self.trend_months == 0 {
            return Err(ConfigError::ZeroTrendMonths);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Io { path: PathBuf, message: String },
    Parse(String),
    ZeroPageSize(&'static str),
    VatOutOfRange(u32),
    ZeroTrendMonths,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, message } => {
                write!(f, "failed to read config `{}`: {message}", path.display())
            }
            Self::Parse(message) => write!(f, "invalid config json: {message}"),
            Self::ZeroPageSize(field) => write!(f, "{field} must be at least 1"),
            Self::VatOutOfRange(value) => write!(f, "vatPercent must be 0..=100, got {value}"),
            Self::ZeroTrendMonths => write!(f, "trendMonths must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
