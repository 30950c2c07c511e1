//! Client configuration.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `KABUCHART_API_BASE_URL` | `http://localhost:8000/api` | Base URL of the backend |
//! | `KABUCHART_TIMEOUT_MS` | `10000` | Per-request timeout |
//! | `KABUCHART_DEFAULT_FROM` | `20240101` | Start of the default chart window |
//! | `KABUCHART_LOCALE` | `ja` | Language of user-facing messages (`ja`, `en`) |

use std::env;

use crate::{DateRange, Locale, TradingDate, ValidationError};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// The upstream free plan only serves sessions from 2024 onward.
pub const DEFAULT_FROM: &str = "20240101";

/// Settings shared by the API client and the controllers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub default_from: TradingDate,
    pub locale: Locale,
}

impl ClientConfig {
    /// Built-in defaults, no environment lookup.
    pub fn new() -> Result<Self, ValidationError> {
        Ok(Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            default_from: TradingDate::parse(DEFAULT_FROM)?,
            locale: Locale::default(),
        })
    }

    /// Defaults overridden by any `KABUCHART_*` variables that are set.
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ValidationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new()?;

        if let Some(value) = lookup("KABUCHART_API_BASE_URL") {
            config = config.with_base_url(value)?;
        }
        if let Some(value) = lookup("KABUCHART_TIMEOUT_MS") {
            config = config.with_timeout_ms(parse_timeout(&value)?);
        }
        if let Some(value) = lookup("KABUCHART_DEFAULT_FROM") {
            config.default_from = TradingDate::parse(&value)?;
        }
        if let Some(value) = lookup("KABUCHART_LOCALE") {
            config.locale = value.parse()?;
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ValidationError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl { value: base_url });
        }
        self.base_url = trimmed.to_owned();
        Ok(self)
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_default_from(mut self, default_from: TradingDate) -> Self {
        self.default_from = default_from;
        self
    }

    /// Window used when the caller gives no explicit start date.
    pub fn default_range(&self) -> DateRange {
        DateRange::starting(self.default_from)
    }
}

fn parse_timeout(value: &str) -> Result<u64, ValidationError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|ms| *ms > 0)
        .ok_or_else(|| ValidationError::InvalidTimeout {
            value: value.to_owned(),
        })
}
