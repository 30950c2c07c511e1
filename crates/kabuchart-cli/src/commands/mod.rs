mod chart;
mod daily;
mod financials;
mod lookup;
mod search;

use std::time::Instant;

use kabuchart_core::{
    ApiClient, ClientConfig, DateRange, Envelope, EnvelopeError, EnvelopeMeta, ErrorCategory,
    Locale, SecurityCode, TradingDate,
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{Cli, Command, RangeArgs};
use crate::error::CliError;

pub struct CommandResult<T> {
    pub data: T,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    /// Attach a classified fetch failure.
    pub fn with_failure(mut self, category: &ErrorCategory, locale: Locale) -> Self {
        self.errors.push(EnvelopeError::from_category(category, locale));
        self
    }
}

pub async fn run(cli: &Cli) -> Result<Envelope<Value>, CliError> {
    let config = client_config(cli)?;
    let locale = config.locale;
    debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "client configured");
    let api = ApiClient::with_reqwest(config);
    let started = Instant::now();

    match &cli.command {
        Command::Search(args) => finish(search::run(args, &api).await?, started, locale),
        Command::Lookup(args) => finish(lookup::run(args, &api).await?, started, locale),
        Command::Chart(args) => finish(chart::run(args, &api).await?, started, locale),
        Command::Daily(args) => finish(daily::run(args, &api).await?, started, locale),
        Command::Financials(args) => {
            finish(financials::run(args, &api).await?, started, locale)
        }
    }
}

fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        if timeout_ms == 0 {
            return Err(CliError::Command(String::from(
                "--timeout-ms must be greater than zero",
            )));
        }
        config = config.with_timeout_ms(timeout_ms);
    }
    if let Some(locale) = cli.locale {
        config = config.with_locale(locale.into());
    }
    Ok(config)
}

fn finish<T: Serialize>(
    result: CommandResult<T>,
    started: Instant,
    locale: Locale,
) -> Result<Envelope<Value>, CliError> {
    let CommandResult {
        data,
        warnings,
        errors,
    } = result;

    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), locale, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    Ok(Envelope::with_errors(meta, data, errors)?.into_value()?)
}

/// Code plus date window, falling back to the configured default start.
pub fn parse_range(
    args: &RangeArgs,
    config: &ClientConfig,
) -> Result<(SecurityCode, DateRange), CliError> {
    let code = SecurityCode::parse(&args.code)?;
    let from = match &args.from {
        Some(value) => TradingDate::parse(value)?,
        None => config.default_from,
    };
    let to = args.to.as_deref().map(TradingDate::parse).transpose()?;
    Ok((code, DateRange::new(Some(from), to)?))
}
