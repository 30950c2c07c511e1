//! CLI argument definitions for kabuchart.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Search the Security Master by code or company name |
//! | `lookup` | Fetch the Security Master row for one exact code |
//! | `chart` | Load a security and build its render-ready chart frame |
//! | `daily` | Fetch raw daily prices without indicators |
//! | `financials` | Fetch published financial statements for one code |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--base-url` | `KABUCHART_API_BASE_URL` | Backend base URL |
//! | `--timeout-ms` | `KABUCHART_TIMEOUT_MS` | Per-request timeout in ms |
//! | `--locale` | `KABUCHART_LOCALE` | Language of user-facing messages |
//!
//! # Examples
//!
//! ```bash
//! # Find a security
//! kabuchart search トヨタ --limit 5
//!
//! # Build the chart frame for Q1 2024
//! kabuchart chart 7203 --from 20240101 --to 20240331 --pretty
//!
//! # Raw daily prices as a table
//! kabuchart daily 7203 --from 2024-03-01 --format table
//!
//! # Published financial statements
//! kabuchart financials 7203 --pretty
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use kabuchart_core::Locale;

/// Stock chart data from the Security Master and Analytics services.
#[derive(Debug, Parser)]
#[command(
    name = "kabuchart",
    author,
    version,
    about = "Stock chart data pipeline CLI",
    long_about = "kabuchart fetches daily prices and server-computed indicators for a \
security and turns them into render-ready chart structures: candlesticks, volume bars, \
indicator overlays and shared axis ticks.\n\
\n\
Use 'kabuchart <command> --help' for command-specific help."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Backend base URL, overriding KABUCHART_API_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds, overriding KABUCHART_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Message language, overriding KABUCHART_LOCALE.
    #[arg(long, global = true, value_enum)]
    pub locale: Option<LocaleArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text for terminal display.
    Table,
    /// Single JSON object output.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LocaleArg {
    Ja,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(value: LocaleArg) -> Self {
        match value {
            LocaleArg::Ja => Self::Ja,
            LocaleArg::En => Self::En,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search securities by code or company name.
    Search(SearchArgs),
    /// Look up one security by exact code.
    Lookup(LookupArgs),
    /// Build the chart frame for a security.
    Chart(RangeArgs),
    /// Fetch raw daily prices.
    Daily(DailyArgs),
    /// Fetch financial statements for a security.
    Financials(LookupArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Security code or part of a company name.
    pub query: String,

    /// Maximum number of results to print.
    #[arg(long, default_value_t = 20)]
    pub limit: usize,
}

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Security code, e.g. 7203.
    pub code: String,
}

#[derive(Debug, Args)]
pub struct RangeArgs {
    /// Security code, e.g. 7203.
    pub code: String,

    /// First session (YYYYMMDD or YYYY-MM-DD). Defaults to KABUCHART_DEFAULT_FROM.
    #[arg(long)]
    pub from: Option<String>,

    /// Last session (YYYYMMDD or YYYY-MM-DD). Open-ended when omitted.
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Debug, Args)]
pub struct DailyArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Keep only the most recent N sessions.
    #[arg(long)]
    pub limit: Option<usize>,
}
