//! # Domain Models
//!
//! Canonical record types consumed by the chart pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`DailyRecord`] | One trading day of OHLCV data |
//! | [`IndicatorRecord`] | Server-computed indicators for one day |
//! | [`MergedRecord`] | Price and indicator fields for one day |
//! | [`SecurityCode`] | Validated security code |
//! | [`SecurityInfo`] | Security Master row |
//! | [`TradingDate`] | Session date (`YYYYMMDD` / `YYYY-MM-DD`) |
//! | [`DateRange`] | Optional from/to window |
//!
//! Every price and indicator value is optional. `None` means "no data" and
//! is never coerced to zero anywhere in this crate.

mod range;
mod records;
mod security;
mod trading_date;

pub use range::DateRange;
pub use records::{DailyRecord, IndicatorField, IndicatorRecord, MergedRecord, PriceFields};
pub use security::{chart_title, SecurityCode, SecurityInfo};
pub use trading_date::TradingDate;
