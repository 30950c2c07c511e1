use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::PriceFields;

/// The four prices of a day, all present and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    /// Returns `None` unless every price is present and finite.
    pub fn from_record<R: PriceFields + ?Sized>(record: &R) -> Option<Self> {
        Some(Self {
            open: finite(record.open())?,
            high: finite(record.high())?,
            low: finite(record.low())?,
            close: finite(record.close())?,
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Records usable as candles: open, high, low and close all present.
///
/// Order is preserved and nothing is deduplicated, so sanitizing twice
/// returns the same series.
pub fn sanitize_candles<R: PriceFields + Clone>(records: &[R]) -> Vec<R> {
    let retained = records
        .iter()
        .filter(|record| Ohlc::from_record(*record).is_some())
        .cloned()
        .collect::<Vec<_>>();
    log_dropped("candle", records.len(), retained.len());
    retained
}

/// Records usable as volume bars: volume present.
pub fn sanitize_volume<R: PriceFields + Clone>(records: &[R]) -> Vec<R> {
    let retained = records
        .iter()
        .filter(|record| record.volume().is_some())
        .cloned()
        .collect::<Vec<_>>();
    log_dropped("volume", records.len(), retained.len());
    retained
}

fn log_dropped(series: &'static str, total: usize, retained: usize) {
    if retained < total {
        debug!(series, dropped = total - retained, retained, "sanitizer dropped incomplete records");
    }
}
