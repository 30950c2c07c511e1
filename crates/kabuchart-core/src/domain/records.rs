use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};

use crate::TradingDate;

/// Read access to the per-day price fields shared by every record shape.
///
/// The sanitizer and the classifiers work against this trait so the same
/// code accepts a plain [`DailyRecord`] or a [`MergedRecord`].
pub trait PriceFields {
    fn date(&self) -> TradingDate;
    fn open(&self) -> Option<f64>;
    fn high(&self) -> Option<f64>;
    fn low(&self) -> Option<f64>;
    fn close(&self) -> Option<f64>;
    fn volume(&self) -> Option<u64>;
}

/// One trading day of OHLCV data. Absent fields mean no trade or no data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: TradingDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_volume")]
    pub volume: Option<u64>,
}

impl DailyRecord {
    pub fn new(
        date: TradingDate,
        open: Option<f64>,
        high: Option<f64>,
        low: Option<f64>,
        close: Option<f64>,
        volume: Option<u64>,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl PriceFields for DailyRecord {
    fn date(&self) -> TradingDate {
        self.date
    }

    fn open(&self) -> Option<f64> {
        self.open
    }

    fn high(&self) -> Option<f64> {
        self.high
    }

    fn low(&self) -> Option<f64> {
        self.low
    }

    fn close(&self) -> Option<f64> {
        self.close
    }

    fn volume(&self) -> Option<u64> {
        self.volume
    }
}

/// Indicator fields computed by the Analytics service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorField {
    Sma5,
    Sma25,
    Sma75,
    Rsi14,
    Macd,
    MacdSignal,
    MacdHistogram,
    BbUpper,
    BbMiddle,
    BbLower,
}

impl IndicatorField {
    pub const ALL: [Self; 10] = [
        Self::Sma5,
        Self::Sma25,
        Self::Sma75,
        Self::Rsi14,
        Self::Macd,
        Self::MacdSignal,
        Self::MacdHistogram,
        Self::BbUpper,
        Self::BbMiddle,
        Self::BbLower,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sma5 => "sma_5",
            Self::Sma25 => "sma_25",
            Self::Sma75 => "sma_75",
            Self::Rsi14 => "rsi_14",
            Self::Macd => "macd",
            Self::MacdSignal => "macd_signal",
            Self::MacdHistogram => "macd_histogram",
            Self::BbUpper => "bb_upper",
            Self::BbMiddle => "bb_middle",
            Self::BbLower => "bb_lower",
        }
    }
}

impl Display for IndicatorField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Indicator values for one trading day.
///
/// Each indicator is absent for its own lookback window (the first 74 days
/// carry no `sma_75`, for instance).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub date: TradingDate,
    #[serde(default)]
    pub sma_5: Option<f64>,
    #[serde(default)]
    pub sma_25: Option<f64>,
    #[serde(default)]
    pub sma_75: Option<f64>,
    #[serde(default)]
    pub rsi_14: Option<f64>,
    #[serde(default)]
    pub macd: Option<f64>,
    #[serde(default)]
    pub macd_signal: Option<f64>,
    #[serde(default)]
    pub macd_histogram: Option<f64>,
    #[serde(default)]
    pub bb_upper: Option<f64>,
    #[serde(default)]
    pub bb_middle: Option<f64>,
    #[serde(default)]
    pub bb_lower: Option<f64>,
}

impl IndicatorRecord {
    /// A record for `date` with every indicator absent.
    pub fn empty(date: TradingDate) -> Self {
        Self {
            date,
            sma_5: None,
            sma_25: None,
            sma_75: None,
            rsi_14: None,
            macd: None,
            macd_signal: None,
            macd_histogram: None,
            bb_upper: None,
            bb_middle: None,
            bb_lower: None,
        }
    }

    pub const fn get(&self, field: IndicatorField) -> Option<f64> {
        match field {
            IndicatorField::Sma5 => self.sma_5,
            IndicatorField::Sma25 => self.sma_25,
            IndicatorField::Sma75 => self.sma_75,
            IndicatorField::Rsi14 => self.rsi_14,
            IndicatorField::Macd => self.macd,
            IndicatorField::MacdSignal => self.macd_signal,
            IndicatorField::MacdHistogram => self.macd_histogram,
            IndicatorField::BbUpper => self.bb_upper,
            IndicatorField::BbMiddle => self.bb_middle,
            IndicatorField::BbLower => self.bb_lower,
        }
    }
}

/// Base price fields and indicator fields for one date.
///
/// This is also the row shape of the Analytics technical endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub date: TradingDate,
    #[serde(default)]
    pub open: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_volume")]
    pub volume: Option<u64>,
    #[serde(default)]
    pub sma_5: Option<f64>,
    #[serde(default)]
    pub sma_25: Option<f64>,
    #[serde(default)]
    pub sma_75: Option<f64>,
    #[serde(default)]
    pub rsi_14: Option<f64>,
    #[serde(default)]
    pub macd: Option<f64>,
    #[serde(default)]
    pub macd_signal: Option<f64>,
    #[serde(default)]
    pub macd_histogram: Option<f64>,
    #[serde(default)]
    pub bb_upper: Option<f64>,
    #[serde(default)]
    pub bb_middle: Option<f64>,
    #[serde(default)]
    pub bb_lower: Option<f64>,
}

impl MergedRecord {
    /// Combine one base record and one indicator record. The base date wins.
    pub fn combine(base: &DailyRecord, indicators: &IndicatorRecord) -> Self {
        Self {
            date: base.date,
            open: base.open,
            high: base.high,
            low: base.low,
            close: base.close,
            volume: base.volume,
            sma_5: indicators.sma_5,
            sma_25: indicators.sma_25,
            sma_75: indicators.sma_75,
            rsi_14: indicators.rsi_14,
            macd: indicators.macd,
            macd_signal: indicators.macd_signal,
            macd_histogram: indicators.macd_histogram,
            bb_upper: indicators.bb_upper,
            bb_middle: indicators.bb_middle,
            bb_lower: indicators.bb_lower,
        }
    }

    pub fn base(&self) -> DailyRecord {
        DailyRecord::new(
            self.date,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }

    pub fn indicators(&self) -> IndicatorRecord {
        IndicatorRecord {
            date: self.date,
            sma_5: self.sma_5,
            sma_25: self.sma_25,
            sma_75: self.sma_75,
            rsi_14: self.rsi_14,
            macd: self.macd,
            macd_signal: self.macd_signal,
            macd_histogram: self.macd_histogram,
            bb_upper: self.bb_upper,
            bb_middle: self.bb_middle,
            bb_lower: self.bb_lower,
        }
    }

    pub const fn indicator(&self, field: IndicatorField) -> Option<f64> {
        match field {
            IndicatorField::Sma5 => self.sma_5,
            IndicatorField::Sma25 => self.sma_25,
            IndicatorField::Sma75 => self.sma_75,
            IndicatorField::Rsi14 => self.rsi_14,
            IndicatorField::Macd => self.macd,
            IndicatorField::MacdSignal => self.macd_signal,
            IndicatorField::MacdHistogram => self.macd_histogram,
            IndicatorField::BbUpper => self.bb_upper,
            IndicatorField::BbMiddle => self.bb_middle,
            IndicatorField::BbLower => self.bb_lower,
        }
    }
}

impl PriceFields for MergedRecord {
    fn date(&self) -> TradingDate {
        self.date
    }

    fn open(&self) -> Option<f64> {
        self.open
    }

    fn high(&self) -> Option<f64> {
        self.high
    }

    fn low(&self) -> Option<f64> {
        self.low
    }

    fn close(&self) -> Option<f64> {
        self.close
    }

    fn volume(&self) -> Option<u64> {
        self.volume
    }
}

/// Volume arrives as a JSON integer or as an integral float (`1200.0`) from
/// the dataframe-backed services. Anything that is not a non-negative whole
/// number is treated as no data.
fn deserialize_volume<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u64::MAX as f64)
                .map(|v| v as u64)
        }),
        _ => None,
    })
}
