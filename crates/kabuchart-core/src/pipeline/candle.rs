use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::sanitize::Ohlc;
use crate::{PriceFields, TradingDate};

/// Neutral tone used for wicks and unknown fills.
pub const NEUTRAL_HEX: &str = "#9ca3af";

/// Up/down classification shared by candles and volume bars.
///
/// Follows the Japanese market convention: rising days are red, falling
/// days are blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorClass {
    Bull,
    Bear,
}

impl ColorClass {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bull => "bull",
            Self::Bear => "bear",
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Bull => "#ef4444",
            Self::Bear => "#3b82f6",
        }
    }

    /// Candle rule: a close equal to the open is still up.
    pub fn from_open_close(open: f64, close: f64) -> Self {
        if close >= open {
            Self::Bull
        } else {
            Self::Bear
        }
    }
}

impl Display for ColorClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Drawable bar for one day: a body span, a wick span and a color.
///
/// `body_low <= body_high` always holds, whatever the direction of the day.
/// The wick is copied verbatim from low/high and is not checked against the
/// body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleGeometry {
    pub date: TradingDate,
    pub body_low: f64,
    pub body_high: f64,
    pub wick_low: f64,
    pub wick_high: f64,
    pub color: ColorClass,
}

impl CandleGeometry {
    pub fn derive(date: TradingDate, prices: Ohlc) -> Self {
        let color = ColorClass::from_open_close(prices.open, prices.close);
        let (body_low, body_high) = match color {
            ColorClass::Bull => (prices.open, prices.close),
            ColorClass::Bear => (prices.close, prices.open),
        };

        Self {
            date,
            body_low,
            body_high,
            wick_low: prices.low,
            wick_high: prices.high,
            color,
        }
    }

    pub const fn body(&self) -> (f64, f64) {
        (self.body_low, self.body_high)
    }

    pub const fn wick(&self) -> (f64, f64) {
        (self.wick_low, self.wick_high)
    }

    /// Shapes for a renderer back-end, wick first so the body paints over it.
    pub fn primitives(&self) -> [DrawPrimitive; 2] {
        [
            DrawPrimitive::Line {
                from: self.wick_low,
                to: self.wick_high,
                width: 1.0,
                color: NEUTRAL_HEX,
            },
            DrawPrimitive::Rect {
                bottom: self.body_low,
                top: self.body_high,
                width: 6.0,
                min_height_px: 1.0,
                color: self.color.hex(),
            },
        ]
    }
}

/// Sanitize then derive geometry for every complete day.
pub fn derive_all<R: PriceFields>(records: &[R]) -> Vec<CandleGeometry> {
    records
        .iter()
        .filter_map(|record| {
            Ohlc::from_record(record).map(|prices| CandleGeometry::derive(record.date(), prices))
        })
        .collect()
}

/// Renderer-independent shape in price units, centred on the day's slot.
///
/// `width` is in pixels; `min_height_px` keeps flat bodies (open == close)
/// visible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawPrimitive {
    Line {
        from: f64,
        to: f64,
        width: f32,
        color: &'static str,
    },
    Rect {
        bottom: f64,
        top: f64,
        width: f32,
        min_height_px: f32,
        color: &'static str,
    },
}
