use serde::{Deserialize, Serialize};

use super::candle::CandleGeometry;

/// Fraction of each bound's magnitude added outside the data.
const PADDING: f64 = 0.02;

/// Numeric range of a value axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

impl AxisDomain {
    /// Fixed range of the RSI panel.
    pub const RSI: Self = Self {
        min: 0.0,
        max: 100.0,
    };

    pub const fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Price-axis domain over every wick endpoint, padded 2% on each side and
/// rounded outward to whole units.
///
/// Padding is taken from each bound's magnitude and always points away from
/// the data, so negative prices (spreads, adjusted series) stay inside too.
///
/// Returns `None` for an empty series; the caller skips rendering the price
/// panel instead of drawing a `[0, 0]` axis.
pub fn price_domain(candles: &[CandleGeometry]) -> Option<AxisDomain> {
    let mut pool = candles
        .iter()
        .flat_map(|candle| [candle.wick_low, candle.wick_high]);

    let first = pool.next()?;
    let (low, high) = pool.fold((first, first), |(low, high), value| {
        (low.min(value), high.max(value))
    });

    Some(AxisDomain {
        min: (low - low.abs() * PADDING).floor(),
        max: (high + high.abs() * PADDING).ceil(),
    })
}
