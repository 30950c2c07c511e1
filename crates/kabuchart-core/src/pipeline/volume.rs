use serde::{Deserialize, Serialize};

use super::candle::ColorClass;
use super::sanitize::sanitize_volume;
use crate::{PriceFields, TradingDate};

/// One bar of the volume panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VolumeBar {
    pub date: TradingDate,
    pub volume: u64,
    pub color: ColorClass,
}

/// Tint for a volume bar.
///
/// With both open and close present this is the candle rule. A day that
/// traded volume but lacks open or close falls back to `Bear`; unlike the
/// candle rule this path never resolves to `Bull` on missing data.
pub fn classify<R: PriceFields + ?Sized>(record: &R) -> ColorClass {
    let open = record.open().filter(|v| v.is_finite());
    let close = record.close().filter(|v| v.is_finite());
    match (open, close) {
        (Some(open), Some(close)) => ColorClass::from_open_close(open, close),
        _ => ColorClass::Bear,
    }
}

/// Volume bars for every record carrying a volume, in input order.
pub fn volume_bars<R: PriceFields + Clone>(records: &[R]) -> Vec<VolumeBar> {
    sanitize_volume(records)
        .iter()
        .filter_map(|record| {
            record.volume().map(|volume| VolumeBar {
                date: record.date(),
                volume,
                color: classify(record),
            })
        })
        .collect()
}
