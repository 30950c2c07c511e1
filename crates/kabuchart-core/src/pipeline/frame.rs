use serde::Serialize;

use super::axis::{price_domain, AxisDomain};
use super::candle::{derive_all, CandleGeometry, NEUTRAL_HEX};
use super::overlay::{segments, LineSegment};
use super::sanitize::sanitize_candles;
use super::ticks::TickInterval;
use super::volume::{volume_bars, VolumeBar};
use crate::{IndicatorField, MergedRecord, TradingDate};

const RSI_OVERBOUGHT: f64 = 70.0;
const RSI_OVERSOLD: f64 = 30.0;

/// Style and data of one indicator line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayLine {
    pub field: IndicatorField,
    pub label: &'static str,
    pub color: &'static str,
    pub dashed: bool,
    pub segments: Vec<LineSegment>,
}

impl OverlayLine {
    fn build(records: &[MergedRecord], style: LineStyle) -> Self {
        Self {
            field: style.field,
            label: style.label,
            color: style.color,
            dashed: style.dashed,
            segments: segments(records, style.field),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct LineStyle {
    field: IndicatorField,
    label: &'static str,
    color: &'static str,
    dashed: bool,
}

const fn solid(field: IndicatorField, label: &'static str, color: &'static str) -> LineStyle {
    LineStyle {
        field,
        label,
        color,
        dashed: false,
    }
}

const PRICE_OVERLAYS: [LineStyle; 5] = [
    solid(IndicatorField::Sma5, "SMA5", "#f59e0b"),
    solid(IndicatorField::Sma25, "SMA25", "#10b981"),
    solid(IndicatorField::Sma75, "SMA75", "#8b5cf6"),
    LineStyle {
        field: IndicatorField::BbUpper,
        label: "BB upper",
        color: "#94a3b8",
        dashed: true,
    },
    LineStyle {
        field: IndicatorField::BbLower,
        label: "BB lower",
        color: "#94a3b8",
        dashed: true,
    },
];

const RSI_LINE: LineStyle = solid(IndicatorField::Rsi14, "RSI", "#8b5cf6");

const MACD_LINES: [LineStyle; 2] = [
    solid(IndicatorField::Macd, "MACD", "#3b82f6"),
    solid(IndicatorField::MacdSignal, "Signal", "#ef4444"),
];

/// Horizontal guide drawn across a panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceLine {
    pub value: f64,
    pub color: &'static str,
}

/// Candles with their price axis and moving-average / band overlays.
///
/// Overlay point indices refer to positions in `candles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePanel {
    pub domain: AxisDomain,
    pub candles: Vec<CandleGeometry>,
    pub overlays: Vec<OverlayLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumePanel {
    pub bars: Vec<VolumeBar>,
}

/// RSI line on a fixed 0..100 axis with 30/70 guides.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RsiPanel {
    pub domain: AxisDomain,
    pub reference_lines: [ReferenceLine; 2],
    pub line: OverlayLine,
}

/// One MACD histogram bar; days without a histogram value are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBar {
    pub index: usize,
    pub date: TradingDate,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdPanel {
    pub zero_line: ReferenceLine,
    pub histogram: Vec<HistogramBar>,
    pub lines: Vec<OverlayLine>,
}

/// Everything a renderer needs for one security over one date window.
///
/// All panels share one tick interval so their labels line up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartFrame {
    pub len: usize,
    pub tick_interval: TickInterval,
    pub price: Option<PricePanel>,
    pub volume: Option<VolumePanel>,
    pub rsi: Option<RsiPanel>,
    pub macd: Option<MacdPanel>,
}

impl ChartFrame {
    /// Run the whole pipeline over one fetched series.
    pub fn build(records: &[MergedRecord]) -> Self {
        let tick_interval = TickInterval::for_len(records.len());

        let priced = sanitize_candles(records);
        let candles = derive_all(&priced);
        let price = price_domain(&candles).map(|domain| PricePanel {
            domain,
            overlays: PRICE_OVERLAYS
                .iter()
                .map(|style| OverlayLine::build(&priced, *style))
                .collect(),
            candles,
        });

        let bars = volume_bars(records);
        let volume = (!bars.is_empty()).then_some(VolumePanel { bars });

        let (rsi, macd) = if records.is_empty() {
            (None, None)
        } else {
            (Some(rsi_panel(records)), Some(macd_panel(records)))
        };

        Self {
            len: records.len(),
            tick_interval,
            price,
            volume,
            rsi,
            macd,
        }
    }

    /// Nothing drawable: the caller shows the empty-state notice instead.
    pub const fn is_empty(&self) -> bool {
        self.price.is_none() && self.volume.is_none()
    }
}

fn rsi_panel(records: &[MergedRecord]) -> RsiPanel {
    RsiPanel {
        domain: AxisDomain::RSI,
        reference_lines: [
            ReferenceLine {
                value: RSI_OVERBOUGHT,
                color: "#ef4444",
            },
            ReferenceLine {
                value: RSI_OVERSOLD,
                color: "#3b82f6",
            },
        ],
        line: OverlayLine::build(records, RSI_LINE),
    }
}

fn macd_panel(records: &[MergedRecord]) -> MacdPanel {
    let histogram = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            record
                .macd_histogram
                .filter(|v| v.is_finite())
                .map(|value| HistogramBar {
                    index,
                    date: record.date,
                    value,
                })
        })
        .collect();

    MacdPanel {
        zero_line: ReferenceLine {
            value: 0.0,
            color: NEUTRAL_HEX,
        },
        histogram,
        lines: MACD_LINES
            .iter()
            .map(|style| OverlayLine::build(records, *style))
            .collect(),
    }
}
