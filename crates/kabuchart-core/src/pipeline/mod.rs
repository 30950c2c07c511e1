//! # Visualization Pipeline
//!
//! Pure transforms from fetched per-day records to render-ready structures.
//!
//! ```text
//! records ──▶ sanitize ──▶ candle ──▶ axis
//!    │            └──────▶ volume      ticks
//!    └──▶ overlay (indicator lines, gap-aware)
//!                    │
//!                    ▼
//!               ChartFrame
//! ```
//!
//! None of these functions allocate shared state or fail. An empty or fully
//! filtered series produces an empty frame, which callers show as an
//! empty-state notice.

pub mod axis;
pub mod candle;
pub mod frame;
pub mod overlay;
pub mod sanitize;
pub mod ticks;
pub mod volume;

pub use axis::{price_domain, AxisDomain};
pub use candle::{derive_all, CandleGeometry, ColorClass, DrawPrimitive};
pub use frame::{ChartFrame, MacdPanel, OverlayLine, PricePanel, RsiPanel, VolumePanel};
pub use overlay::{align, segments, LinePoint, LineSegment};
pub use sanitize::{sanitize_candles, sanitize_volume, Ohlc};
pub use ticks::TickInterval;
pub use volume::{volume_bars, VolumeBar};
