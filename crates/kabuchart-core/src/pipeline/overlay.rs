use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{DailyRecord, IndicatorField, IndicatorRecord, MergedRecord};

/// Merge a base price series with its indicator series by position.
///
/// Both inputs are expected to cover the same dates in the same order; no
/// join on date is performed. Every value is copied as-is, so an absent
/// indicator stays absent. If the lengths differ the result is truncated to
/// the shorter input; if the dates at an index differ the base date is kept.
pub fn align(base: &[DailyRecord], indicators: &[IndicatorRecord]) -> Vec<MergedRecord> {
    if base.len() != indicators.len() {
        warn!(
            base_len = base.len(),
            indicator_len = indicators.len(),
            "overlay series lengths differ; truncating to the shorter one"
        );
    }

    base.iter()
        .zip(indicators)
        .enumerate()
        .map(|(index, (day, values))| {
            if day.date != values.date {
                warn!(
                    index,
                    base_date = %day.date,
                    indicator_date = %values.date,
                    "overlay dates differ at index; keeping base date"
                );
            }
            MergedRecord::combine(day, values)
        })
        .collect()
}

/// One present value of an overlay line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinePoint {
    /// Position in the series the line was built from.
    pub index: usize,
    pub value: f64,
}

/// A maximal run of consecutive present values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineSegment {
    pub points: Vec<LinePoint>,
}

/// Split one indicator field into drawable runs, breaking at every absent or
/// non-finite value. A line is never drawn across a gap.
pub fn segments(records: &[MergedRecord], field: IndicatorField) -> Vec<LineSegment> {
    let mut output = Vec::new();
    let mut current = LineSegment::default();

    for (index, record) in records.iter().enumerate() {
        match record.indicator(field).filter(|v| v.is_finite()) {
            Some(value) => current.points.push(LinePoint { index, value }),
            None => {
                if !current.points.is_empty() {
                    output.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.points.is_empty() {
        output.push(current);
    }

    output
}
