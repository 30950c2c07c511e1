use serde::{Deserialize, Serialize};

use crate::{TradingDate, ValidationError};

/// Inclusive date window sent to the Analytics and daily-quote endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: Option<TradingDate>,
    pub to: Option<TradingDate>,
}

impl DateRange {
    pub fn new(from: Option<TradingDate>, to: Option<TradingDate>) -> Result<Self, ValidationError> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(ValidationError::InvertedDateRange {
                    from: from.iso(),
                    to: to.iso(),
                });
            }
        }
        Ok(Self { from, to })
    }

    pub const fn starting(from: TradingDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    /// Query pairs in upstream `YYYYMMDD` form; unset bounds are omitted.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(from) = self.from {
            pairs.push(("from", from.compact()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.compact()));
        }
        pairs
    }
}
