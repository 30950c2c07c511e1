use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

/// Calendar date of one trading session.
///
/// Upstream services send either the compact `YYYYMMDD` form or the dashed
/// `YYYY-MM-DD` form; both parse to the same value. Serialization always
/// uses the dashed form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradingDate(Date);

impl TradingDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let invalid = || ValidationError::InvalidDate {
            value: input.to_owned(),
        };

        let parsed = match trimmed.len() {
            8 if trimmed.chars().all(|ch| ch.is_ascii_digit()) => {
                Date::parse(trimmed, format_description!("[year][month][day]"))
            }
            10 => Date::parse(trimmed, format_description!("[year]-[month]-[day]")),
            _ => return Err(invalid()),
        };

        parsed.map(Self).map_err(|_| invalid())
    }

    pub const fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    /// `YYYYMMDD`, the form the upstream query parameters expect.
    pub fn compact(self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }

    /// `YYYY-MM-DD`.
    pub fn iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }

    /// Short `MM-DD` label used on the x axis.
    pub fn axis_label(self) -> String {
        format!("{:02}-{:02}", u8::from(self.0.month()), self.0.day())
    }
}

impl Display for TradingDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.iso())
    }
}

impl FromStr for TradingDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for TradingDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.iso())
    }
}

impl<'de> Deserialize<'de> for TradingDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
