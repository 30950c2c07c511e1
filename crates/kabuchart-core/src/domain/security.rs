use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{Locale, ValidationError};

const MAX_CODE_LEN: usize = 12;

/// Normalized security code (e.g. `7203`, `130A0`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SecurityCode(String);

impl SecurityCode {
    /// Parse and normalize a code to uppercase.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySecurityCode);
        }

        let normalized = trimmed.to_ascii_uppercase();
        let len = normalized.chars().count();
        if len > MAX_CODE_LEN {
            return Err(ValidationError::SecurityCodeTooLong {
                len,
                max: MAX_CODE_LEN,
            });
        }

        for (index, ch) in normalized.chars().enumerate() {
            if !ch.is_ascii_alphanumeric() {
                return Err(ValidationError::SecurityCodeInvalidChar { ch, index });
            }
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SecurityCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SecurityCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SecurityCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SecurityCode> for String {
    fn from(value: SecurityCode) -> Self {
        value.0
    }
}

/// One row of the Security Master.
///
/// The master only carries strings; a missing column decodes as an empty
/// string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityInfo {
    pub code: String,
    pub company_name: String,
    pub company_name_english: String,
    pub sector_17_code: String,
    pub sector_17_code_name: String,
    pub sector_33_code: String,
    pub sector_33_code_name: String,
    pub market_code: String,
    pub market_code_name: String,
}

impl SecurityInfo {
    pub fn matches_code(&self, code: &SecurityCode) -> bool {
        self.code == code.as_str()
    }
}

/// Heading shown above a chart. Without a master row only the code is
/// shown, labelled in `locale`.
pub fn chart_title(code: &SecurityCode, info: Option<&SecurityInfo>, locale: Locale) -> String {
    match (info, locale) {
        (Some(info), _) => format!(
            "{} ({}) - {} / {}",
            info.company_name, code, info.market_code_name, info.sector_33_code_name
        ),
        (None, Locale::Ja) => format!("銘柄: {code}"),
        (None, Locale::En) => format!("Security: {code}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_normalizes_code() {
        let parsed = SecurityCode::parse(" 130a0 ").expect("code should parse");
        assert_eq!(parsed.as_str(), "130A0");
    }

    #[test]
    fn rejects_invalid_chars() {
        let err = SecurityCode::parse("72-03").expect_err("must fail");
        assert!(matches!(
            err,
            ValidationError::SecurityCodeInvalidChar { ch: '-', index: 2 }
        ));
    }

    #[test]
    fn missing_master_columns_decode_as_empty() {
        let info: SecurityInfo =
            serde_json::from_str(r#"{"code":"7203","company_name":"トヨタ自動車"}"#)
                .expect("partial row decodes");
        assert_eq!(info.code, "7203");
        assert!(info.market_code_name.is_empty());
    }

    #[test]
    fn title_uses_master_row_when_present() {
        let code = SecurityCode::parse("7203").expect("code");
        let info = SecurityInfo {
            code: String::from("7203"),
            company_name: String::from("トヨタ自動車"),
            market_code_name: String::from("プライム"),
            sector_33_code_name: String::from("輸送用機器"),
            ..SecurityInfo::default()
        };

        assert_eq!(
            chart_title(&code, Some(&info), Locale::En),
            "トヨタ自動車 (7203) - プライム / 輸送用機器"
        );
    }

    #[test]
    fn fallback_title_follows_locale() {
        let code = SecurityCode::parse("7203").expect("code");
        assert_eq!(chart_title(&code, None, Locale::Ja), "銘柄: 7203");
        assert_eq!(chart_title(&code, None, Locale::En), "Security: 7203");
    }
}
