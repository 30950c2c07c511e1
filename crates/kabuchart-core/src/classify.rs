//! Failure classification for settled fetches.
//!
//! Every failed request to the Security Master or Analytics service is
//! reduced to one [`ErrorCategory`] at the point where the fetch settles. The
//! category is shown verbatim; nothing downstream re-interprets it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::http_client::HttpError;
use crate::ValidationError;

/// Outcome of a request that did not produce usable data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The transport never saw a status line: refused, DNS, timeout.
    NoResponse(HttpError),
    /// A status line arrived but was not a success.
    Status { status: u16, body: String },
    /// An error with a message but no response context (e.g. a body that
    /// does not decode).
    Message(String),
    /// Anything else.
    Unknown,
}

impl FetchFailure {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

impl From<HttpError> for FetchFailure {
    fn from(error: HttpError) -> Self {
        match error.status() {
            Some(status) => Self::Status {
                status,
                body: error.message().to_owned(),
            },
            None => Self::NoResponse(error),
        }
    }
}

impl From<serde_json::Error> for FetchFailure {
    fn from(error: serde_json::Error) -> Self {
        Self::Message(format!("failed to decode response: {error}"))
    }
}

impl Display for FetchFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoResponse(error) => write!(f, "no response: {error}"),
            Self::Status { status, .. } => write!(f, "upstream returned status {status}"),
            Self::Message(message) => f.write_str(message),
            Self::Unknown => f.write_str("unknown failure"),
        }
    }
}

impl std::error::Error for FetchFailure {}

/// User-facing failure category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum ErrorCategory {
    NetworkUnreachable,
    NotFound,
    RateLimited,
    ServerError,
    ApiError { status: u16 },
    Generic { message: String },
    Unknown,
}

/// Map a failure to its category.
///
/// Order matters: status codes are only inspected once a response is known
/// to exist.
pub fn classify(failure: &FetchFailure) -> ErrorCategory {
    match failure {
        FetchFailure::NoResponse(_) => ErrorCategory::NetworkUnreachable,
        FetchFailure::Status { status, .. } => match *status {
            404 => ErrorCategory::NotFound,
            429 => ErrorCategory::RateLimited,
            status if status >= 500 => ErrorCategory::ServerError,
            status => ErrorCategory::ApiError { status },
        },
        FetchFailure::Message(message) => ErrorCategory::Generic {
            message: message.clone(),
        },
        FetchFailure::Unknown => ErrorCategory::Unknown,
    }
}

impl ErrorCategory {
    /// Stable machine-readable code for envelopes.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NetworkUnreachable => "fetch.network_unreachable",
            Self::NotFound => "fetch.not_found",
            Self::RateLimited => "fetch.rate_limited",
            Self::ServerError => "fetch.server_error",
            Self::ApiError { .. } => "fetch.api_error",
            Self::Generic { .. } => "fetch.generic",
            Self::Unknown => "fetch.unknown",
        }
    }

    /// Whether re-issuing the same request can plausibly succeed.
    pub const fn retryable(&self) -> bool {
        matches!(
            self,
            Self::NetworkUnreachable | Self::RateLimited | Self::ServerError | Self::Unknown
        )
    }

    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::NetworkUnreachable, Locale::Ja) => String::from(
                "ネットワークエラー: サーバーに接続できませんでした。インターネット接続を確認してください。",
            ),
            (Self::NetworkUnreachable, Locale::En) => String::from(
                "Network error: could not reach the server. Check your internet connection.",
            ),
            (Self::NotFound, Locale::Ja) => String::from(
                "指定された銘柄が見つかりませんでした。銘柄コードを確認してください。",
            ),
            (Self::NotFound, Locale::En) => {
                String::from("The security was not found. Check the security code.")
            }
            (Self::RateLimited, Locale::Ja) => String::from(
                "APIのリクエスト制限に達しました。しばらく待ってから再度お試しください。",
            ),
            (Self::RateLimited, Locale::En) => String::from(
                "The API request limit was reached. Wait a moment and try again.",
            ),
            (Self::ServerError, Locale::Ja) => String::from(
                "サーバーエラーが発生しました。しばらく待ってから再度お試しください。",
            ),
            (Self::ServerError, Locale::En) => {
                String::from("A server error occurred. Wait a moment and try again.")
            }
            (Self::ApiError { status }, Locale::Ja) => {
                format!("APIエラーが発生しました（ステータス: {status}）。")
            }
            (Self::ApiError { status }, Locale::En) => {
                format!("An API error occurred (status: {status}).")
            }
            (Self::Generic { message }, _) => message.clone(),
            (Self::Unknown, Locale::Ja) => String::from("予期しないエラーが発生しました。"),
            (Self::Unknown, Locale::En) => String::from("An unexpected error occurred."),
        }
    }
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Language of user-facing messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl Locale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ja => "ja",
            Self::En => "en",
        }
    }

    /// Notice shown when a load succeeds but leaves nothing to draw.
    pub const fn empty_series_notice(self) -> &'static str {
        match self {
            Self::Ja => "この期間のデータが取得できませんでした。Freeプランではデータ取得可能な期間が限定されています。",
            Self::En => "No data was returned for this period. The free plan only serves a limited date range.",
        }
    }

    /// Notice shown when a search matches nothing.
    pub const fn no_search_results_notice(self) -> &'static str {
        match self {
            Self::Ja => "該当する銘柄が見つかりませんでした。",
            Self::En => "No matching securities were found.",
        }
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ja" => Ok(Self::Ja),
            "en" => Ok(Self::En),
            other => Err(ValidationError::InvalidLocale {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> FetchFailure {
        FetchFailure::status(status, "")
    }

    #[test]
    fn no_response_is_network_unreachable() {
        let failure = FetchFailure::from(HttpError::connect("connection refused"));
        assert_eq!(classify(&failure), ErrorCategory::NetworkUnreachable);
    }

    #[test]
    fn status_codes_map_in_order() {
        assert_eq!(classify(&status(404)), ErrorCategory::NotFound);
        assert_eq!(classify(&status(429)), ErrorCategory::RateLimited);
        assert_eq!(classify(&status(500)), ErrorCategory::ServerError);
        assert_eq!(classify(&status(503)), ErrorCategory::ServerError);
        assert_eq!(classify(&status(418)), ErrorCategory::ApiError { status: 418 });
        assert_eq!(classify(&status(400)), ErrorCategory::ApiError { status: 400 });
    }

    #[test]
    fn body_failure_after_status_uses_status() {
        let error = HttpError::new(crate::http_client::HttpErrorKind::Body, "reset").with_status(503);
        assert_eq!(classify(&FetchFailure::from(error)), ErrorCategory::ServerError);
    }

    #[test]
    fn message_and_unknown() {
        let failure = FetchFailure::Message(String::from("boom"));
        assert_eq!(
            classify(&failure),
            ErrorCategory::Generic {
                message: String::from("boom")
            }
        );
        assert_eq!(classify(&FetchFailure::Unknown), ErrorCategory::Unknown);
    }

    #[test]
    fn messages_are_fixed_per_category() {
        assert_eq!(
            ErrorCategory::NotFound.message(Locale::Ja),
            "指定された銘柄が見つかりませんでした。銘柄コードを確認してください。"
        );
        assert_eq!(
            ErrorCategory::ApiError { status: 418 }.message(Locale::En),
            "An API error occurred (status: 418)."
        );
        assert_eq!(
            ErrorCategory::Generic {
                message: String::from("decode failed")
            }
            .message(Locale::Ja),
            "decode failed"
        );
    }

    #[test]
    fn parses_locale() {
        assert_eq!("EN".parse::<Locale>().expect("locale"), Locale::En);
        assert!(matches!(
            "fr".parse::<Locale>(),
            Err(ValidationError::InvalidLocale { .. })
        ));
    }
}
