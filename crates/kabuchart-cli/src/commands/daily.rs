use kabuchart_core::{classify, ApiClient, DailyRecord, DateRange, MarketDataSource, SecurityCode};
use serde::Serialize;

use crate::cli::DailyArgs;
use crate::error::CliError;

use super::{parse_range, CommandResult};

#[derive(Debug, Serialize)]
pub struct DailyResponseData {
    code: SecurityCode,
    range: DateRange,
    records: Vec<DailyRecord>,
}

pub async fn run(
    args: &DailyArgs,
    api: &ApiClient,
) -> Result<CommandResult<DailyResponseData>, CliError> {
    if args.limit == Some(0) {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let (code, range) = parse_range(&args.range, api.config())?;
    let locale = api.config().locale;

    match api.daily(code.clone(), range).await {
        Ok(mut records) => {
            if let Some(limit) = args.limit {
                let skip = records.len().saturating_sub(limit);
                records.drain(..skip);
            }
            let empty = records.is_empty();
            let result = CommandResult::ok(DailyResponseData {
                code,
                range,
                records,
            });
            Ok(if empty {
                result.with_warning(locale.empty_series_notice())
            } else {
                result
            })
        }
        Err(failure) => Ok(CommandResult::ok(DailyResponseData {
            code,
            range,
            records: Vec::new(),
        })
        .with_failure(&classify(&failure), locale)),
    }
}
