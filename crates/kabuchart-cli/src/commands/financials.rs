use kabuchart_core::{classify, ApiClient, MarketDataSource, SecurityCode};
use serde::Serialize;
use serde_json::Value;

use crate::cli::LookupArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
pub struct FinancialsResponseData {
    code: SecurityCode,
    statements: Vec<Value>,
}

pub async fn run(
    args: &LookupArgs,
    api: &ApiClient,
) -> Result<CommandResult<FinancialsResponseData>, CliError> {
    let code = SecurityCode::parse(&args.code)?;
    let locale = api.config().locale;

    match api.financials(code.clone()).await {
        Ok(statements) => {
            let empty = statements.is_empty();
            let result = CommandResult::ok(FinancialsResponseData { code, statements });
            Ok(if empty {
                result.with_warning("no financial statements are published for this code")
            } else {
                result
            })
        }
        Err(failure) => Ok(CommandResult::ok(FinancialsResponseData {
            code,
            statements: Vec::new(),
        })
        .with_failure(&classify(&failure), locale)),
    }
}
