use kabuchart_core::{chart_title, classify, ApiClient, MarketDataSource, SecurityCode, SecurityInfo};
use serde::Serialize;

use crate::cli::LookupArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
pub struct LookupResponseData {
    code: SecurityCode,
    title: String,
    security: Option<SecurityInfo>,
}

pub async fn run(
    args: &LookupArgs,
    api: &ApiClient,
) -> Result<CommandResult<LookupResponseData>, CliError> {
    let code = SecurityCode::parse(&args.code)?;
    let locale = api.config().locale;

    match api.lookup(code.clone()).await {
        Ok(security) => {
            let found = security.is_some();
            let data = LookupResponseData {
                title: chart_title(&code, security.as_ref(), locale),
                code,
                security,
            };
            let result = CommandResult::ok(data);
            Ok(if found {
                result
            } else {
                result.with_warning("no Security Master row matches this code exactly")
            })
        }
        Err(failure) => Ok(CommandResult::ok(LookupResponseData {
            title: chart_title(&code, None, locale),
            code,
            security: None,
        })
        .with_failure(&classify(&failure), locale)),
    }
}
