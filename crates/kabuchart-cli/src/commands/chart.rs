use kabuchart_core::{ApiClient, ChartController, ChartPage, ChartRequest, ChartView};

use crate::cli::RangeArgs;
use crate::error::CliError;

use super::{parse_range, CommandResult};

pub async fn run(
    args: &RangeArgs,
    api: &ApiClient,
) -> Result<CommandResult<Option<ChartPage>>, CliError> {
    let (code, range) = parse_range(args, api.config())?;
    let locale = api.config().locale;
    let mut controller = ChartController::new(locale);

    match controller.load(api, ChartRequest::new(code, range)).await {
        ChartView::Ready(page) => {
            let notice = page.notice.clone();
            let result = CommandResult::ok(Some(page.clone()));
            Ok(match notice {
                Some(notice) => result.with_warning(notice),
                None => result,
            })
        }
        // A failed load shows no chart at all, never a previous one.
        ChartView::Failed { category, .. } => {
            Ok(CommandResult::ok(None).with_failure(category, locale))
        }
        ChartView::Idle | ChartView::Loading { .. } => Err(CliError::Command(String::from(
            "chart load did not settle",
        ))),
    }
}
