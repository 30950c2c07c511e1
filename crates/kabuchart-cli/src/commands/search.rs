use kabuchart_core::{ApiClient, SearchController, SearchQuery, SearchView, SecurityInfo};
use serde::Serialize;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
pub struct SearchResponseData {
    query: String,
    results: Vec<SecurityInfo>,
}

pub async fn run(
    args: &SearchArgs,
    api: &ApiClient,
) -> Result<CommandResult<SearchResponseData>, CliError> {
    if args.limit == 0 {
        return Err(CliError::Command(String::from(
            "--limit must be greater than zero",
        )));
    }

    let query = SearchQuery::new(args.query.as_str())?;
    let locale = api.config().locale;
    let mut controller = SearchController::new(locale);

    match controller.search(api, query).await {
        SearchView::Results {
            query,
            results,
            notice,
        } => {
            let total = results.len();
            let data = SearchResponseData {
                query: query.clone(),
                results: results.iter().take(args.limit).cloned().collect(),
            };
            let mut result = CommandResult::ok(data);
            if let Some(notice) = notice {
                result = result.with_warning(notice.as_str());
            }
            if total > args.limit {
                result = result.with_warning(format!(
                    "showing {} of {total} matches",
                    args.limit
                ));
            }
            Ok(result)
        }
        SearchView::Failed {
            query, category, ..
        } => Ok(CommandResult::ok(SearchResponseData {
            query: query.clone(),
            results: Vec::new(),
        })
        .with_failure(category, locale)),
        SearchView::Idle | SearchView::Searching { .. } => Err(CliError::Command(String::from(
            "search did not settle",
        ))),
    }
}
