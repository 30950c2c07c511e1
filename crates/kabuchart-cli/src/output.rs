use std::io::{self, Write};

use kabuchart_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    render_to(&mut out, envelope, format, pretty)?;
    out.flush()?;
    Ok(())
}

pub fn render_to<W: Write>(
    out: &mut W,
    envelope: &Envelope<Value>,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            writeln!(out, "{payload}")?;
        }
        OutputFormat::Table => render_table(out, envelope)?,
    }

    Ok(())
}

fn render_table<W: Write>(out: &mut W, envelope: &Envelope<Value>) -> Result<(), CliError> {
    writeln!(out, "request_id  : {}", envelope.meta.request_id)?;
    writeln!(out, "schema      : {}", envelope.meta.schema_version)?;
    writeln!(out, "generated_at: {}", envelope.meta.generated_at)?;
    writeln!(out, "locale      : {}", envelope.meta.locale.as_str())?;
    writeln!(out, "latency_ms  : {}", envelope.meta.latency_ms)?;

    if !envelope.meta.warnings.is_empty() {
        writeln!(out, "warnings:")?;
        for warning in &envelope.meta.warnings {
            writeln!(out, "  - {warning}")?;
        }
    }

    writeln!(out, "data:")?;
    let pretty_data = serde_json::to_string_pretty(&envelope.data)?;
    for line in pretty_data.lines() {
        writeln!(out, "  {line}")?;
    }

    if !envelope.errors.is_empty() {
        writeln!(out, "errors:")?;
        for error in &envelope.errors {
            writeln!(out, "  - {}: {}", error.code, error.message)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use kabuchart_core::{EnvelopeError, EnvelopeMeta, ErrorCategory, Locale};
    use serde_json::json;

    use super::*;

    fn envelope() -> Envelope<Value> {
        let mut meta = EnvelopeMeta::new("request-12345", Locale::En, 7).expect("meta");
        meta.push_warning("showing 1 of 3 matches");
        Envelope::with_errors(
            meta,
            json!({ "query": "7203" }),
            vec![EnvelopeError::from_category(
                &ErrorCategory::NotFound,
                Locale::En,
            )],
        )
        .expect("envelope")
    }

    #[test]
    fn json_output_is_one_line() {
        let mut buffer = Vec::new();
        render_to(&mut buffer, &envelope(), OutputFormat::Json, false).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert_eq!(text.lines().count(), 1);
        let value: Value = serde_json::from_str(&text).expect("json");
        assert_eq!(value["errors"][0]["code"], "fetch.not_found");
    }

    #[test]
    fn table_output_lists_warnings_and_errors() {
        let mut buffer = Vec::new();
        render_to(&mut buffer, &envelope(), OutputFormat::Table, false).expect("render");
        let text = String::from_utf8(buffer).expect("utf8");

        assert!(text.contains("request_id  : request-12345"));
        assert!(text.contains("  - showing 1 of 3 matches"));
        assert!(text.contains("  - fetch.not_found: The security was not found."));
    }
}
