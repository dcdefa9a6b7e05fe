//! Text rendering of findings.
//!
//! Exporters only concatenate what these functions return:
//! - `summary` for one-line titles
//! - `markdown_description` for the finding body
//! - `template_info_table` for the key/value table embedded in the body

use std::borrow::Cow;

use mdreport_core::{Info, ResultEvent};

/// Responses above this many bytes are cut before rendering.
pub const RESPONSE_TRUNCATE_BYTES: usize = 5 * 1024;

const TRUNCATED_MARKER: &str = ".... Truncated ....";
const TIMESTAMP_FORMAT: &str = "%a %b %-d %H:%M:%S %z %Z %Y";

/// Template identifier qualified with the matcher and extractor that fired.
pub fn matched_template(event: &ResultEvent) -> String {
    let mut template = event.template_id.clone();
    if !event.matcher().is_empty() {
        template.push(':');
        template.push_str(event.matcher());
    }
    if !event.extractor().is_empty() {
        template.push(':');
        template.push_str(event.extractor());
    }
    template
}

/// One-line title, e.g. `Git Config (git-config:body) found on https://example.com`.
pub fn summary(event: &ResultEvent) -> String {
    format!(
        "{} ({}) found on {}",
        event.info.name,
        matched_template(event),
        event.host
    )
}

/// Full Markdown body of a finding.
pub fn markdown_description(event: &ResultEvent) -> String {
    let mut md = String::new();

    md.push_str(&format!(
        "**Details**: **{}**  matched at {}\n\n",
        matched_template(event),
        event.host
    ));
    md.push_str(&format!("**Protocol**: {}\n\n", event.protocol.to_uppercase()));
    md.push_str(&format!("**Full URL**: {}\n\n", event.matched_at()));

    let timestamp = event
        .timestamp
        .map(|ts| ts.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default();
    md.push_str(&format!("**Timestamp**: {}\n\n", timestamp));

    md.push_str("**Template Information**\n\n| Key | Value |\n|---|---|\n");
    md.push_str(&template_info_table(&event.info));

    if let Some(request) = event.request.as_deref().filter(|r| !r.is_empty()) {
        md.push_str(&code_block("Request", request, "http"));
    }

    if let Some(response) = event.response.as_deref().filter(|r| !r.is_empty()) {
        md.push_str(&code_block("Response", &truncate_response(response), "http"));
    }

    if !event.extracted_results.is_empty() || !event.metadata.is_empty() {
        md.push_str("\n**Extra Information**\n\n");

        if !event.extracted_results.is_empty() {
            md.push_str("**Extracted results**:\n\n");
            for result in &event.extracted_results {
                md.push_str(&format!("- {}\n", result));
            }
            md.push('\n');
        }

        if !event.metadata.is_empty() {
            md.push_str("**Metadata**:\n\n");
            for (key, value) in &event.metadata {
                md.push_str(&format!("- {}: {}\n", key, value_to_string(value)));
            }
            md.push('\n');
        }
    }

    if let Some(curl) = event.curl_command.as_deref().filter(|c| !c.is_empty()) {
        md.push_str(&code_block("CURL command", curl, "sh"));
    }

    if !event.info.reference.is_empty() {
        md.push_str("\nReferences: \n");
        for reference in &event.info.reference {
            md.push_str(&format!("- {}\n", reference));
        }
    }

    md.push_str("\n---\nGenerated by mdreport");

    md
}

/// Rows of the template information table, without the header.
pub fn template_info_table(info: &Info) -> String {
    let mut rows = String::new();

    rows.push_str(&table_row("Name", &info.name));
    rows.push_str(&table_row("Authors", &info.authors.join(", ")));
    rows.push_str(&table_row("Tags", &info.tags.join(", ")));
    rows.push_str(&table_row("Severity", &info.severity_holder.to_string()));

    if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
        rows.push_str(&table_row("Description", description));
    }
    if let Some(remediation) = info.remediation.as_deref().filter(|r| !r.is_empty()) {
        rows.push_str(&table_row("Remediation", remediation));
    }

    for (key, value) in &info.metadata {
        rows.push_str(&table_row(key, &value_to_string(value)));
    }

    rows
}

fn table_row(key: &str, value: &str) -> String {
    format!("| {} | {} |\n", escape_cell(key), escape_cell(value))
}

// Cells are single-line; pipes would split the row.
fn escape_cell(value: &str) -> String {
    value
        .trim()
        .replace('|', "\\|")
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn code_block(title: &str, content: &str, language: &str) -> String {
    format!("\n**{}**\n\n```{}\n{}\n```\n", title, language, content)
}

fn truncate_response(response: &str) -> Cow<'_, str> {
    if response.len() <= RESPONSE_TRUNCATE_BYTES {
        return Cow::Borrowed(response);
    }

    let mut end = RESPONSE_TRUNCATE_BYTES;
    while !response.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!("{}{}", &response[..end], TRUNCATED_MARKER))
}

fn value_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
