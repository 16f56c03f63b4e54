//! Output formatting for command outcomes.

use command_spec_core::{ListResult, Outcome};
use serde_json::Value as Json;

use crate::error::CliError;

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Yaml,
    #[default]
    Table,
}

/// Formats an outcome in the requested output format.
///
/// [`Outcome::Done`] renders as an empty string; help is always plain text.
///
/// # Examples
///
/// ```
/// # use broadcast_admin_cli::{OutputFormat, format_outcome};
/// # use command_spec_core::Outcome;
/// let item = Outcome::Item(serde_json::json!({"id": 1, "title": "hello"}));
/// assert_eq!(
///     format_outcome(&item, OutputFormat::Table).unwrap(),
///     "id     1\ntitle  hello\n"
/// );
/// ```
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> Result<String, CliError> {
    match outcome {
        Outcome::Done => Ok(String::new()),
        Outcome::Help(help) => Ok(help.text.clone()),
        Outcome::Item(item) => match format {
            OutputFormat::Table => Ok(item_to_table(item)),
            _ => serialize(item, format),
        },
        Outcome::List(list) => match format {
            OutputFormat::Table => Ok(list_to_table(list)),
            _ => serialize(list, format),
        },
    }
}

fn serialize<T: serde::Serialize>(value: &T, format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map_err(|e| CliError::Render(format!("YAML serialization failed: {e}"))),
        _ => serde_json::to_string_pretty(value)
            .map(|mut s| {
                s.push('\n');
                s
            })
            .map_err(|e| CliError::Render(format!("JSON serialization failed: {e}"))),
    }
}

/// Flattens a JSON value into a single table cell.
fn cell(value: &Json) -> String {
    match value {
        Json::Null => String::new(),
        Json::String(s) => s.replace('\n', " ").trim_end().to_string(),
        other => other.to_string(),
    }
}

fn item_to_table(item: &Json) -> String {
    let Json::Object(map) = item else {
        return format!("{}\n", cell(item));
    };
    let width = map.keys().map(String::len).max().unwrap_or(0);
    let mut out = String::new();
    for (key, value) in map {
        out.push_str(&format!("{key:<width$}  {}", cell(value)));
        trim_line_end(&mut out);
        out.push('\n');
    }
    out
}

fn list_to_table(list: &ListResult) -> String {
    if list.is_empty() {
        return String::new();
    }
    let columns = list.columns();
    let rows: Vec<Vec<String>> = list
        .items()
        .iter()
        .map(|item| match item {
            Json::Object(map) => columns
                .iter()
                .map(|col| map.get(*col).map(cell).unwrap_or_default())
                .collect(),
            other => vec![cell(other)],
        })
        .collect();

    let headers: Vec<String> = if columns.is_empty() {
        vec!["VALUE".to_string()]
    } else {
        columns.iter().map(|c| c.to_uppercase()).collect()
    };
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(String::len)
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in std::iter::once(&headers).chain(rows.iter()) {
        for (i, width) in widths.iter().enumerate() {
            let value = row.get(i).map(String::as_str).unwrap_or("");
            out.push_str(&format!("{value:<width$}  "));
        }
        trim_line_end(&mut out);
        out.push('\n');
    }
    out
}

fn trim_line_end(out: &mut String) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
}
