//! Markdown rendering of lookup results.
//!
//! The ambiguity list format doubles as a recovery contract: a show-all
//! follow-up may parse it back (see `followup::extract_listed_codes`), so
//! the heading and the ``* `CODE` `` bullets must stay as they are.

use crate::dataset::Schema;
use crate::followup::AMBIGUITY_HEADING;
use crate::index::CodeGroup;
use crate::resolver::MatchResult;

/// Details for one code: header block plus a table of its rows
pub fn render_code_details(group: &CodeGroup, schema: &Schema) -> String {
    let mut out = format!("### Details for Code: `{}`\n\n", group.code);
    out.push_str(&format!("**{}:**\t`{}`\n\n", schema.code_label, group.code));
    out.push_str(&format!("**{}:**\t{}\n\n", schema.name_label, group.name));

    if !schema.details.is_empty() {
        let rows: Vec<Vec<String>> = group.rows.iter().map(|r| r.details.clone()).collect();
        out.push_str("Available options:\n\n");
        out.push_str(&markdown_table(&schema.detail_labels(), &rows));
        out.push_str("\n\n");
    }

    out.push_str("---");
    out
}

/// Ask the user to pick one of several tied codes
pub fn render_ambiguity(score: u8, codes: &[String], schema: &Schema) -> String {
    let list = MatchResult::listed_codes(codes)
        .iter()
        .map(|code| format!("* `{}`", code))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{}\n\nI found multiple possible matches that score {}%. Please try searching for one of the specific {}s below for the full details:\n\n{}",
        AMBIGUITY_HEADING, score, schema.code_label, list
    )
}

/// Details for several codes, in the given order
pub fn render_show_all(groups: &[CodeGroup], schema: &Schema) -> String {
    groups
        .iter()
        .map(|group| render_code_details(group, schema))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Pipe-style Markdown table, left-aligned
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..headers.len())
                .map(|i| escape_cell(row.get(i).map(String::as_str).unwrap_or("")))
                .collect()
        })
        .collect();

    // Headers get two columns of breathing room
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(header.chars().count() + 2)
        })
        .collect();

    let line = |values: Vec<String>| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!(" {:<width$} ", value, width = width))
            .collect();
        format!("|{}|", padded.join("|"))
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.iter().map(|h| h.to_string()).collect()));
    lines.push(format!(
        "|{}|",
        widths
            .iter()
            .map(|w| format!(":{}", "-".repeat(w + 1)))
            .collect::<Vec<_>>()
            .join("|")
    ));
    for row in cells {
        lines.push(line(row));
    }
    lines.join("\n")
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace('\n', " ")
}
