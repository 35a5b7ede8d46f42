//! Output formatting for the terminal
//!
//! Answers are Markdown and stay readable as plain text; colour only marks
//! headings, separators and status lines, and only on a terminal.

use codedesk_common::{CandidateScore, IndexStats};
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Whether stdout should get ANSI colours
pub fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Reply text with Markdown headings and rules highlighted
pub fn format_reply(text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }

    text.lines()
        .map(|line| {
            if line.starts_with("### ") {
                line.bold().cyan().to_string()
            } else if line == "---" {
                line.dimmed().to_string()
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Candidate table for `ask --explain`
pub fn format_explain(scores: &[CandidateScore], min_score: u8, color: bool) -> String {
    let mut out = format!("[CANDIDATES] (minimum score {})\n", min_score);
    if scores.is_empty() {
        out.push_str("  (dataset is empty)\n");
        return out;
    }

    let code_width = scores.iter().map(|s| s.code.len()).max().unwrap_or(0).max(4);
    for score in scores {
        let best = format!("{:>3}", score.best());
        let best = match (color, score.best() >= min_score) {
            (false, _) => best,
            (true, true) => best.green().to_string(),
            (true, false) => best.dimmed().to_string(),
        };
        out.push_str(&format!(
            "  {}  {:<width$}  code {:>3}  name {:>3}  {}\n",
            best,
            score.code,
            score.code_score,
            score.name_score,
            score.name,
            width = code_width
        ));
    }
    out
}

/// Summary printed by `check`
pub fn format_stats(path: &str, stats: &IndexStats, color: bool) -> String {
    let status = if stats.unique_codes == 0 {
        "[WARNING]"
    } else {
        "[OK]"
    };
    let status = match (color, stats.unique_codes == 0) {
        (false, _) => status.to_string(),
        (true, true) => status.yellow().to_string(),
        (true, false) => status.green().to_string(),
    };

    let mut out = format!("{} {}\n", status, path);
    out.push_str(&format!("  Rows:             {}\n", stats.rows));
    out.push_str(&format!("  Unique codes:     {}\n", stats.unique_codes));
    out.push_str(&format!(
        "  Divergent names:  {}\n",
        stats.divergent_codes.len()
    ));
    for code in &stats.divergent_codes {
        out.push_str(&format!("    * {}\n", code));
    }
    out
}

/// Display an error
pub fn display_error(message: &str) {
    eprintln!("[ERROR] {}", message.red());
}
