//! REPL - Conversational interface for Codedesk
//!
//! Reads one prompt per line, answers it and keeps the transcript so a
//! "show all" can expand the previous ambiguity list.

use crate::logging::{QueryLog, QueryLogEntry};
use crate::output::format_reply;
use anyhow::Result;
use codedesk_common::{Desk, PhraseChooser, Transcript};
use std::io::{BufRead, Write};
use std::time::Instant;
use tracing::info;

const PROMPT: &str = "> ";

/// Whether a line ends the session
fn is_exit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "quit")
}

/// Run the interactive loop until EOF or exit/quit.
///
/// Returns the session transcript.
pub fn run_repl<R: BufRead, W: Write>(
    desk: &Desk,
    input: R,
    output: &mut W,
    chooser: &mut dyn PhraseChooser,
    log: Option<&QueryLog>,
    color: bool,
) -> Result<Transcript> {
    let mut transcript = Transcript::new();

    let welcome = desk.welcome();
    writeln!(output, "{}\n", format_reply(&welcome, color))?;
    transcript.push_assistant(welcome, None);

    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let prompt = line.trim();

        if is_exit(prompt) {
            break;
        }
        if prompt.is_empty() {
            write!(output, "{}", PROMPT)?;
            output.flush()?;
            continue;
        }

        transcript.push_user(prompt);
        let started = Instant::now();
        let reply = desk.respond(prompt, &transcript, chooser);
        if let Some(log) = log {
            log.record(&QueryLogEntry::new(prompt, &reply.outcome, started.elapsed()));
        }

        writeln!(output, "\n{}\n", format_reply(&reply.text, color))?;
        transcript.push_assistant(reply.text.clone(), Some(reply.turn_outcome()));

        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }

    writeln!(output)?;
    info!("Session ended after {} turns", transcript.len());
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codedesk_common::{
        CandidateIndex, DeskConfig, NamePolicy, Record, Role, Schema, SeededChooser, TurnOutcome,
    };
    use std::io::Cursor;

    fn desk() -> Desk {
        let records = vec![
            Record::new("AB-100", "Color Mode", vec!["0".into(), "Auto".into()]),
            Record::new("AB-200", "Color Mods", vec!["0".into(), "Off".into()]),
            Record::new("PR-401", "Print Quality Mode", vec!["0".into(), "Standard".into()]),
        ];
        let index = CandidateIndex::build(records, NamePolicy::FirstWins).unwrap();
        Desk::new(index, Schema::default(), &DeskConfig::default()).unwrap()
    }

    fn session(lines: &str) -> (Transcript, String) {
        let mut out = Vec::new();
        let transcript = run_repl(
            &desk(),
            Cursor::new(lines.to_string()),
            &mut out,
            &mut SeededChooser::new(0),
            None,
            false,
        )
        .unwrap();
        (transcript, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_welcome_only_on_eof() {
        let (transcript, out) = session("");
        assert_eq!(transcript.len(), 1);
        assert!(out.starts_with("Hello! I can search my knowledge base"));
    }

    #[test]
    fn test_ambiguity_then_show_all() {
        let (transcript, out) = session("color mod\nshow all\nquit\nPR-401\n");

        // welcome + 2 exchanges; nothing after quit
        assert_eq!(transcript.len(), 5);
        assert_eq!(transcript.turns()[1].role, Role::User);
        assert_eq!(
            transcript.last_assistant().and_then(|t| t.outcome.clone()),
            Some(TurnOutcome::ShowAll {
                codes: vec!["AB-100".into(), "AB-200".into()]
            })
        );
        assert!(out.contains("### Ambiguous Search Result"));
        assert!(out.contains("Displaying details for all the highly-matched 08 Codes below:"));
        assert!(!out.contains("Print Quality Mode"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let (transcript, _) = session("\n   \nEXIT\n");
        assert_eq!(transcript.len(), 1);
    }
}
