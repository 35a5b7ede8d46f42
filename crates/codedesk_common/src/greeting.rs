//! Greeting detection.
//!
//! A prompt such as "hello, PR-401" carries small talk in front of the
//! real query. The greeting is split off so it can be answered separately
//! and only "pr-401" goes to the matcher.

/// Greetings recognized at the start of a prompt
pub const DEFAULT_GREETINGS: &[&str] = &["hi", "hello", "hey", "good morning", "good afternoon"];

/// Replies to a greeting
pub const DEFAULT_GREETING_RESPONSES: &[&str] = &["Hello there!", "Hi!", "Hey! Good to chat."];

/// A prompt split into greeting and query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingSplit {
    /// The greeting that opened the prompt, if any
    pub greeting: Option<String>,
    /// Text to look up
    pub query: String,
    /// Whether `query` is what remained after removing the greeting.
    /// False when there was no greeting, or when the prompt was only a
    /// greeting (the whole prompt is then kept as the query).
    pub stripped: bool,
}

impl GreetingSplit {
    pub fn is_greeting(&self) -> bool {
        self.greeting.is_some()
    }

    fn plain(prompt: &str) -> Self {
        Self {
            greeting: None,
            query: prompt.to_string(),
            stripped: false,
        }
    }
}

/// Split a leading greeting off a prompt.
///
/// The greeting must end at a word boundary ("hi there" matches "hi",
/// "history" does not). The remainder loses leading whitespace and
/// `,.:;` and is returned lowercased.
pub fn split_greeting<S: AsRef<str>>(prompt: &str, greetings: &[S]) -> GreetingSplit {
    let lowered = prompt.trim().to_lowercase();

    for greeting in greetings {
        let greeting = greeting.as_ref().trim().to_lowercase();
        if greeting.is_empty() || !lowered.starts_with(&greeting) {
            continue;
        }

        let rest = &lowered[greeting.len()..];
        let at_boundary = rest
            .chars()
            .next()
            .map(|c| !(c.is_alphanumeric() || c == '_'))
            .unwrap_or(true);
        if !at_boundary {
            continue;
        }

        let query = rest
            .trim_start_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | ':' | ';'))
            .trim_end();

        if query.is_empty() {
            return GreetingSplit {
                greeting: Some(greeting),
                query: prompt.to_string(),
                stripped: false,
            };
        }

        return GreetingSplit {
            greeting: Some(greeting),
            query: query.to_string(),
            stripped: true,
        };
    }

    GreetingSplit::plain(prompt)
}
