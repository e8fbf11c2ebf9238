//! Modal editor for the event lines of one date.
//!
//! # Responsibility
//! - Load the current lines of a date as one editable text buffer.
//! - Turn the edited buffer back into the full replacement line set.
//!
//! # Invariants
//! - The editor never writes on its own; `commit` is the only write path and
//!   it always submits the complete new set.
//! - Dropping an editor without committing is a cancel.

use crate::model::date_key::DateKey;
use crate::repo::event_repo::{EventRepository, RepoResult};
use crate::service::event_service::EventService;

/// Splits editor text into event lines.
///
/// Any line terminator separates lines (`\r\n`, `\n`, `\r`, vertical tab,
/// form feed, NEL, U+2028, U+2029). Lines are trimmed and blank ones dropped.
pub fn split_lines(text: &str) -> Vec<String> {
    text.split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{000B}' | '\u{000C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

/// Edit session for one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEditor {
    date: DateKey,
    original: Vec<String>,
    text: String,
    load_error: Option<String>,
}

impl EventEditor {
    /// Opens an editor pre-filled with the stored lines of `date`.
    ///
    /// A read failure leaves the buffer empty and records the error so the
    /// front end can warn before the user overwrites anything.
    pub fn open<R: EventRepository>(service: &EventService<R>, date: DateKey) -> Self {
        let (original, load_error) = match service.list_events(&date) {
            Ok(lines) => (lines, None),
            Err(err) => (Vec::new(), Some(err.to_string())),
        };
        Self {
            date,
            text: original.join("\n"),
            original,
            load_error,
        }
    }

    pub fn date(&self) -> &DateKey {
        &self.date
    }

    /// Lines stored for the date when the editor was opened.
    pub fn original_lines(&self) -> &[String] {
        &self.original
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Lines that `commit` would store.
    pub fn pending_lines(&self) -> Vec<String> {
        split_lines(&self.text)
    }

    /// Writes the pending lines as the full replacement set for the date.
    pub fn commit<R: EventRepository>(
        &self,
        service: &mut EventService<R>,
    ) -> RepoResult<Vec<String>> {
        service.replace_events(&self.date, &self.pending_lines())
    }
}

#[cfg(test)]
mod tests {
    use super::split_lines;

    #[test]
    fn split_lines_drops_blank_and_trims() {
        assert_eq!(split_lines("a\n\n  b  \n"), vec!["a", "b"]);
    }

    #[test]
    fn split_lines_handles_every_terminator() {
        let text = "one\r\ntwo\rthree\u{000B}four\u{000C}five\u{0085}six\u{2028}seven\u{2029}eight";
        assert_eq!(
            split_lines(text),
            vec!["one", "two", "three", "four", "five", "six", "seven", "eight"]
        );
    }

    #[test]
    fn split_lines_of_whitespace_is_empty() {
        assert!(split_lines("").is_empty());
        assert!(split_lines(" \n\t\n  ").is_empty());
    }
}
