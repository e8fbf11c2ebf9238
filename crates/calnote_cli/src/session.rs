//! Line-oriented interactive session.
//!
//! # Responsibility
//! - Map typed commands onto controller transitions.
//! - Collect multi-line editor input and confirm or cancel it.
//!
//! # Invariants
//! - While an editor is open, input lines are editor text until a lone `.`
//!   (confirm) or `:cancel`; end of input cancels.
//! - Storage errors are reported to the user, never turned into a crash.

use crate::render::{render_editor, render_month};
use calnote_core::{CalendarController, EditOutcome, EventRepository, Month, Selection};
use std::io::{self, BufRead, Write};

const CONFIRM_LINE: &str = ".";
const CANCEL_LINE: &str = ":cancel";

const HELP: &str = "\
commands:
  n, next             show the next month
  p, prev             show the previous month
  goto <month> <year> show a month (month is 1-12)
  today               show the current month
  e, edit <day>       edit the events of a day
  refresh             re-read the month from storage
  help                show this help
  q, quit             leave
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Goto { month: Month, year: i64 },
    Today,
    Edit(u32),
    Refresh,
    Help,
    Quit,
}

/// Parses one command line; blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (head.to_ascii_lowercase().as_str(), args.as_slice()) {
        ("n" | "next", []) => Command::Next,
        ("p" | "prev" | "previous", []) => Command::Previous,
        ("today", []) => Command::Today,
        ("refresh", []) => Command::Refresh,
        ("help" | "?", []) => Command::Help,
        ("q" | "quit" | "exit", []) => Command::Quit,
        ("e" | "edit", [day]) => {
            let day = day
                .parse::<u32>()
                .map_err(|_| format!("`{day}` is not a day number"))?;
            Command::Edit(day)
        }
        ("goto", [month, year]) => {
            let month = month
                .parse::<u32>()
                .ok()
                .and_then(Month::from_number)
                .ok_or_else(|| format!("`{month}` is not a month number 1-12"))?;
            let year = year
                .parse::<i64>()
                .map_err(|_| format!("`{year}` is not a year"))?;
            Command::Goto { month, year }
        }
        (other, _) => return Err(format!("unknown command or arguments: `{other}`")),
    };
    Ok(Some(command))
}

/// Interactive driver around one controller.
pub struct Session<R: EventRepository> {
    controller: CalendarController<R>,
}

impl<R: EventRepository> Session<R> {
    pub fn new(controller: CalendarController<R>) -> Self {
        Self { controller }
    }

    #[cfg(test)]
    pub fn into_controller(self) -> CalendarController<R> {
        self.controller
    }

    /// Runs until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        let mut lines = input.lines();
        write!(out, "{}", render_month(&self.controller.view()))?;

        loop {
            write!(out, "> ")?;
            out.flush()?;
            let Some(line) = lines.next().transpose()? else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(out, "{message}; type `help` for commands")?;
                    continue;
                }
            };

            let navigated = match command {
                Command::Quit => break,
                Command::Help => {
                    write!(out, "{HELP}")?;
                    continue;
                }
                Command::Next => self.controller.next_month(),
                Command::Previous => self.controller.previous_month(),
                Command::Today => self.controller.select(Selection::current()),
                Command::Goto { month, year } => {
                    self.controller.select(Selection::new(year, month))
                }
                Command::Refresh => self.controller.refresh(),
                Command::Edit(day) => {
                    self.edit(day, &mut lines, &mut out)?;
                    Ok(())
                }
            };

            match navigated {
                Ok(()) => write!(out, "{}", render_month(&self.controller.view()))?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }

        Ok(())
    }

    fn edit(
        &mut self,
        day: u32,
        lines: &mut impl Iterator<Item = io::Result<String>>,
        out: &mut impl Write,
    ) -> io::Result<()> {
        match self.controller.open_editor(day) {
            Ok(editor) => write!(out, "{}", render_editor(editor))?,
            Err(err) => {
                writeln!(out, "{err}")?;
                return Ok(());
            }
        }

        let mut text = Vec::new();
        let confirmed = loop {
            let Some(line) = lines.next().transpose()? else {
                break false;
            };
            let trimmed = line.trim();
            if trimmed == CONFIRM_LINE {
                break true;
            }
            if trimmed == CANCEL_LINE {
                break false;
            }
            text.push(line);
        };

        if !confirmed {
            if self.controller.cancel_edit().is_ok() {
                writeln!(out, "edit discarded")?;
            }
            return Ok(());
        }

        if let Some(editor) = self.controller.editor_mut() {
            editor.set_text(text.join("\n"));
        }
        match self.controller.confirm_edit() {
            Ok(EditOutcome::Saved { date, lines }) => {
                writeln!(out, "saved {} line(s) for {date}", lines.len())?
            }
            Ok(EditOutcome::WriteFailed { date, message }) => {
                writeln!(out, "could not save events for {date}: {message}")?
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, Command, Session};
    use calnote_core::db::open_db_in_memory;
    use calnote_core::{
        CalendarController, DateKey, EventService, Mode, Month, Selection, SqliteEventRepository,
    };

    fn session_at(year: i64, month: Month) -> Session<SqliteEventRepository> {
        let repo = SqliteEventRepository::try_new(open_db_in_memory().unwrap()).unwrap();
        Session::new(CalendarController::new(
            EventService::new(repo),
            Selection::new(year, month),
        ))
    }

    fn run(session: &mut Session<SqliteEventRepository>, script: &str) -> String {
        let mut out = Vec::new();
        session.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_known_commands() {
        assert_eq!(parse_command("n"), Ok(Some(Command::Next)));
        assert_eq!(parse_command("  PREV "), Ok(Some(Command::Previous)));
        assert_eq!(parse_command("edit 29"), Ok(Some(Command::Edit(29))));
        assert_eq!(
            parse_command("goto 2 2024"),
            Ok(Some(Command::Goto {
                month: Month::FEBRUARY,
                year: 2024
            }))
        );
        assert_eq!(
            parse_command("goto 3 -44"),
            Ok(Some(Command::Goto {
                month: Month::from_index(2).unwrap(),
                year: -44
            }))
        );
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn parse_rejects_bad_arguments() {
        assert!(parse_command("goto 13 2024").is_err());
        assert!(parse_command("goto 2").is_err());
        assert!(parse_command("edit x").is_err());
        assert!(parse_command("next 2").is_err());
        assert!(parse_command("dance").is_err());
    }

    #[test]
    fn scripted_leap_day_edit() {
        let mut session = session_at(2023, Month::JANUARY);
        let output = run(
            &mut session,
            "goto 2 2024\nedit 29\nleap day test\n\n.\nedit 29\n:cancel\nquit\n",
        );

        assert!(output.contains("February 2024"));
        assert!(output.contains("saved 1 line(s) for 2024-2-29"));
        assert!(output.contains("  leap day test"));
        assert!(output.contains("edit discarded"));
        assert!(output.contains(" 29: leap day test"));

        let controller = session.into_controller();
        assert_eq!(controller.mode(), Mode::Viewing);
        let leap_day: DateKey = "2024-2-29".parse().unwrap();
        assert_eq!(
            controller.service().list_events(&leap_day).unwrap(),
            vec!["leap day test"]
        );
    }

    #[test]
    fn end_of_input_inside_editor_cancels() {
        let mut session = session_at(2024, Month::JANUARY);
        let output = run(&mut session, "edit 3\nunsaved text\n");

        assert!(output.contains("edit discarded"));
        let controller = session.into_controller();
        assert_eq!(controller.mode(), Mode::Viewing);
        let day: DateKey = "2024-1-3".parse().unwrap();
        assert!(!controller.service().has_events(&day).unwrap());
    }

    #[test]
    fn invalid_day_and_unknown_command_are_reported() {
        let mut session = session_at(2023, Month::FEBRUARY);
        let output = run(&mut session, "edit 30\nfly\nn\nq\n");

        assert!(output.contains("day 30 is not in 1..=28"));
        assert!(output.contains("unknown command"));
        assert!(output.contains("March 2023"));
    }
}
