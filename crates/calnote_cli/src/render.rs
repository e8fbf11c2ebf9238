//! Plain-text rendering of month snapshots.

use calnote_core::{DayMarker, EventEditor, MonthView};
use std::fmt::Write as _;

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const CELL_WIDTH: usize = 4;
const GRID_WIDTH: usize = CELL_WIDTH * 7;

/// Draws the month grid followed by the lines of every marked day.
///
/// Marked days carry `*`; days whose state could not be read carry `?`.
pub fn render_month(view: &MonthView) -> String {
    let mut out = String::new();
    let title = format!("{} {}", view.month_name, view.selection.year);
    push_line(&mut out, &format!("{title:^GRID_WIDTH$}"));

    let header: String = WEEKDAY_HEADERS
        .iter()
        .map(|name| format!("{name:>CELL_WIDTH$}"))
        .collect();
    push_line(&mut out, &header);

    for week in &view.weeks {
        let mut row = String::new();
        for slot in week {
            match slot {
                Some(cell) => {
                    let _ = write!(row, " {:>2}{}", cell.day, marker_symbol(&cell.marker));
                }
                None => row.push_str(&" ".repeat(CELL_WIDTH)),
            }
        }
        push_line(&mut out, &row);
    }

    let mut notes = String::new();
    let mut unavailable = false;
    for cell in view.days() {
        match &cell.marker {
            DayMarker::HasEvents { tooltip } => {
                let summary = tooltip
                    .as_deref()
                    .map(|text| text.lines().collect::<Vec<_>>().join(" | "))
                    .unwrap_or_else(|| "(lines unavailable)".to_string());
                let _ = writeln!(notes, "{:>3}: {}", cell.day, summary);
            }
            DayMarker::Unavailable => unavailable = true,
            DayMarker::Empty => {}
        }
    }
    if !notes.is_empty() {
        out.push('\n');
        out.push_str(&notes);
    }
    if unavailable {
        out.push_str("\n? event storage could not be read for some days\n");
    }
    out
}

/// Prompt shown when an editor opens.
pub fn render_editor(editor: &EventEditor) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Events on {} (one per line; `.` saves, `:cancel` discards)",
        editor.date()
    );
    if let Some(err) = editor.load_error() {
        let _ = writeln!(out, "warning: existing events could not be loaded: {err}");
    }
    if editor.original_lines().is_empty() {
        out.push_str("(no events)\n");
    } else {
        for line in editor.original_lines() {
            let _ = writeln!(out, "  {line}");
        }
    }
    out
}

fn marker_symbol(marker: &DayMarker) -> char {
    match marker {
        DayMarker::HasEvents { .. } => '*',
        DayMarker::Unavailable => '?',
        DayMarker::Empty => ' ',
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::render_month;
    use calnote_core::db::open_db_in_memory;
    use calnote_core::{CalendarController, EventService, Month, Selection, SqliteEventRepository};

    fn february_2024() -> CalendarController<SqliteEventRepository> {
        let repo = SqliteEventRepository::try_new(open_db_in_memory().unwrap()).unwrap();
        CalendarController::new(
            EventService::new(repo),
            Selection::new(2024, Month::FEBRUARY),
        )
    }

    #[test]
    fn grid_starts_on_thursday() {
        let rendered = render_month(&february_2024().view());
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0].trim(), "February 2024");
        assert_eq!(lines[1], " Sun Mon Tue Wed Thu Fri Sat");
        assert_eq!(lines[2], format!("{}1   2   3", " ".repeat(18)));
        assert_eq!(lines[6], " 25  26  27  28  29");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn marked_days_get_star_and_summary() {
        let mut controller = february_2024();
        controller
            .open_editor(29)
            .unwrap()
            .set_text("leap day test\nsecond");
        controller.confirm_edit().unwrap();

        let rendered = render_month(&controller.view());
        assert!(rendered.contains(" 28  29*"));
        assert!(rendered.contains(" 29: leap day test | second"));
    }
}
