//! Calendar view controller.
//!
//! # Responsibility
//! - Own the selected month and its rendered day cells.
//! - Drive the Viewing/Editing state machine for date edits.
//!
//! # Invariants
//! - At most one editor is open at a time.
//! - Selection changes are only accepted while Viewing.
//! - Confirming an edit refreshes only the edited day's cell; a failed write
//!   leaves the previous marker in place.

mod selection;
mod view;

pub use selection::Selection;
pub use view::{DayCell, MonthView};

use crate::editor::EventEditor;
use crate::grid::{layout, MonthLayout};
use crate::model::date_key::DateKey;
use crate::repo::event_repo::EventRepository;
use crate::service::event_service::EventService;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from invalid controller transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// An editor is open; close it before navigating or opening another.
    EditInProgress(DateKey),
    /// No editor is open.
    NotEditing,
    /// Day is not part of the selected month.
    InvalidDay { day: u32, day_count: u32 },
}

impl Display for ControllerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EditInProgress(date) => write!(f, "an edit for {date} is still open"),
            Self::NotEditing => write!(f, "no edit is open"),
            Self::InvalidDay { day, day_count } => {
                write!(f, "day {day} is not in 1..={day_count}")
            }
        }
    }
}

impl Error for ControllerError {}

/// Controller mode, mirroring the two UI states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Viewing,
    Editing,
}

/// Result of confirming an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The store now holds exactly `lines` for `date`.
    Saved { date: DateKey, lines: Vec<String> },
    /// The write failed and was rolled back; prior state is kept.
    WriteFailed { date: DateKey, message: String },
}

enum State {
    Viewing,
    Editing(EventEditor),
}

/// Month grid controller over an event store.
pub struct CalendarController<R: EventRepository> {
    service: EventService<R>,
    selection: Selection,
    layout: MonthLayout,
    cells: Vec<DayCell>,
    state: State,
}

impl<R: EventRepository> CalendarController<R> {
    /// Creates a controller showing `selection`, rendering it immediately.
    pub fn new(service: EventService<R>, selection: Selection) -> Self {
        let mut controller = Self {
            service,
            selection,
            layout: layout(selection.year, selection.month),
            cells: Vec::new(),
            state: State::Viewing,
        };
        controller.render();
        controller
    }

    pub fn service(&self) -> &EventService<R> {
        &self.service
    }

    pub fn into_service(self) -> EventService<R> {
        self.service
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn layout(&self) -> MonthLayout {
        self.layout
    }

    /// Day cells of the selected month, day 1 first.
    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn cell(&self, day: u32) -> Option<&DayCell> {
        day.checked_sub(1)
            .and_then(|index| self.cells.get(index as usize))
    }

    pub fn mode(&self) -> Mode {
        match self.state {
            State::Viewing => Mode::Viewing,
            State::Editing(_) => Mode::Editing,
        }
    }

    pub fn editor(&self) -> Option<&EventEditor> {
        match &self.state {
            State::Editing(editor) => Some(editor),
            State::Viewing => None,
        }
    }

    pub fn editor_mut(&mut self) -> Option<&mut EventEditor> {
        match &mut self.state {
            State::Editing(editor) => Some(editor),
            State::Viewing => None,
        }
    }

    /// Switches to another month and re-renders the whole grid.
    pub fn select(&mut self, selection: Selection) -> Result<(), ControllerError> {
        self.ensure_viewing()?;
        self.selection = selection;
        self.layout = layout(selection.year, selection.month);
        self.render();
        Ok(())
    }

    pub fn next_month(&mut self) -> Result<(), ControllerError> {
        self.select(self.selection.next())
    }

    pub fn previous_month(&mut self) -> Result<(), ControllerError> {
        self.select(self.selection.previous())
    }

    /// Re-queries the store for every day of the selected month.
    pub fn refresh(&mut self) -> Result<(), ControllerError> {
        self.ensure_viewing()?;
        self.render();
        Ok(())
    }

    /// Viewing -> Editing for `day` of the selected month.
    pub fn open_editor(&mut self, day: u32) -> Result<&mut EventEditor, ControllerError> {
        self.ensure_viewing()?;
        let date = self
            .cell(day)
            .map(|cell| cell.date)
            .ok_or(ControllerError::InvalidDay {
                day,
                day_count: self.layout.day_count,
            })?;

        let editor = EventEditor::open(&self.service, date);
        if let Some(message) = editor.load_error() {
            warn!(
                "event=editor_open module=controller status=degraded date={} error={}",
                date, message
            );
        } else {
            debug!(
                "event=editor_open module=controller status=ok date={} lines={}",
                date,
                editor.original_lines().len()
            );
        }

        self.state = State::Editing(editor);
        self.editor_mut().ok_or(ControllerError::NotEditing)
    }

    /// Editing -> Viewing, writing the editor's lines back to the store.
    pub fn confirm_edit(&mut self) -> Result<EditOutcome, ControllerError> {
        let editor = match std::mem::replace(&mut self.state, State::Viewing) {
            State::Editing(editor) => editor,
            State::Viewing => return Err(ControllerError::NotEditing),
        };
        let date = *editor.date();

        match editor.commit(&mut self.service) {
            Ok(lines) => {
                self.refresh_cell(&date);
                Ok(EditOutcome::Saved { date, lines })
            }
            Err(err) => Ok(EditOutcome::WriteFailed {
                date,
                message: err.to_string(),
            }),
        }
    }

    /// Editing -> Viewing without touching the store.
    pub fn cancel_edit(&mut self) -> Result<(), ControllerError> {
        match std::mem::replace(&mut self.state, State::Viewing) {
            State::Editing(editor) => {
                debug!(
                    "event=editor_cancel module=controller status=ok date={}",
                    editor.date()
                );
                Ok(())
            }
            State::Viewing => Err(ControllerError::NotEditing),
        }
    }

    /// Snapshot of the selected month for rendering.
    pub fn view(&self) -> MonthView {
        let weeks = self
            .layout
            .weeks()
            .iter()
            .map(|week| {
                week.iter()
                    .map(|&slot| slot.and_then(|day| self.cell(day).cloned()))
                    .collect()
            })
            .collect();

        MonthView {
            selection: self.selection,
            month_name: self.selection.month.name(),
            layout: self.layout,
            weeks,
            editing: self.mode() == Mode::Editing,
        }
    }

    fn ensure_viewing(&self) -> Result<(), ControllerError> {
        match &self.state {
            State::Viewing => Ok(()),
            State::Editing(editor) => Err(ControllerError::EditInProgress(*editor.date())),
        }
    }

    fn render(&mut self) {
        let Selection { year, month } = self.selection;
        let mut cells = Vec::with_capacity(self.layout.day_count as usize);
        for day in 1..=self.layout.day_count {
            // Days come from the layout of this same month, so they are valid.
            let Ok(date) = DateKey::new(year, month, day) else {
                continue;
            };
            cells.push(DayCell {
                day,
                marker: self.service.day_marker(&date),
                date,
            });
        }
        self.cells = cells;

        info!(
            "event=grid_render module=controller status=ok year={} month={} days={} marked={}",
            year,
            month.number(),
            self.cells.len(),
            self.cells
                .iter()
                .filter(|cell| cell.marker.has_events())
                .count()
        );
    }

    fn refresh_cell(&mut self, date: &DateKey) {
        let marker = self.service.day_marker(date);
        if let Some(cell) = self.cells.iter_mut().find(|cell| cell.date == *date) {
            cell.marker = marker;
        }
    }
}
