//! Render snapshots produced by the controller.

use crate::controller::selection::Selection;
use crate::grid::MonthLayout;
use crate::model::date_key::DateKey;
use crate::service::event_service::DayMarker;
use serde::Serialize;

/// One day slot on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub date: DateKey,
    pub marker: DayMarker,
}

/// Everything a front end needs to draw the selected month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthView {
    pub selection: Selection,
    pub month_name: &'static str,
    pub layout: MonthLayout,
    /// Sunday-first rows; `None` pads outside the month.
    pub weeks: Vec<Vec<Option<DayCell>>>,
    /// `true` while a date editor is open.
    pub editing: bool,
}

impl MonthView {
    /// Cells of the month in day order, without padding.
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}
