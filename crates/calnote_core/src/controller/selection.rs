//! Currently displayed month.

use crate::model::date_key::Month;
use chrono::{Datelike, Local};
use serde::Serialize;

/// Transient (year, month) choice; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub year: i64,
    pub month: Month,
}

impl Selection {
    pub fn new(year: i64, month: Month) -> Self {
        Self { year, month }
    }

    /// Month containing today's local date.
    pub fn current() -> Self {
        let today = Local::now().date_naive();
        let month = Month::from_index(today.month0()).unwrap_or(Month::JANUARY);
        Self::new(i64::from(today.year()), month)
    }

    /// Following month; stays put at December of the last representable year.
    pub fn next(self) -> Self {
        let (month, rolled) = self.month.succ();
        if !rolled {
            return Self::new(self.year, month);
        }
        self.year
            .checked_add(1)
            .map_or(self, |year| Self::new(year, month))
    }

    /// Preceding month; stays put at January of the first representable year.
    pub fn previous(self) -> Self {
        let (month, rolled) = self.month.pred();
        if !rolled {
            return Self::new(self.year, month);
        }
        self.year
            .checked_sub(1)
            .map_or(self, |year| Self::new(year, month))
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::model::date_key::Month;

    #[test]
    fn next_and_previous_roll_over_years() {
        let december = Selection::new(2023, Month::DECEMBER);
        assert_eq!(december.next(), Selection::new(2024, Month::JANUARY));
        assert_eq!(
            Selection::new(2024, Month::JANUARY).previous(),
            Selection::new(2023, Month::DECEMBER)
        );
        assert_eq!(
            Selection::new(0, Month::JANUARY).previous(),
            Selection::new(-1, Month::DECEMBER)
        );
    }

    #[test]
    fn navigation_stops_at_year_bounds() {
        let last = Selection::new(i64::MAX, Month::DECEMBER);
        assert_eq!(last.next(), last);
        assert_eq!(
            last.previous(),
            Selection::new(i64::MAX, Month::from_index(10).unwrap())
        );

        let first = Selection::new(i64::MIN, Month::JANUARY);
        assert_eq!(first.previous(), first);
        assert_eq!(first.next(), Selection::new(i64::MIN, Month::FEBRUARY));
    }

    #[test]
    fn current_is_a_valid_month() {
        let current = Selection::current();
        assert!(current.month.index() < 12);
        assert!(current.year >= 2000);
    }
}
