//! Gregorian month layout.

use crate::model::date_key::Month;
use serde::Serialize;

const DAYS_PER_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

// 1970-01-01 was a Thursday.
const EPOCH_WEEKDAY: i128 = 4;

/// Seven Sunday-first slots; `None` pads before day 1 and after the last day.
pub type Week = [Option<u32>; 7];

/// Grid shape of one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthLayout {
    /// Weekday of day 1, `0` = Sunday through `6` = Saturday.
    pub first_weekday: u8,
    pub day_count: u32,
}

impl MonthLayout {
    /// Expands the layout into week rows.
    pub fn weeks(&self) -> Vec<Week> {
        let lead = u32::from(self.first_weekday);
        let slots = lead + self.day_count;
        let rows = slots.div_ceil(7);

        (0..rows)
            .map(|row| {
                let mut week: Week = [None; 7];
                for (column, slot) in week.iter_mut().enumerate() {
                    let position = row * 7 + column as u32;
                    if position >= lead && position < slots {
                        *slot = Some(position - lead + 1);
                    }
                }
                week
            })
            .collect()
    }
}

/// Computes the grid shape for `month` of `year`.
pub fn layout(year: i64, month: Month) -> MonthLayout {
    MonthLayout {
        first_weekday: weekday_of(year, month, 1),
        day_count: days_in_month(year, month),
    }
}

/// Leap year iff divisible by 4 and (not by 100, or by 400).
pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

pub fn days_in_month(year: i64, month: Month) -> u32 {
    if month == Month::FEBRUARY && is_leap_year(year) {
        29
    } else {
        DAYS_PER_MONTH[month.index() as usize]
    }
}

/// Weekday (`0` = Sunday) of an arbitrary proleptic Gregorian date.
///
/// `day` is not range-checked; out-of-month values roll forward the way day
/// arithmetic does.
pub fn weekday_of(year: i64, month: Month, day: u32) -> u8 {
    let days = days_from_civil(year, month.number(), day);
    (days + EPOCH_WEEKDAY).rem_euclid(7) as u8
}

// Days since 1970-01-01. Years are shifted to start in March so the leap day
// is the last day of the shifted year; i128 keeps the whole i64 range exact.
fn days_from_civil(year: i64, month_number: u32, day: u32) -> i128 {
    let year = i128::from(year) - i128::from(month_number <= 2);
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = i128::from((month_number + 9) % 12);
    let day_of_year = (153 * shifted_month + 2) / 5 + i128::from(day) - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * 146_097 + day_of_era - 719_468
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, is_leap_year, layout, weekday_of, MonthLayout};
    use crate::model::date_key::Month;
    use chrono::{Datelike, NaiveDate};

    fn month(index: u32) -> Month {
        Month::from_index(index).unwrap()
    }

    #[test]
    fn leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(-100));
        assert!(is_leap_year(-400));
    }

    #[test]
    fn day_counts_follow_gregorian_table() {
        let expected = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (index, days) in expected.iter().enumerate() {
            assert_eq!(days_in_month(2023, month(index as u32)), *days);
        }
        assert_eq!(days_in_month(2024, Month::FEBRUARY), 29);
        assert_eq!(days_in_month(1900, Month::FEBRUARY), 28);
        assert_eq!(days_in_month(2000, Month::FEBRUARY), 29);
    }

    #[test]
    fn reference_weekdays() {
        // 2024-03-01 was a Friday.
        assert_eq!(layout(2024, month(2)).first_weekday, 5);
        // 1970-01-01 was a Thursday.
        assert_eq!(layout(1970, month(0)).first_weekday, 4);
        // 2000-01-01 was a Saturday.
        assert_eq!(layout(2000, month(0)).first_weekday, 6);
        // 1582-10-15, first day of the Gregorian reform, was a Friday.
        assert_eq!(weekday_of(1582, month(9), 15), 5);
    }

    #[test]
    fn february_2024_layout() {
        assert_eq!(
            layout(2024, Month::FEBRUARY),
            MonthLayout {
                first_weekday: 4,
                day_count: 29,
            }
        );
    }

    #[test]
    fn weekdays_match_chrono_across_four_centuries() {
        for year in 1800..=2200 {
            for index in 0..12 {
                let expected = NaiveDate::from_ymd_opt(year as i32, index + 1, 1)
                    .unwrap()
                    .weekday()
                    .num_days_from_sunday() as u8;
                assert_eq!(
                    layout(year, month(index)).first_weekday,
                    expected,
                    "{year}-{}",
                    index + 1
                );
            }
        }
    }

    #[test]
    fn weekdays_match_chrono_for_negative_years() {
        for year in -1200..=0 {
            let expected = NaiveDate::from_ymd_opt(year as i32, 3, 1)
                .unwrap()
                .weekday()
                .num_days_from_sunday() as u8;
            assert_eq!(layout(year, month(2)).first_weekday, expected, "{year}-3");
        }
    }

    #[test]
    fn extreme_years_do_not_overflow() {
        let far_future = layout(i64::MAX, Month::DECEMBER);
        assert!(far_future.first_weekday < 7);
        let far_past = layout(i64::MIN, Month::JANUARY);
        assert!(far_past.first_weekday < 7);
        // The 400-year cycle has a whole number of weeks.
        assert_eq!(
            layout(2024 + 400 * 1_000_000, month(2)).first_weekday,
            layout(2024, month(2)).first_weekday
        );
    }

    #[test]
    fn weeks_pad_before_and_after() {
        let weeks = layout(2024, Month::FEBRUARY).weeks();
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0], [None, None, None, None, Some(1), Some(2), Some(3)]);
        assert_eq!(
            weeks[4],
            [Some(25), Some(26), Some(27), Some(28), Some(29), None, None]
        );

        let days: Vec<u32> = weeks.iter().flatten().flatten().copied().collect();
        assert_eq!(days, (1..=29).collect::<Vec<_>>());
    }

    #[test]
    fn weeks_for_month_starting_on_sunday() {
        // February 2015 starts on Sunday and fills exactly four rows.
        let weeks = layout(2015, Month::FEBRUARY).weeks();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[0][0], Some(1));
        assert_eq!(weeks[3][6], Some(28));
    }
}
