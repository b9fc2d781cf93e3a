use crate::model::month::MonthContext;
use chrono::Datelike;

/// Weekday layout of one month (weeks start on Sunday).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthLayout {
    /// Weekday of day 1, `0` = Sunday .. `6` = Saturday.
    pub first_weekday: u32,
    pub days_in_month: u32,
    /// Blank cells after the last day so the final row is complete.
    pub trailing_blanks: u32,
}

impl MonthLayout {
    /// Number of 7-cell rows the month occupies.
    pub fn rows(&self) -> u32 {
        (self.first_weekday + self.days_in_month + self.trailing_blanks) / 7
    }
}

pub fn month_layout(context: MonthContext) -> MonthLayout {
    let first_weekday = context.first_day().weekday().num_days_from_sunday();
    let days_in_month = days_in_month(context.year(), context.month());
    MonthLayout {
        first_weekday,
        days_in_month,
        trailing_blanks: (7 - (first_weekday + days_in_month) % 7) % 7,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Length of a 1-based month; `0` for a month outside `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::{days_in_month, is_leap_year, month_layout, MonthLayout};
    use crate::model::month::MonthContext;

    fn layout(year: i32, month: u32) -> MonthLayout {
        month_layout(MonthContext::new(year, month).unwrap())
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn february_length_follows_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2100, 2), 28);
        assert_eq!(days_in_month(2024, 13), 0);
    }

    #[test]
    fn february_2024_layout() {
        let february = layout(2024, 2);
        assert_eq!(
            february,
            MonthLayout {
                first_weekday: 4,
                days_in_month: 29,
                trailing_blanks: 2,
            }
        );
        assert_eq!(february.rows(), 5);
    }

    #[test]
    fn month_starting_sunday_and_filling_rows_has_no_blanks() {
        // February 2015 starts on a Sunday and has exactly four weeks.
        let february = layout(2015, 2);
        assert_eq!(february.first_weekday, 0);
        assert_eq!(february.trailing_blanks, 0);
        assert_eq!(february.rows(), 4);
    }

    #[test]
    fn six_row_month() {
        // March 2024 starts on a Friday with 31 days.
        let march = layout(2024, 3);
        assert_eq!(march.first_weekday, 5);
        assert_eq!(march.trailing_blanks, 6);
        assert_eq!(march.rows(), 6);
    }

    #[test]
    fn cells_always_fill_whole_weeks() {
        for year in [1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let l = layout(year, month);
                assert_eq!(
                    (l.first_weekday + l.days_in_month + l.trailing_blanks) % 7,
                    0,
                    "{year}-{month}"
                );
                assert!(l.trailing_blanks < 7);
                assert_eq!(l.days_in_month, days_in_month(year, month));
            }
        }
    }
}
