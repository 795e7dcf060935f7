use chrono::{Datelike, Days, NaiveDate};
use roster_query::DateRange;

use crate::config::RelativeWindow;

impl RelativeWindow {
    /// Concrete inclusive date range relative to `today`.
    ///
    /// `None` only when the range would leave the representable calendar.
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> Option<DateRange> {
        let (start, end) = match self {
            RelativeWindow::LastDays { days } => {
                (today.checked_sub_days(Days::new(u64::from(days)))?, today)
            }
            RelativeWindow::NextDays { days } => {
                (today, today.checked_add_days(Days::new(u64::from(days)))?)
            }
            RelativeWindow::ThisWeek => {
                let offset = today.weekday().num_days_from_monday();
                let monday = today.checked_sub_days(Days::new(u64::from(offset)))?;
                (monday, monday.checked_add_days(Days::new(6))?)
            }
            RelativeWindow::Today => (today, today),
        };
        DateRange::new(start, end).ok()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn last_days_ends_today() {
        // 2026-10-19 is a Monday
        let r = RelativeWindow::LastDays { days: 7 }.resolve(date(2026, 10, 19)).unwrap();
        assert_eq!(r.start(), date(2026, 10, 12));
        assert_eq!(r.end(), date(2026, 10, 19));
    }

    #[test]
    fn this_week_is_monday_to_sunday() {
        let r = RelativeWindow::ThisWeek.resolve(date(2026, 10, 22)).unwrap();
        assert_eq!(r.start(), date(2026, 10, 19));
        assert_eq!(r.end(), date(2026, 10, 25));
    }

    #[test]
    fn next_days_starts_today() {
        let r = RelativeWindow::NextDays { days: 7 }.resolve(date(2026, 12, 28)).unwrap();
        assert_eq!(r.start(), date(2026, 12, 28));
        assert_eq!(r.end(), date(2027, 1, 4));
    }

    #[test]
    fn today_is_a_single_day() {
        let day = date(2026, 2, 28);
        assert_eq!(RelativeWindow::Today.resolve(day), Some(DateRange::single_day(day)));
    }
}
