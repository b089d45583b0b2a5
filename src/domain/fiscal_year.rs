use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};

/// The Indian fiscal year begins on April 1st
const FY_START_MONTH: u32 = 4;

/// A fiscal-year window derived from a reference date.
///
/// Never persisted; recomputed from the clock on every certificate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiscalYear {
    start: NaiveDate,
}

impl FiscalYear {
    /// The fiscal year a given calendar date falls in
    pub fn containing(reference: NaiveDate) -> Self {
        let start_year = if reference.month() >= FY_START_MONTH {
            reference.year()
        } else {
            reference.year() - 1
        };

        // April 1st exists in every year
        let start = NaiveDate::from_ymd_opt(start_year, FY_START_MONTH, 1)
            .expect("fiscal year start date");

        Self { start }
    }

    /// Inclusive lower bound of the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Exclusive upper bound of the window, exactly one year after the start
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.start.year() + 1, FY_START_MONTH, 1)
            .expect("fiscal year end date")
    }

    /// The window start as a UTC instant, for timestamp comparisons
    pub fn start_datetime(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.start.and_hms_opt(0, 0, 0).expect("midnight"))
    }

    /// Label of the form `"2023-2024"`
    pub fn label(&self) -> String {
        format!("{}-{}", self.start.year(), self.start.year() + 1)
    }
}

impl fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn march_31_belongs_to_previous_fiscal_year() {
        let fy = FiscalYear::containing(date(2024, 3, 31));

        assert_eq!(fy.start(), date(2023, 4, 1));
        assert_eq!(fy.label(), "2023-2024");
    }

    #[test]
    fn april_1_starts_a_new_fiscal_year() {
        let fy = FiscalYear::containing(date(2024, 4, 1));

        assert_eq!(fy.start(), date(2024, 4, 1));
        assert_eq!(fy.label(), "2024-2025");
    }

    #[test]
    fn december_belongs_to_current_fiscal_year() {
        let fy = FiscalYear::containing(date(2023, 12, 15));

        assert_eq!(fy.start(), date(2023, 4, 1));
        assert_eq!(fy.label(), "2023-2024");
    }

    #[test]
    fn end_is_one_year_after_start() {
        let fy = FiscalYear::containing(date(2024, 7, 4));

        assert_eq!(fy.end(), date(2025, 4, 1));
    }

    #[test]
    fn start_datetime_is_midnight_utc() {
        let fy = FiscalYear::containing(date(2024, 4, 1));

        assert_eq!(
            fy.start_datetime(),
            Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()
        );
    }
}
