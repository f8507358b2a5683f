//! The prediction date input.

use chrono::{Months, NaiveDate};
use serde::Serialize;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rejected date changes. Both reset the field to today.
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("Please select today or a future date")]
    Past,

    #[error("Invalid date '{0}'")]
    Invalid(String),
}

/// A date input limited to the coming year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRangeField {
    pub today: NaiveDate,
    pub min: NaiveDate,
    pub max: NaiveDate,
    pub value: NaiveDate,
}

impl DateRangeField {
    /// A field for `today`, with one year of future dates allowed.
    ///
    /// From February 29 the maximum clamps to February 28.
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        let max = today
            .checked_add_months(Months::new(12))
            .unwrap_or(NaiveDate::MAX);

        Self {
            today,
            min: today,
            max,
            value: today,
        }
    }

    /// Applies a `YYYY-MM-DD` value typed or picked by the user.
    ///
    /// # Errors
    ///
    /// * [`DateError::Past`] if the date is before today
    /// * [`DateError::Invalid`] if the text is not a date
    pub fn change(&mut self, text: &str) -> Result<NaiveDate, DateError> {
        let date = match NaiveDate::parse_from_str(text.trim(), DATE_FORMAT) {
            Ok(date) => date,
            Err(e) => {
                log::debug!("Unparseable date '{text}': {e}");
                self.value = self.today;
                return Err(DateError::Invalid(text.to_string()));
            }
        };

        if date < self.today {
            self.value = self.today;
            return Err(DateError::Past);
        }

        self.value = date;
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_is_one_year() {
        let field = DateRangeField::new(ymd(2026, 10, 17));
        assert_eq!(field.min, ymd(2026, 10, 17));
        assert_eq!(field.max, ymd(2027, 10, 17));
        assert_eq!(field.value, ymd(2026, 10, 17));
    }

    #[test]
    fn leap_day_max_clamps() {
        let field = DateRangeField::new(ymd(2028, 2, 29));
        assert_eq!(field.max, ymd(2029, 2, 28));
    }

    #[test]
    fn past_date_resets_to_today() {
        let mut field = DateRangeField::new(ymd(2026, 10, 17));
        field.change("2026-12-01").unwrap();
        let err = field.change("2026-10-16").unwrap_err();
        assert_eq!(err.to_string(), "Please select today or a future date");
        assert_eq!(field.value, ymd(2026, 10, 17));
    }

    #[test]
    fn today_and_future_are_accepted() {
        let mut field = DateRangeField::new(ymd(2026, 10, 17));
        assert_eq!(field.change("2026-10-17").unwrap(), ymd(2026, 10, 17));
        assert_eq!(field.change(" 2027-01-05 ").unwrap(), ymd(2027, 1, 5));
        assert_eq!(field.value, ymd(2027, 1, 5));
    }

    #[test]
    fn garbage_resets_to_today() {
        let mut field = DateRangeField::new(ymd(2026, 10, 17));
        field.change("2026-11-11").unwrap();
        assert!(matches!(field.change("next week"), Err(DateError::Invalid(_))));
        assert_eq!(field.value, ymd(2026, 10, 17));
    }
}
