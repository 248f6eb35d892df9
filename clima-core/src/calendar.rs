use chrono::NaiveDate;
use thiserror::Error;

/// Non-leap year used when only month and day are known.
pub const REFERENCE_YEAR: i32 = 2025;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DateError {
    #[error("month {0} is outside 1..=12")]
    MonthOutOfRange(u32),
    #[error("day {day} does not exist in month {month}")]
    DayOutOfRange { month: u32, day: u32 },
}

/// Number of days in `month` for the non-leap reference year (February = 28).
pub fn days_in_month(month: u32) -> Result<u32, DateError> {
    if !(1..=12).contains(&month) {
        return Err(DateError::MonthOutOfRange(month));
    }
    let first = NaiveDate::from_ymd_opt(REFERENCE_YEAR, month, 1)
        .ok_or(DateError::MonthOutOfRange(month))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(REFERENCE_YEAR, month + 1, 1)
    }
    .ok_or(DateError::MonthOutOfRange(month))?;
    Ok((next - first).num_days() as u32)
}

/// A month/day pair with no year attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    pub fn new(month: u32, day: u32) -> Result<Self, DateError> {
        let max_day = days_in_month(month)?;
        if day == 0 || day > max_day {
            return Err(DateError::DayOutOfRange { month, day });
        }
        Ok(Self { month, day })
    }

    /// Zero-padded `MMDD`, as used in export filenames.
    pub fn mmdd(&self) -> String {
        format!("{:02}{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(1), Ok(31));
        assert_eq!(days_in_month(2), Ok(28));
        assert_eq!(days_in_month(4), Ok(30));
        assert_eq!(days_in_month(6), Ok(30));
        assert_eq!(days_in_month(12), Ok(31));
        let total: u32 = (1..=12).map(|m| days_in_month(m).unwrap()).sum();
        assert_eq!(total, 365);
    }

    #[test]
    fn test_month_out_of_range_is_an_error() {
        assert_eq!(days_in_month(0), Err(DateError::MonthOutOfRange(0)));
        assert_eq!(days_in_month(13), Err(DateError::MonthOutOfRange(13)));
    }

    #[test]
    fn test_calendar_date_rejects_missing_days() {
        assert!(CalendarDate::new(4, 31).is_err());
        assert!(CalendarDate::new(2, 29).is_err());
        assert!(CalendarDate::new(6, 31).is_err());
        assert!(CalendarDate::new(6, 0).is_err());
        assert!(CalendarDate::new(6, 30).is_ok());
    }

    #[test]
    fn test_mmdd() {
        assert_eq!(CalendarDate::new(6, 5).unwrap().mmdd(), "0605");
        assert_eq!(CalendarDate::new(12, 25).unwrap().mmdd(), "1225");
    }
}
