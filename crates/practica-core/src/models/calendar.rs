use jiff::ToSpan;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::shift::Shift;
use crate::calendar;
use crate::error::CoreError;

/// A calendar month of a specific year.
///
/// The external interface numbers months 0-11. Construction also fixes the
/// Monday-to-Sunday grid around the month, so a month whose grid would fall
/// outside the supported date range is rejected up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarMonth {
    first_day: Date,
    grid_start: Date,
    grid_end: Date,
}

impl CalendarMonth {
    /// Build from a zero-based month index (0 = January) and a year.
    pub fn from_zero_based(month: i8, year: i16) -> Result<Self, CoreError> {
        if !(0..=11).contains(&month) {
            return Err(CoreError::InvalidMonth { month, year });
        }
        let invalid = || CoreError::InvalidMonth { month, year };
        let first_day = Date::new(year, month + 1, 1).map_err(|_| invalid())?;
        let grid_start = calendar::start_of_week(first_day).ok_or_else(invalid)?;
        let grid_end = calendar::end_of_week(first_day.last_of_month()).ok_or_else(invalid)?;
        Ok(Self {
            first_day,
            grid_start,
            grid_end,
        })
    }

    pub fn year(self) -> i16 {
        self.first_day.year()
    }

    /// Month number, 1-12.
    pub fn month(self) -> i8 {
        self.first_day.month()
    }

    /// Month index, 0-11.
    pub fn month_index(self) -> i8 {
        self.first_day.month() - 1
    }

    pub fn first_day(self) -> Date {
        self.first_day
    }

    pub fn last_day(self) -> Date {
        self.first_day.last_of_month()
    }

    /// The Monday on or before the first day.
    pub fn grid_start(self) -> Date {
        self.grid_start
    }

    /// The Sunday on or after the last day.
    pub fn grid_end(self) -> Date {
        self.grid_end
    }

    pub fn contains(self, date: Date) -> bool {
        date.year() == self.year() && date.month() == self.month()
    }

    /// Every date of the month, in order.
    pub fn days(self) -> impl Iterator<Item = Date> {
        let len = usize::try_from(self.first_day.days_in_month()).unwrap_or(0);
        self.first_day.series(1.day()).take(len)
    }
}

/// Read-only week/day grid of shifts for calendar display. Rebuilt on demand,
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyShiftView {
    pub year: i16,
    /// Month index, 0-11.
    pub month: i8,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Week {
    /// ISO-8601 week number of the week's Monday.
    pub week_number: i8,
    pub start_date: Date,
    pub end_date: Date,
    /// Always seven days, Monday first.
    pub days: Vec<Day>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Day {
    pub date: Date,
    pub is_current_month: bool,
    pub day_name: String,
    pub shifts: Vec<Shift>,
}

impl MonthlyShiftView {
    pub fn days(&self) -> impl Iterator<Item = &Day> {
        self.weeks.iter().flat_map(|w| &w.days)
    }

    pub fn shifts(&self) -> impl Iterator<Item = &Shift> {
        self.days().flat_map(|d| &d.shifts)
    }
}
