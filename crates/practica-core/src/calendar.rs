//! Monthly calendar grid.
//!
//! Weeks start on Monday. The grid runs from the Monday on or before the first
//! of the month to the Sunday on or after its last day, so every week has
//! exactly seven days and leading/trailing days from adjacent months are
//! flagged with `is_current_month = false`.

use std::collections::BTreeMap;

use jiff::ToSpan;
use jiff::civil::{Date, Weekday};

use crate::models::calendar::{CalendarMonth, Day, MonthlyShiftView, Week};
use crate::models::shift::Shift;

/// Build the week/day grid for `month` and attach each shift to the day whose
/// date matches exactly. Shifts dated outside the grid are ignored.
pub fn build_monthly_view(month: CalendarMonth, shifts: &[Shift]) -> MonthlyShiftView {
    let grid_start = month.grid_start();
    let grid_end = month.grid_end();

    let mut by_date: BTreeMap<Date, Vec<Shift>> = BTreeMap::new();
    for shift in shifts {
        if shift.date >= grid_start && shift.date <= grid_end {
            by_date.entry(shift.date).or_default().push(shift.clone());
        }
    }
    for day_shifts in by_date.values_mut() {
        day_shifts.sort_by(|a, b| {
            (a.first_start(), &a.professional_name, a.created_at).cmp(&(
                b.first_start(),
                &b.professional_name,
                b.created_at,
            ))
        });
    }

    let days: Vec<Day> = grid_start
        .series(1.day())
        .take_while(|date| *date <= grid_end)
        .map(|date| Day {
            date,
            is_current_month: month.contains(date),
            day_name: day_name(date.weekday()).to_string(),
            shifts: by_date.remove(&date).unwrap_or_default(),
        })
        .collect();

    let weeks = days
        .chunks(7)
        .filter_map(|chunk| {
            let first = chunk.first()?;
            let last = chunk.last()?;
            Some(Week {
                week_number: first.date.iso_week_date().week(),
                start_date: first.date,
                end_date: last.date,
                days: chunk.to_vec(),
            })
        })
        .collect();

    MonthlyShiftView {
        year: month.year(),
        month: month.month_index(),
        weeks,
    }
}

/// The Monday on or before `date`, or `None` past the start of the
/// supported date range.
pub fn start_of_week(date: Date) -> Option<Date> {
    let offset = i64::from(date.weekday().to_monday_zero_offset());
    date.checked_sub(offset.days()).ok()
}

/// The Sunday on or after `date`, or `None` past the end of the supported
/// date range.
pub fn end_of_week(date: Date) -> Option<Date> {
    let offset = 6 - i64::from(date.weekday().to_monday_zero_offset());
    date.checked_add(offset.days()).ok()
}

/// Spanish weekday name as shown in the calendar header.
pub fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Lunes",
        Weekday::Tuesday => "Martes",
        Weekday::Wednesday => "Miércoles",
        Weekday::Thursday => "Jueves",
        Weekday::Friday => "Viernes",
        Weekday::Saturday => "Sábado",
        Weekday::Sunday => "Domingo",
    }
}
