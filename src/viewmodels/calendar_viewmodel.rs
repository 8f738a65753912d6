// ============================================================================
// CALENDAR VIEWMODEL - month grid and sorted event list
// ============================================================================

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};

use crate::models::event::sort_events;
use crate::models::FestivalEvent;
use crate::state::CalendarCursor;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCell {
    Blank,
    Day { day: u32, has_event: bool, is_today: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub title: String,
    pub cells: Vec<DayCell>,
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(30)
}

/// Leading blanks for the weekday of the 1st (Sunday first), then one cell
/// per day.
pub fn month_grid(
    cursor: &CalendarCursor,
    events: &[FestivalEvent],
    today: NaiveDate,
) -> MonthGrid {
    let title = format!(
        "{} {}",
        MONTH_NAMES[(cursor.month.clamp(1, 12) - 1) as usize],
        cursor.year
    );
    let Some(first) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, 1) else {
        return MonthGrid {
            title,
            cells: Vec::new(),
        };
    };

    let event_days: BTreeSet<u32> = events
        .iter()
        .filter_map(|e| e.parsed_date())
        .filter(|d| d.year() == cursor.year && d.month() == cursor.month)
        .map(|d| d.day())
        .collect();

    let leading = first.weekday().num_days_from_sunday() as usize;
    let mut cells = vec![DayCell::Blank; leading];
    cells.extend((1..=days_in_month(cursor.year, cursor.month)).map(|day| DayCell::Day {
        day,
        has_event: event_days.contains(&day),
        is_today: today.year() == cursor.year
            && today.month() == cursor.month
            && today.day() == day,
    }));

    MonthGrid { title, cells }
}

/// All events, date ascending.
pub fn event_list(events: &[FestivalEvent]) -> Vec<FestivalEvent> {
    sort_events(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, date: &str) -> FestivalEvent {
        FestivalEvent {
            id,
            name: format!("Festival {id}"),
            date: date.to_string(),
            description: String::new(),
        }
    }

    fn cursor(year: i32, month: u32) -> CalendarCursor {
        CalendarCursor {
            year,
            month,
            selected_event: None,
        }
    }

    #[test]
    fn february_2025_starts_on_saturday() {
        let today = NaiveDate::from_ymd_opt(2025, 2, 10).unwrap();
        let grid = month_grid(&cursor(2025, 2), &[], today);
        assert_eq!(grid.title, "February 2025");
        let blanks = grid.cells.iter().filter(|c| **c == DayCell::Blank).count();
        assert_eq!(blanks, 6);
        assert_eq!(grid.cells.len(), 6 + 28);
        assert_eq!(
            grid.cells[6 + 9],
            DayCell::Day {
                day: 10,
                has_event: false,
                is_today: true
            }
        );
    }

    #[test]
    fn events_mark_only_their_month() {
        let events = vec![
            event(1, "February 28, 2025 (Losar)"),
            event(2, "2025-03-28"),
            event(3, "2024-02-14"),
            event(4, "sometime in spring"),
        ];
        let today = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let grid = month_grid(&cursor(2025, 2), &events, today);
        let marked: Vec<u32> = grid
            .cells
            .iter()
            .filter_map(|c| match c {
                DayCell::Day { day, has_event: true, .. } => Some(*day),
                _ => None,
            })
            .collect();
        assert_eq!(marked, vec![28]);
    }

    #[test]
    fn leap_year_february() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn event_list_sorts_by_date() {
        let events = vec![
            event(1, "2025-03-28"),
            event(2, "unknown"),
            event(3, "February 28, 2025"),
        ];
        let ids: Vec<i64> = event_list(&events).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
