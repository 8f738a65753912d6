// ============================================================================
// UI STATE - small per-view state machines
// ============================================================================

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate};

use crate::models::FaqCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogTab {
    #[default]
    Monastery,
    Archive,
    Services,
}

impl CatalogTab {
    pub const ALL: [CatalogTab; 3] = [
        CatalogTab::Monastery,
        CatalogTab::Archive,
        CatalogTab::Services,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CatalogTab::Monastery => "Monastery",
            CatalogTab::Archive => "Archive",
            CatalogTab::Services => "Services",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub tab: CatalogTab,
    pub search: String,
}

/// Month shown by the festival calendar. `month` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    pub year: i32,
    pub month: u32,
    pub selected_event: Option<i64>,
}

impl CalendarCursor {
    pub fn at(today: NaiveDate) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            selected_event: None,
        }
    }

    pub fn previous_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn reset_to(&mut self, today: NaiveDate) {
        self.year = today.year();
        self.month = today.month();
    }
}

/// FAQ search text, category filter (`None` = all) and expanded items.
#[derive(Debug, Clone, Default)]
pub struct FaqFilter {
    pub search: String,
    pub category: Option<FaqCategory>,
    pub expanded: HashSet<u32>,
}

impl FaqFilter {
    pub fn toggle(&mut self, id: u32) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: u32) -> bool {
        self.expanded.contains(&id)
    }
}

/// What the player should do when a track finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackEnd {
    Replay,
    Advance(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistState {
    pub current: usize,
    pub track_count: usize,
    pub playing: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub muted: bool,
    /// 0..=100
    pub volume: u32,
}

impl PlaylistState {
    pub fn new(track_count: usize) -> Self {
        Self {
            current: 0,
            track_count,
            playing: false,
            shuffle: false,
            repeat: false,
            muted: false,
            volume: 70,
        }
    }

    /// `random` in `[0, 1)`, used only when shuffling.
    pub fn next(&mut self, random: f64) -> usize {
        if self.track_count == 0 {
            return 0;
        }
        self.current = if self.shuffle {
            ((random.clamp(0.0, 1.0) * self.track_count as f64) as usize).min(self.track_count - 1)
        } else if self.current + 1 < self.track_count {
            self.current + 1
        } else {
            0
        };
        self.current
    }

    pub fn previous(&mut self) -> usize {
        if self.track_count == 0 {
            return 0;
        }
        self.current = if self.current > 0 {
            self.current - 1
        } else {
            self.track_count - 1
        };
        self.current
    }

    pub fn on_track_end(&mut self, random: f64) -> TrackEnd {
        if self.repeat {
            TrackEnd::Replay
        } else {
            TrackEnd::Advance(self.next(random))
        }
    }

    pub fn select(&mut self, index: usize) {
        if index < self.track_count {
            self.current = index;
        }
    }

    /// Effective output volume in `[0, 1]`.
    pub fn output_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            f64::from(self.volume.min(100)) / 100.0
        }
    }
}

/// `m:ss`
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let total = seconds.floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}

/// Labels and slider bounds for the playback progress row. The slider
/// counts whole seconds and stays at 0 until the duration is known.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressDisplay {
    pub elapsed: String,
    pub duration: String,
    pub value: u64,
    pub max: u64,
}

impl ProgressDisplay {
    pub fn new(elapsed: f64, duration: f64) -> Self {
        let max = if duration.is_finite() && duration > 0.0 {
            duration.floor()
        } else {
            0.0
        };
        let value = if elapsed.is_finite() && elapsed > 0.0 {
            elapsed.floor().min(max)
        } else {
            0.0
        };
        Self {
            elapsed: format_time(elapsed),
            duration: format_time(max),
            value: value as u64,
            max: max as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_navigation_wraps_year() {
        let mut cursor = CalendarCursor::at(NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        cursor.previous_month();
        assert_eq!((cursor.year, cursor.month), (2024, 12));
        cursor.next_month();
        cursor.next_month();
        assert_eq!((cursor.year, cursor.month), (2025, 2));
        cursor.reset_to(NaiveDate::from_ymd_opt(2026, 10, 15).unwrap());
        assert_eq!((cursor.year, cursor.month), (2026, 10));
    }

    #[test]
    fn faq_toggle_expands_and_collapses() {
        let mut filter = FaqFilter::default();
        filter.toggle(3);
        assert!(filter.is_expanded(3));
        filter.toggle(3);
        assert!(!filter.is_expanded(3));
    }

    #[test]
    fn progress_before_metadata_is_zeroed() {
        let p = ProgressDisplay::new(3.7, f64::NAN);
        assert_eq!(p.elapsed, "0:03");
        assert_eq!(p.duration, "0:00");
        assert_eq!((p.value, p.max), (0, 0));
    }

    #[test]
    fn progress_value_stays_within_slider() {
        let p = ProgressDisplay::new(185.2, 184.9);
        assert_eq!(p.duration, "3:04");
        assert_eq!((p.value, p.max), (184, 184));
        assert_eq!(ProgressDisplay::new(61.0, 240.0).value, 61);
    }

    #[test]
    fn playlist_wraps_both_ways() {
        let mut list = PlaylistState::new(5);
        assert_eq!(list.previous(), 4);
        assert_eq!(list.next(0.0), 0);
        list.select(3);
        list.next(0.0);
        assert_eq!(list.next(0.0), 0);
    }

    #[test]
    fn shuffle_uses_random_index() {
        let mut list = PlaylistState::new(5);
        list.shuffle = true;
        assert_eq!(list.next(0.99), 4);
        assert_eq!(list.next(0.2), 1);
        assert_eq!(list.next(1.0), 4);
    }

    #[test]
    fn repeat_replays_on_end() {
        let mut list = PlaylistState::new(3);
        list.select(2);
        list.repeat = true;
        assert_eq!(list.on_track_end(0.5), TrackEnd::Replay);
        list.repeat = false;
        assert_eq!(list.on_track_end(0.5), TrackEnd::Advance(0));
    }

    #[test]
    fn time_formats_as_minutes_seconds() {
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(765.9), "12:45");
        assert_eq!(format_time(f64::NAN), "0:00");
    }

    #[test]
    fn muted_output_is_silent() {
        let mut list = PlaylistState::new(1);
        assert_eq!(list.output_volume(), 0.7);
        list.muted = true;
        assert_eq!(list.output_volume(), 0.0);
    }
}
