use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Festival record from `/data/events.json`.
#[derive(Clone, PartialEq, Serialize, Deserialize, Debug)]
pub struct FestivalEvent {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(rename = "l_desc", default)]
    pub description: String,
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%m/%d/%Y",
];

impl FestivalEvent {
    /// Date text without the trailing parenthetical, e.g. "(Losar)".
    pub fn display_date(&self) -> &str {
        match self.date.split_once('(') {
            Some((head, _)) => head.trim(),
            None => self.date.trim(),
        }
    }

    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_event_date(self.display_date())
    }

    pub fn image_url(&self) -> String {
        format!("/data/events/{}.png", self.id)
    }
}

pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Events ordered by date; unparseable dates go last in input order.
pub fn sort_events(events: &[FestivalEvent]) -> Vec<FestivalEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| match e.parsed_date() {
        Some(d) => (0, Some(d)),
        None => (1, None),
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, date: &str) -> FestivalEvent {
        FestivalEvent {
            id,
            name: format!("Event {id}"),
            date: date.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn strips_parenthetical() {
        let e = event(1, "February 28, 2025 (Losar)");
        assert_eq!(e.display_date(), "February 28, 2025");
        assert_eq!(e.parsed_date(), NaiveDate::from_ymd_opt(2025, 2, 28));
    }

    #[test]
    fn parses_iso_and_short_month() {
        assert_eq!(parse_event_date("2025-06-11"), NaiveDate::from_ymd_opt(2025, 6, 11));
        assert_eq!(parse_event_date("Dec 3, 2025"), NaiveDate::from_ymd_opt(2025, 12, 3));
        assert_eq!(parse_event_date("sometime in spring"), None);
    }

    #[test]
    fn unparseable_events_sort_last_and_stable() {
        let events = vec![
            event(1, "TBA"),
            event(2, "2025-09-01"),
            event(3, "unknown"),
            event(4, "2025-01-15"),
        ];
        let ids: Vec<i64> = sort_events(&events).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![4, 2, 1, 3]);
    }
}
