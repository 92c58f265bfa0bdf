use std::collections::HashSet;

use chrono::{DateTime, NaiveDateTime};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::entity::{Entity, NoPatch, contains_folded, option_contains_folded};
use crate::domain::types::HistoryEntryId;

/// One line of the back-office activity log.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub timestamp: String,
    pub action: String,
    pub user: Option<String>,
    pub details: Option<String>,
    pub client_ref: Option<String>,
    pub extra: Map<String, Value>,
}

/// Kind of activity, derived from the free-form action label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionCategory {
    Auth,
    Update,
    Create,
    Other,
}

/// Outcome hinted by the action label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionTone {
    Error,
    Success,
    Warning,
    Info,
}

impl HistoryEntry {
    /// Parses [`HistoryEntry::timestamp`]. An explicit offset is dropped; the
    /// wall time it was written in is kept.
    pub fn occurred_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.trim();
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.naive_local());
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
    }

    pub fn category(&self) -> ActionCategory {
        let action = self.action.to_lowercase();
        if action.contains("login") || action.contains("auth") {
            ActionCategory::Auth
        } else if action.contains("update") || action.contains("modify") {
            ActionCategory::Update
        } else if action.contains("create") || action.contains("add") {
            ActionCategory::Create
        } else {
            ActionCategory::Other
        }
    }

    pub fn tone(&self) -> ActionTone {
        let action = self.action.to_lowercase();
        if action.contains("error") || action.contains("failed") {
            ActionTone::Error
        } else if action.contains("success") || action.contains("complete") {
            ActionTone::Success
        } else if action.contains("warning") || action.contains("alert") {
            ActionTone::Warning
        } else {
            ActionTone::Info
        }
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

/// Figures shown above the activity log.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HistoryStats {
    pub total: usize,
    /// Distinct calendar days with at least one entry.
    pub active_days: usize,
    /// Days from the first listed entry to `now`, rounded to the nearest day.
    pub days_tracked: i64,
}

impl HistoryStats {
    /// Entries whose timestamp does not parse are counted in `total` only.
    pub fn from_entries(entries: &[HistoryEntry], now: NaiveDateTime) -> Self {
        let active_days = entries
            .iter()
            .filter_map(HistoryEntry::occurred_at)
            .map(|at| at.date())
            .collect::<HashSet<_>>()
            .len();

        let days_tracked = entries
            .first()
            .and_then(HistoryEntry::occurred_at)
            .map(|first| {
                let elapsed = (now - first).num_seconds();
                (elapsed + SECONDS_PER_DAY / 2).div_euclid(SECONDS_PER_DAY)
            })
            .unwrap_or(0);

        Self {
            total: entries.len(),
            active_days,
            days_tracked,
        }
    }
}

impl Entity for HistoryEntry {
    type Patch = NoPatch;

    fn key(&self) -> &str {
        self.id.as_str()
    }

    fn apply_patch(&mut self, patch: &NoPatch) {
        match *patch {}
    }

    fn matches_search(&self, needle: &str) -> bool {
        contains_folded(&self.action, needle)
            || option_contains_folded(self.user.as_deref(), needle)
            || option_contains_folded(self.details.as_deref(), needle)
            || option_contains_folded(self.client_ref.as_deref(), needle)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Timelike};

    use super::*;

    fn entry(action: &str, timestamp: &str) -> HistoryEntry {
        HistoryEntry {
            id: HistoryEntryId::new("h-1").unwrap(),
            timestamp: timestamp.to_string(),
            action: action.to_string(),
            user: Some("jdoe".to_string()),
            details: None,
            client_ref: Some("C-9".to_string()),
            extra: Map::new(),
        }
    }

    #[test]
    fn parses_naive_and_offset_timestamps() {
        let naive = entry("login", "2024-03-05T14:30:00").occurred_at().unwrap();
        assert_eq!(naive.date(), NaiveDate::from_ymd_opt(2024, 3, 5).unwrap());
        assert_eq!(naive.hour(), 14);

        let offset = entry("login", "2024-03-05T14:30:00.250+02:00")
            .occurred_at()
            .unwrap();
        assert_eq!(offset.minute(), 30);

        assert!(entry("login", "yesterday").occurred_at().is_none());
    }

    #[test]
    fn classifies_actions() {
        assert_eq!(entry("User LOGIN", "").category(), ActionCategory::Auth);
        assert_eq!(entry("modify client", "").category(), ActionCategory::Update);
        assert_eq!(entry("Added note", "").category(), ActionCategory::Create);
        assert_eq!(entry("export", "").category(), ActionCategory::Other);

        assert_eq!(entry("sync failed", "").tone(), ActionTone::Error);
        assert_eq!(entry("import complete", "").tone(), ActionTone::Success);
        assert_eq!(entry("alert raised", "").tone(), ActionTone::Warning);
        assert_eq!(entry("export", "").tone(), ActionTone::Info);
    }

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn stats_count_distinct_days_and_age_of_first_entry() {
        let entries = [
            entry("login", "2024-05-01T09:00:00"),
            entry("update client", "2024-05-01T17:45:00"),
            entry("export", "2024-05-03T08:00:00+02:00"),
            entry("export", "not a date"),
        ];

        let stats = HistoryStats::from_entries(&entries, at("2024-05-11T21:00:00"));

        assert_eq!(stats.total, 4);
        assert_eq!(stats.active_days, 2);
        assert_eq!(stats.days_tracked, 11);
    }

    #[test]
    fn days_tracked_rounds_to_the_nearest_day() {
        let entries = [entry("login", "2024-05-01T09:00:00")];

        let short = HistoryStats::from_entries(&entries, at("2024-05-02T20:59:59"));
        let long = HistoryStats::from_entries(&entries, at("2024-05-02T21:00:00"));

        assert_eq!(short.days_tracked, 1);
        assert_eq!(long.days_tracked, 2);
    }

    #[test]
    fn stats_of_empty_or_undated_log_are_zero() {
        let now = at("2024-05-11T21:00:00");

        assert_eq!(HistoryStats::from_entries(&[], now), HistoryStats::default());

        let undated = HistoryStats::from_entries(&[entry("export", "soon")], now);
        assert_eq!(undated.total, 1);
        assert_eq!(undated.active_days, 0);
        assert_eq!(undated.days_tracked, 0);
    }

    #[test]
    fn search_covers_optional_columns() {
        let e = entry("export", "");

        assert!(e.matches_search("jdoe"));
        assert!(e.matches_search("c-9"));
        assert!(!e.matches_search("nobody"));
    }
}
