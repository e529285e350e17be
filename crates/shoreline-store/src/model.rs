//! Roster and event records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EVENT_TITLE: &str = "Beach Cleanup";
pub const DEFAULT_EVENT_LOCATION: &str = "Local Beach";

/// Date format used by event forms and the persisted blob.
pub const FORM_DATE_FORMAT: &str = "%Y-%m-%d";

/// A person on the crew roster. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

/// A scheduled cleanup. Events are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEvent {
    pub id: String,
    pub title: String,
    pub location: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub attendees: u32,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Event-creation input. Every field is optional; missing ones get defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub attendees: Option<u32>,
    pub description: Option<String>,
}

impl EventDraft {
    /// Build a draft from submitted form fields.
    ///
    /// Unknown field names are ignored. A date or attendee count that does
    /// not parse is treated as missing.
    pub fn from_form<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut draft = Self::default();
        for (name, value) in fields {
            let value = value.trim();
            match name {
                "title" => draft.title = Some(value.to_string()),
                "location" => draft.location = Some(value.to_string()),
                "date" => draft.date = NaiveDate::parse_from_str(value, FORM_DATE_FORMAT).ok(),
                "time" => draft.time = Some(value.to_string()),
                "attendees" => draft.attendees = value.parse().ok(),
                "description" => draft.description = Some(value.to_string()),
                other => tracing::debug!(field = other, "Ignoring unknown event form field"),
            }
        }
        draft
    }

    /// Apply field defaults and stamp identity.
    pub(crate) fn into_event(self, id: String, created_at: DateTime<Utc>) -> CleanupEvent {
        CleanupEvent {
            id,
            title: non_blank(self.title).unwrap_or_else(|| DEFAULT_EVENT_TITLE.to_string()),
            location: non_blank(self.location)
                .unwrap_or_else(|| DEFAULT_EVENT_LOCATION.to_string()),
            date: self.date,
            time: self.time.unwrap_or_default(),
            attendees: self.attendees.unwrap_or(0),
            description: self.description.unwrap_or_default(),
            created_at,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// The session's authoritative model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub crew: Vec<CrewMember>,
    pub events: Vec<CleanupEvent>,
    /// Reserved for beach selection; nothing reads or persists it yet.
    pub selected_beach: Option<String>,
}

impl AppState {
    pub fn is_empty(&self) -> bool {
        self.crew.is_empty() && self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;

    fn stamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-16T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_empty_draft_gets_defaults() {
        let event = EventDraft::default().into_event("e1".into(), stamp());
        assert_eq!(event.title, "Beach Cleanup");
        assert_eq!(event.location, "Local Beach");
        assert_eq!(event.attendees, 0);
        assert_eq!(event.time, "");
        assert_eq!(event.description, "");
        assert_eq!(event.date, None);
        assert_eq!(event.created_at, stamp());
    }

    #[test]
    fn test_blank_title_replaced_by_default() {
        let draft = EventDraft {
            title: Some("   ".into()),
            location: Some("".into()),
            ..Default::default()
        };
        let event = draft.into_event("e1".into(), stamp());
        assert_eq!(event.title, DEFAULT_EVENT_TITLE);
        assert_eq!(event.location, DEFAULT_EVENT_LOCATION);
    }

    #[test]
    fn test_from_form_parses_typed_fields() {
        let draft = EventDraft::from_form([
            ("title", " Sunrise Sweep "),
            ("date", "2026-11-01"),
            ("time", "07:30"),
            ("attendees", "12"),
            ("colour", "blue"),
        ]);
        assert_eq!(draft.title.as_deref(), Some("Sunrise Sweep"));
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2026, 11, 1));
        assert_eq!(draft.time.as_deref(), Some("07:30"));
        assert_eq!(draft.attendees, Some(12));
        assert_eq!(draft.location, None);
    }

    #[test]
    fn test_from_form_unparseable_values_are_missing() {
        let draft = EventDraft::from_form([("date", "next friday"), ("attendees", "-3")]);
        assert_eq!(draft.date, None);
        assert_eq!(draft.attendees, None);
    }

    #[test]
    fn test_event_serializes_camel_case() {
        let event = EventDraft::default().into_event("e1".into(), stamp());
        let json = serde_json::to_value(&event).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
