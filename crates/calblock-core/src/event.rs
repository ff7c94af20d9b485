//! Provider-shaped event payload.
//!
//! [`CalendarEventRequest`] is the wire shape submitted to the calendar
//! service to create one event. It serializes with the provider's camelCase
//! field names; unset color and empty recurrence are omitted entirely rather
//! than sent as null.

use serde::{Deserialize, Serialize};

/// A timezone-qualified datetime, as the provider expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    /// Local datetime string, `YYYY-MM-DDTHH:MM:SS`.
    pub date_time: String,
    /// IANA timezone identifier the datetime is anchored to.
    pub time_zone: String,
}

impl EventDateTime {
    /// Creates a new timezone-qualified datetime.
    pub fn new(date_time: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            date_time: date_time.into(),
            time_zone: time_zone.into(),
        }
    }
}

/// The payload for one create-event call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventRequest {
    /// Event title.
    pub summary: String,
    /// Event details; empty string when the block has no description.
    #[serde(default)]
    pub description: String,
    /// Start of the event.
    pub start: EventDateTime,
    /// End of the event.
    pub end: EventDateTime,
    /// Provider-specific color code, if a color applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
    /// Zero or one recurrence rule strings.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recurrence: Vec<String>,
    /// Always `"opaque"`: the event blocks its time slot.
    pub transparency: String,
}
