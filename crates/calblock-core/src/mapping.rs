//! Mapping from validated records to provider payloads.
//!
//! [`map_record`] is a total, deterministic function: every [`BlockRecord`]
//! yields exactly one [`CalendarEventRequest`]. The palette and recurrence
//! tables live in [`MapperConfig`] and are passed in explicitly, so tests can
//! substitute alternate tables without touching shared state.

use std::collections::HashMap;

use crate::event::{CalendarEventRequest, EventDateTime};
use crate::record::{BlockColor, BlockRecord, Recurrence};

/// Timezone applied to event times when none is configured.
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

/// Title given to blocks whose title cell is absent or empty.
pub const DEFAULT_TITLE: &str = "Calendar Block";

/// Configuration for validation defaults and event mapping.
#[derive(Debug, Clone)]
pub struct MapperConfig {
    /// IANA timezone identifier applied to event datetimes.
    pub timezone: String,
    /// Fallback title for untitled blocks.
    pub default_title: String,
    palette: HashMap<BlockColor, String>,
    recurrence_rules: HashMap<Recurrence, String>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        let palette = [
            (BlockColor::Red, "11"),
            (BlockColor::Orange, "17"),
            (BlockColor::Yellow, "5"),
            (BlockColor::Green, "2"),
            (BlockColor::Blue, "1"),
            (BlockColor::Purple, "3"),
            (BlockColor::Gray, "8"),
        ]
        .into_iter()
        .map(|(color, code)| (color, code.to_string()))
        .collect();

        let recurrence_rules = [
            (Recurrence::Daily, "RRULE:FREQ=DAILY"),
            (Recurrence::Weekly, "RRULE:FREQ=WEEKLY"),
            (Recurrence::Monthly, "RRULE:FREQ=MONTHLY"),
        ]
        .into_iter()
        .map(|(recurrence, rule)| (recurrence, rule.to_string()))
        .collect();

        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            default_title: DEFAULT_TITLE.to_string(),
            palette,
            recurrence_rules,
        }
    }
}

impl MapperConfig {
    /// Set the timezone applied to event datetimes.
    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    /// Set the fallback title for untitled blocks.
    #[must_use]
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Override the provider code for one palette color.
    #[must_use]
    pub fn with_color_code(mut self, color: BlockColor, code: impl Into<String>) -> Self {
        self.palette.insert(color, code.into());
        self
    }

    /// Override the rule string for one recurrence frequency.
    #[must_use]
    pub fn with_recurrence_rule(mut self, recurrence: Recurrence, rule: impl Into<String>) -> Self {
        self.recurrence_rules.insert(recurrence, rule.into());
        self
    }

    /// Returns the provider code for a color, or `None` for [`BlockColor::Unset`].
    pub fn color_code(&self, color: BlockColor) -> Option<&str> {
        if color == BlockColor::Unset {
            return None;
        }
        self.palette.get(&color).map(String::as_str)
    }

    /// Returns the rule string for a recurrence, or `None` for [`Recurrence::None`].
    pub fn recurrence_rule(&self, recurrence: Recurrence) -> Option<&str> {
        if recurrence == Recurrence::None {
            return None;
        }
        self.recurrence_rules.get(&recurrence).map(String::as_str)
    }
}

/// Maps a validated block to the provider payload that creates it.
pub fn map_record(record: &BlockRecord, config: &MapperConfig) -> CalendarEventRequest {
    let date = record.date.format("%Y-%m-%d");

    CalendarEventRequest {
        summary: record.title.clone(),
        description: record.description.clone().unwrap_or_default(),
        start: EventDateTime::new(
            format!("{}T{}:00", date, record.start_time),
            config.timezone.clone(),
        ),
        end: EventDateTime::new(
            format!("{}T{}:00", date, record.end_time),
            config.timezone.clone(),
        ),
        color_id: config.color_code(record.color).map(String::from),
        recurrence: config
            .recurrence_rule(record.recurrence)
            .map(String::from)
            .into_iter()
            .collect(),
        transparency: "opaque".to_string(),
    }
}
