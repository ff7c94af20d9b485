//! Row and record types for the blocking schedule.
//!
//! This module provides the two data shapes the pipeline moves through:
//! - [`RawRow`]: one header-keyed data row as decoded from the schedule,
//!   before validation
//! - [`BlockRecord`]: a validated, normalized time block ready for mapping
//!
//! plus the closed [`Recurrence`] and [`BlockColor`] enumerations. Free-form
//! keyword cells are folded into these enums during validation so downstream
//! stages never see arbitrary passthrough strings.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One schedule row after header-keyed decoding, pre-validation.
///
/// Known columns land in typed optional fields; anything else is kept in
/// [`extra`](Self::extra) so downstream stages never guess at key presence.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    /// 1-based row number in the source file, for diagnostics.
    pub row_number: usize,
    /// The `date` cell, as text.
    pub date: Option<String>,
    /// The `start time` cell, as text.
    pub start_time: Option<String>,
    /// The `end time` cell, as text.
    pub end_time: Option<String>,
    /// The `title` cell, as text.
    pub title: Option<String>,
    /// The optional `description` cell.
    pub description: Option<String>,
    /// The optional `recurring` keyword cell.
    pub recurring: Option<String>,
    /// The optional `color` keyword cell.
    pub color: Option<String>,
    /// Unrecognized columns, keyed by canonical (lowercased) header name.
    pub extra: BTreeMap<String, String>,
}

impl RawRow {
    /// Creates an empty row tagged with its source row number.
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            ..Self::default()
        }
    }

    /// Stores a cell value under its canonical column name.
    pub fn set_field(&mut self, column: &str, value: String) {
        match column {
            "date" => self.date = Some(value),
            "start time" => self.start_time = Some(value),
            "end time" => self.end_time = Some(value),
            "title" => self.title = Some(value),
            "description" => self.description = Some(value),
            "recurring" => self.recurring = Some(value),
            "color" => self.color = Some(value),
            other => {
                self.extra.insert(other.to_string(), value);
            }
        }
    }
}

/// How often a block repeats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recurrence {
    Daily,
    Weekly,
    Monthly,
    /// A one-off block.
    #[default]
    None,
}

impl Recurrence {
    /// Parses a recurrence keyword, case-insensitively.
    ///
    /// Empty or unrecognized keywords fold to [`Recurrence::None`].
    pub fn parse(keyword: &str) -> Self {
        match keyword.trim().to_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "monthly" => Self::Monthly,
            _ => Self::None,
        }
    }

    /// Returns the canonical keyword for this recurrence.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::None => "none",
        }
    }
}

/// The closed palette of block colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockColor {
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Gray,
    /// No color applied; the provider default is used.
    #[default]
    Unset,
}

impl BlockColor {
    /// Parses a color name, case-insensitively.
    ///
    /// `none`, empty, or unrecognized names fold to [`BlockColor::Unset`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "red" => Self::Red,
            "orange" => Self::Orange,
            "yellow" => Self::Yellow,
            "green" => Self::Green,
            "blue" => Self::Blue,
            "purple" => Self::Purple,
            "gray" => Self::Gray,
            _ => Self::Unset,
        }
    }

    /// Returns the canonical name for this color.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Gray => "gray",
            Self::Unset => "none",
        }
    }
}

/// A validated, normalized time block.
///
/// Invariants held by construction (see the validator):
/// - `start_time` and `end_time` are zero-padded `HH:MM` strings and
///   `start_time < end_time`
/// - `title` is never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    /// The calendar date of the block.
    pub date: NaiveDate,
    /// Start of the block, zero-padded `HH:MM`.
    pub start_time: String,
    /// End of the block, zero-padded `HH:MM`.
    pub end_time: String,
    /// The block title.
    pub title: String,
    /// Optional details about the block.
    pub description: Option<String>,
    /// How often the block repeats.
    pub recurrence: Recurrence,
    /// The block color.
    pub color: BlockColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_routes_known_columns() {
        let mut row = RawRow::new(3);
        row.set_field("date", "2025-03-10".into());
        row.set_field("start time", "9:00".into());
        row.set_field("title", "Focus".into());

        assert_eq!(row.row_number, 3);
        assert_eq!(row.date.as_deref(), Some("2025-03-10"));
        assert_eq!(row.start_time.as_deref(), Some("9:00"));
        assert_eq!(row.title.as_deref(), Some("Focus"));
        assert!(row.extra.is_empty());
    }

    #[test]
    fn set_field_keeps_unknown_columns() {
        let mut row = RawRow::new(1);
        row.set_field("owner", "alex".into());
        assert_eq!(row.extra.get("owner").map(String::as_str), Some("alex"));
    }

    #[test]
    fn recurrence_parse_is_case_insensitive() {
        assert_eq!(Recurrence::parse("Weekly"), Recurrence::Weekly);
        assert_eq!(Recurrence::parse("DAILY"), Recurrence::Daily);
        assert_eq!(Recurrence::parse(" monthly "), Recurrence::Monthly);
    }

    #[test]
    fn recurrence_parse_folds_unknown_to_none() {
        assert_eq!(Recurrence::parse(""), Recurrence::None);
        assert_eq!(Recurrence::parse("none"), Recurrence::None);
        assert_eq!(Recurrence::parse("fortnightly"), Recurrence::None);
    }

    #[test]
    fn color_parse_is_case_insensitive() {
        assert_eq!(BlockColor::parse("Blue"), BlockColor::Blue);
        assert_eq!(BlockColor::parse("GRAY"), BlockColor::Gray);
    }

    #[test]
    fn color_parse_folds_unknown_to_unset() {
        assert_eq!(BlockColor::parse("none"), BlockColor::Unset);
        assert_eq!(BlockColor::parse(""), BlockColor::Unset);
        assert_eq!(BlockColor::parse("chartreuse"), BlockColor::Unset);
    }
}
