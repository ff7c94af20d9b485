//! Row validation.
//!
//! [`validate_row`] turns a [`RawRow`] into a normalized [`BlockRecord`] or
//! rejects it with a specific [`ValidationError`]. A failed validation never
//! raises past this boundary: callers receive the variant, log it with the
//! row number, and drop the row.

use chrono::NaiveDate;
use thiserror::Error;

use crate::mapping::MapperConfig;
use crate::record::{BlockColor, BlockRecord, RawRow, Recurrence};

/// Date formats accepted by the permissive date parser, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// Why a row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required cell is absent or empty.
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    /// The date cell could not be parsed by any accepted format.
    #[error("unparseable date `{0}`")]
    DateFormat(String),

    /// A time cell is malformed or out of range.
    #[error("invalid time `{0}` (expected HH:MM, hour 0-23, minute 0-59)")]
    TimeFormat(String),

    /// The block ends before it starts.
    #[error("start time {start} is not before end time {end}")]
    TimeOrder { start: String, end: String },
}

/// Validates one raw row into a normalized block record.
///
/// The title defaults to `config.default_title` when absent or empty; color
/// and recurrence keywords fold case-insensitively into their closed enums,
/// with unrecognized values treated as unset.
pub fn validate_row(row: &RawRow, config: &MapperConfig) -> Result<BlockRecord, ValidationError> {
    let date_text =
        non_empty(row.date.as_deref()).ok_or(ValidationError::MissingField("date"))?;
    let start_text =
        non_empty(row.start_time.as_deref()).ok_or(ValidationError::MissingField("start time"))?;
    let end_text =
        non_empty(row.end_time.as_deref()).ok_or(ValidationError::MissingField("end time"))?;

    let title = non_empty(row.title.as_deref())
        .map(str::to_string)
        .unwrap_or_else(|| config.default_title.clone());

    let date = parse_date(date_text)?;
    let start_time = parse_time(start_text)?;
    let end_time = parse_time(end_text)?;

    // Both sides are zero-padded HH:MM, so lexicographic order is time order.
    if start_time >= end_time {
        return Err(ValidationError::TimeOrder {
            start: start_time,
            end: end_time,
        });
    }

    Ok(BlockRecord {
        date,
        start_time,
        end_time,
        title,
        description: non_empty(row.description.as_deref()).map(str::to_string),
        recurrence: Recurrence::parse(row.recurring.as_deref().unwrap_or("")),
        color: BlockColor::parse(row.color.as_deref().unwrap_or("")),
    })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| ValidationError::DateFormat(text.to_string()))
}

/// Parses `H:M` into zero-padded `HH:MM`, range-checking both parts.
fn parse_time(text: &str) -> Result<String, ValidationError> {
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return Err(ValidationError::TimeFormat(text.to_string()));
    }

    let hour: u32 = parts[0]
        .trim()
        .parse()
        .map_err(|_| ValidationError::TimeFormat(text.to_string()))?;
    let minute: u32 = parts[1]
        .trim()
        .parse()
        .map_err(|_| ValidationError::TimeFormat(text.to_string()))?;

    if hour > 23 || minute > 59 {
        return Err(ValidationError::TimeFormat(text.to_string()));
    }

    Ok(format!("{:02}:{:02}", hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: &str, start: &str, end: &str, title: &str) -> RawRow {
        let mut row = RawRow::new(2);
        row.set_field("date", date.into());
        row.set_field("start time", start.into());
        row.set_field("end time", end.into());
        if !title.is_empty() {
            row.set_field("title", title.into());
        }
        row
    }

    #[test]
    fn valid_row_is_normalized() {
        let record = validate_row(
            &row("2025-03-10", "9:5", "10:00", "Focus"),
            &MapperConfig::default(),
        )
        .unwrap();

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
        assert_eq!(record.start_time, "09:05");
        assert_eq!(record.end_time, "10:00");
        assert_eq!(record.title, "Focus");
    }

    #[test]
    fn slash_date_format_is_accepted() {
        let record = validate_row(
            &row("03/10/2025", "9:00", "10:00", "Focus"),
            &MapperConfig::default(),
        )
        .unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap());
    }

    #[test]
    fn unparseable_date_is_rejected() {
        let err = validate_row(
            &row("next tuesday", "9:00", "10:00", "Focus"),
            &MapperConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::DateFormat("next tuesday".into()));
    }

    #[test]
    fn missing_fields_are_named() {
        let mut no_date = row("", "9:00", "10:00", "Focus");
        no_date.date = None;
        assert_eq!(
            validate_row(&no_date, &MapperConfig::default()).unwrap_err(),
            ValidationError::MissingField("date")
        );

        let blank_start = row("2025-03-10", "  ", "10:00", "Focus");
        assert_eq!(
            validate_row(&blank_start, &MapperConfig::default()).unwrap_err(),
            ValidationError::MissingField("start time")
        );
    }

    #[test]
    fn missing_title_gets_default() {
        let record = validate_row(
            &row("2025-03-10", "9:00", "10:00", ""),
            &MapperConfig::default(),
        )
        .unwrap();
        assert_eq!(record.title, "Calendar Block");

        let config = MapperConfig::default().with_default_title("Busy");
        let record = validate_row(&row("2025-03-10", "9:00", "10:00", ""), &config).unwrap();
        assert_eq!(record.title, "Busy");
    }

    #[test]
    fn malformed_times_are_rejected() {
        for bad in ["9", "9:00:00", "9:xx", "25:00", "9:60"] {
            let err = validate_row(
                &row("2025-03-10", bad, "23:59", "Focus"),
                &MapperConfig::default(),
            )
            .unwrap_err();
            assert_eq!(err, ValidationError::TimeFormat(bad.into()), "input {bad:?}");
        }
    }

    #[test]
    fn start_must_be_before_end() {
        let err = validate_row(
            &row("2025-03-10", "10:00", "09:00", "Bad"),
            &MapperConfig::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TimeOrder {
                start: "10:00".into(),
                end: "09:00".into()
            }
        );

        // Equal times are also rejected.
        let err = validate_row(
            &row("2025-03-10", "10:00", "10:00", "Bad"),
            &MapperConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::TimeOrder { .. }));
    }

    #[test]
    fn keywords_fold_into_enums() {
        let mut full = row("2025-03-10", "9:00", "10:00", "Focus");
        full.set_field("recurring", "Weekly".into());
        full.set_field("color", "Blue".into());

        let record = validate_row(&full, &MapperConfig::default()).unwrap();
        assert_eq!(record.recurrence, Recurrence::Weekly);
        assert_eq!(record.color, BlockColor::Blue);

        let mut odd = row("2025-03-10", "9:00", "10:00", "Focus");
        odd.set_field("recurring", "sometimes".into());
        odd.set_field("color", "mauve".into());

        let record = validate_row(&odd, &MapperConfig::default()).unwrap();
        assert_eq!(record.recurrence, Recurrence::None);
        assert_eq!(record.color, BlockColor::Unset);
    }
}
