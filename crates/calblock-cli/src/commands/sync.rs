//! The sync command: ingest, validate, map, submit, aggregate.
//!
//! Control flow is strictly linear and single-pass. Row-level failures are
//! absorbed at their stage (logged, counted, dropped); only schema,
//! configuration, and authentication failures abort the run.

use chrono::NaiveDate;
use tracing::{info, warn};

use calblock_core::{
    map_record, parse_schedule, validate_row, BlockRecord, CalendarEventRequest, MapperConfig,
    RawRow,
};
use calblock_providers::{
    submit_all, GoogleConfig, GoogleProvider, SyncOutcome, SyncReport, SyncResult,
};

use crate::cli::SyncArgs;
use crate::config::ClientConfig;
use crate::error::{CliError, CliResult};

/// What one run did, for reporting and the exit decision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Events the provider confirmed.
    pub created: usize,
    /// Submissions the provider rejected or failed.
    pub failed: usize,
    /// Rows dropped during validation.
    pub skipped: usize,
    /// Valid records excluded by the date-range filter.
    pub filtered: usize,
    /// Whether submission was skipped entirely.
    pub dry_run: bool,
}

impl RunSummary {
    /// A clean run created everything it read: no drops, no failures.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

/// Runs the sync pipeline for one schedule file.
pub async fn run(args: &SyncArgs, config: &ClientConfig) -> CliResult<RunSummary> {
    let mapper = mapper_config(args, config);

    let rows = parse_schedule(&args.file)?;
    let (records, skipped) = validate_rows(&rows, &mapper);
    let (records, filtered) = apply_range(records, args.from, args.to);
    let requests: Vec<CalendarEventRequest> =
        records.iter().map(|r| map_record(r, &mapper)).collect();

    if args.dry_run {
        print_dry_run(&requests);
        let summary = RunSummary {
            skipped,
            filtered,
            dry_run: true,
            ..RunSummary::default()
        };
        print_summary(&summary);
        return Ok(summary);
    }

    if requests.is_empty() {
        warn!("no blocks to sync");
        let summary = RunSummary {
            skipped,
            filtered,
            ..RunSummary::default()
        };
        print_summary(&summary);
        return Ok(summary);
    }

    info!("attempting to create {} calendar events", requests.len());

    let provider = connect_provider(args, config).await?;
    let results = submit_all(&provider, &requests).await;
    let report = SyncReport::from_results(&results);

    print_failures(&results);
    let summary = RunSummary {
        created: report.created,
        failed: report.failed,
        skipped,
        filtered,
        dry_run: false,
    };
    print_summary(&summary);
    Ok(summary)
}

fn mapper_config(args: &SyncArgs, config: &ClientConfig) -> MapperConfig {
    MapperConfig::default()
        .with_timezone(
            args.timezone
                .clone()
                .unwrap_or_else(|| config.sync.timezone.clone()),
        )
        .with_default_title(config.sync.default_title.clone())
}

/// Validates each row, dropping and counting the ones that fail.
fn validate_rows(rows: &[RawRow], mapper: &MapperConfig) -> (Vec<BlockRecord>, usize) {
    let mut records = Vec::new();
    let mut skipped = 0;

    for row in rows {
        match validate_row(row, mapper) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("row {}: {}", row.row_number, e);
                skipped += 1;
            }
        }
    }

    (records, skipped)
}

/// Keeps records inside the inclusive `[from, to]` date range.
fn apply_range(
    records: Vec<BlockRecord>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> (Vec<BlockRecord>, usize) {
    let before = records.len();
    let records: Vec<BlockRecord> = records
        .into_iter()
        .filter(|record| {
            from.is_none_or(|d| record.date >= d) && to.is_none_or(|d| record.date <= d)
        })
        .collect();
    let filtered = before - records.len();
    (records, filtered)
}

async fn connect_provider(args: &SyncArgs, config: &ClientConfig) -> CliResult<GoogleProvider> {
    let credentials = args
        .credentials
        .clone()
        .or_else(|| config.google.credentials_path.clone())
        .ok_or_else(|| {
            CliError::Config(
                "no credentials path configured; pass --credentials or set google.credentials_path"
                    .to_string(),
            )
        })?;

    let calendar_id = args
        .calendar_id
        .clone()
        .unwrap_or_else(|| config.google.calendar_id.clone());

    let provider =
        GoogleProvider::new(GoogleConfig::new(credentials).with_calendar_id(calendar_id))?;
    provider.connect().await?;
    Ok(provider)
}

fn print_dry_run(requests: &[CalendarEventRequest]) {
    for request in requests {
        let extras = [
            request.color_id.as_ref().map(|c| format!("color {}", c)),
            request.recurrence.first().map(|r| r.to_string()),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");

        if extras.is_empty() {
            println!(
                "would create: {} ({} -> {})",
                request.summary, request.start.date_time, request.end.date_time
            );
        } else {
            println!(
                "would create: {} ({} -> {}) [{}]",
                request.summary, request.start.date_time, request.end.date_time, extras
            );
        }
    }
}

fn print_failures(results: &[SyncResult]) {
    for result in results {
        if let SyncOutcome::Failed { reason } = &result.outcome {
            eprintln!("failed: {} ({})", result.summary, reason);
        }
    }
}

fn print_summary(summary: &RunSummary) {
    let banner = "=".repeat(60);
    println!("{}", banner);
    if summary.dry_run {
        println!("Dry run complete");
    } else {
        println!("Calendar blocking complete");
    }
    println!("{}", banner);
    println!("Created:  {}", summary.created);
    println!("Failed:   {}", summary.failed);
    println!("Skipped:  {} (validation)", summary.skipped);
    if summary.filtered > 0 {
        println!("Filtered: {} (date range)", summary.filtered);
    }
    println!("{}", banner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use calblock_providers::{ProviderErrorCode, ScriptedProvider};

    fn record(date: (i32, u32, u32)) -> BlockRecord {
        BlockRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            title: "Focus".into(),
            description: None,
            recurrence: calblock_core::Recurrence::None,
            color: calblock_core::BlockColor::Unset,
        }
    }

    #[test]
    fn clean_summary_requires_no_drops_and_no_failures() {
        assert!(RunSummary {
            created: 3,
            ..RunSummary::default()
        }
        .is_clean());
        assert!(!RunSummary {
            created: 3,
            failed: 2,
            ..RunSummary::default()
        }
        .is_clean());
        assert!(!RunSummary {
            created: 3,
            skipped: 1,
            ..RunSummary::default()
        }
        .is_clean());
    }

    #[test]
    fn invalid_rows_are_dropped_and_counted() {
        let mut good = RawRow::new(2);
        good.set_field("date", "2025-03-10".into());
        good.set_field("start time", "9:00".into());
        good.set_field("end time", "10:00".into());
        good.set_field("title", "Focus".into());

        let mut bad = RawRow::new(3);
        bad.set_field("date", "2025-03-10".into());
        bad.set_field("start time", "10:00".into());
        bad.set_field("end time", "09:00".into());
        bad.set_field("title", "Bad".into());

        let (records, skipped) = validate_rows(&[good, bad], &MapperConfig::default());
        assert_eq!(records.len(), 1);
        assert_eq!(skipped, 1);
        assert_eq!(records[0].title, "Focus");
    }

    #[test]
    fn range_filter_is_inclusive() {
        let records = vec![
            record((2025, 3, 1)),
            record((2025, 3, 15)),
            record((2025, 3, 31)),
            record((2025, 4, 1)),
        ];

        let (kept, filtered) = apply_range(
            records,
            NaiveDate::from_ymd_opt(2025, 3, 15),
            NaiveDate::from_ymd_opt(2025, 3, 31),
        );
        assert_eq!(kept.len(), 2);
        assert_eq!(filtered, 2);
        assert_eq!(kept[0].date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn no_range_keeps_everything() {
        let records = vec![record((2025, 3, 1)), record((2025, 4, 1))];
        let (kept, filtered) = apply_range(records, None, None);
        assert_eq!(kept.len(), 2);
        assert_eq!(filtered, 0);
    }

    #[tokio::test]
    async fn dry_run_submits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        std::fs::write(
            &path,
            "Date,Start Time,End Time,Title\n\
             2025-03-10,9:00,10:00,Focus\n\
             2025-03-10,10:00,09:00,Backwards\n",
        )
        .unwrap();

        // No credentials are configured: a dry run must succeed anyway,
        // because it never reaches the provider.
        let args = SyncArgs {
            file: path,
            credentials: None,
            calendar_id: None,
            timezone: None,
            from: None,
            to: None,
            dry_run: true,
        };

        let summary = run(&args, &crate::config::ClientConfig::default())
            .await
            .unwrap();
        assert_eq!(
            summary,
            RunSummary {
                created: 0,
                failed: 0,
                skipped: 1,
                filtered: 0,
                dry_run: true,
            }
        );
    }

    #[tokio::test]
    async fn pipeline_reports_partial_failure() {
        // Schedule with five good rows and one bad; two scripted call failures.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedule.csv");
        std::fs::write(
            &path,
            "Date,Start Time,End Time,Title\n\
             2025-03-10,9:00,10:00,One\n\
             2025-03-10,10:00,09:00,Backwards\n\
             2025-03-11,9:00,10:00,Two\n\
             2025-03-12,9:00,10:00,Three\n\
             2025-03-13,9:00,10:00,Four\n\
             2025-03-14,9:00,10:00,Five\n",
        )
        .unwrap();

        let mapper = MapperConfig::default();
        let rows = parse_schedule(&path).unwrap();
        let (records, skipped) = validate_rows(&rows, &mapper);
        assert_eq!(skipped, 1);
        assert_eq!(records.len(), 5);

        let requests: Vec<CalendarEventRequest> =
            records.iter().map(|r| map_record(r, &mapper)).collect();

        let provider = ScriptedProvider::new()
            .then_created("a")
            .then_failed(ProviderErrorCode::ServerError, "boom")
            .then_created("b")
            .then_failed(ProviderErrorCode::RateLimited, "slow down")
            .then_created("c");

        let results = submit_all(&provider, &requests).await;
        let report = SyncReport::from_results(&results);
        assert_eq!((report.created, report.failed), (3, 2));

        let summary = RunSummary {
            created: report.created,
            failed: report.failed,
            skipped,
            filtered: 0,
            dry_run: false,
        };
        assert!(!summary.is_clean());
    }
}
