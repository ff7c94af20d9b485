//! Core types: cells, rows, validation, event mapping

pub mod cell;
pub mod event;
pub mod mapping;
pub mod record;
pub mod sheet;
pub mod tracing;
pub mod validate;

pub use cell::CellValue;
pub use event::{CalendarEventRequest, EventDateTime};
pub use mapping::{map_record, MapperConfig, DEFAULT_TIMEZONE, DEFAULT_TITLE};
pub use record::{BlockColor, BlockRecord, RawRow, Recurrence};
pub use sheet::{parse_schedule, ParseError, REQUIRED_COLUMNS};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
pub use validate::{validate_row, ValidationError};
