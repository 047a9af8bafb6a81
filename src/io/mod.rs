//! I/O module
//!
//! Handles CSV parsing and output.
//!
//! # Components
//!
//! - `csv_format` - CSV format handling (scenario rows, schedule export, summaries)
//! - `sync_reader` - Synchronous scenario reader with iterator interface
//! - `async_reader` - Asynchronous scenario reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{
    convert_scenario_record, format_amount, format_term, write_schedule_csv, write_summaries_csv,
    ScenarioRecord,
};
pub use sync_reader::SyncReader;
