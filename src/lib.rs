//! `table-dashboard` pulls every record of one hosted table (Airtable), reconciles the
//! schema-less records into a uniform [`types::Table`], and derives what a small dashboard shows:
//! a searchable grid, per-column descriptive statistics, column metadata and a CSV download.
//!
//! ## Pipeline
//!
//! 1. A [`ingestion::RecordSource`] returns the full record set in one blocking call
//!    ([`ingestion::AirtableSource`] over HTTP, or [`ingestion::JsonFileSource`] for a snapshot).
//! 2. [`processing::project`] builds the table: an `id` column followed by the union of all
//!    field names in first-seen order; missing fields become [`types::Value::Null`].
//! 3. [`processing::filter`], [`processing::numeric_stats`] and [`processing::column_summary`]
//!    derive views; [`export::to_csv`] serializes.
//!
//! Every processing function is pure and recomputes from the table it is given.
//!
//! ## Value types
//!
//! Cells are [`types::Value`]s:
//!
//! - [`types::Value::Null`]
//! - [`types::Value::Text`]
//! - [`types::Value::Number`] (`f64`)
//! - [`types::Value::Bool`]
//! - [`types::Value::DateTime`] (rendered as received)
//!
//! ## Quick example
//!
//! ```rust
//! use table_dashboard::export::{parse_csv, to_csv};
//! use table_dashboard::processing::{column_summary, filter, numeric_column_stats, project};
//! use table_dashboard::types::{Record, Value};
//!
//! let records = vec![
//!     Record::new("r1").with_field("Age", 30.0),
//!     Record::new("r2").with_field("Age", 40.0),
//!     Record::new("r3").with_field("Age", Value::Null),
//! ];
//! let table = project(&records);
//!
//! let age = numeric_column_stats(&table, "Age").unwrap();
//! assert_eq!((age.min, age.max, age.mean, age.median), (30.0, 40.0, 35.0, 35.0));
//!
//! let summary = column_summary(&table);
//! assert_eq!(summary[1].non_null_count, 2);
//!
//! assert_eq!(filter(&table, None), table);
//!
//! let csv = to_csv(&table).unwrap();
//! assert_eq!(parse_csv(&csv).unwrap().rows, table.cell_strings());
//! ```
//!
//! ## Fetching from Airtable
//!
//! ```no_run
//! use table_dashboard::config::DashboardConfig;
//! use table_dashboard::ingestion::{fetch_records, AirtableSource, FetchOptions};
//! use table_dashboard::processing::project;
//!
//! # fn main() -> Result<(), table_dashboard::DashboardError> {
//! // Reads API_TOKEN, BASE_ID and TABLE_NAME (a .env file is honored).
//! let config = DashboardConfig::from_env()?;
//! let source = AirtableSource::new(&config)?;
//! let table = project(&fetch_records(&source, &FetchOptions::default())?);
//! println!("rows={}", table.row_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`types`]: values, records and tables
//! - [`ingestion`]: record sources, unified fetch entrypoint, observers
//! - [`processing`]: projection, search, statistics, column summary
//! - [`export`]: CSV serialization and the downloadable artifact
//! - [`config`]: connection settings
//! - [`report`]: refresh state and plain-text views
//! - [`error`]: the shared error type

pub mod config;
pub mod error;
pub mod export;
pub mod ingestion;
pub mod processing;
pub mod report;
pub mod types;

pub use error::{DashboardError, DashboardResult};
